// Step-transition observability, decoupled from control flow.

/// Receives structured step-transition events as the runtime walks a
/// workflow graph. Implementations must not influence execution.
pub trait StepObserver: Send + Sync {
    /// A node is about to execute. `step` counts from 0 within the run.
    fn on_step(&self, node_id: &str, step: usize);

    /// The run reached its terminal node.
    fn on_terminal(&self, node_id: &str, steps: usize);

    /// A node failed; the run is about to abort.
    fn on_error(&self, node_id: &str, message: &str);
}

/// Default observer: emits tracing events.
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn on_step(&self, node_id: &str, step: usize) {
        tracing::debug!(node = node_id, step, "executing node");
    }

    fn on_terminal(&self, node_id: &str, steps: usize) {
        tracing::debug!(node = node_id, steps, "workflow complete");
    }

    fn on_error(&self, node_id: &str, message: &str) {
        tracing::error!(node = node_id, message, "node failed");
    }
}
