use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("retrieval failed: {0}")]
    Retrieval(String),
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("workflow error: {0}")]
    Workflow(String),
}

impl AgentError {
    pub fn config<E: std::fmt::Display>(err: E) -> Self {
        AgentError::Config(err.to_string())
    }

    pub fn retrieval<E: std::fmt::Display>(err: E) -> Self {
        AgentError::Retrieval(err.to_string())
    }

    pub fn generation<E: std::fmt::Display>(err: E) -> Self {
        AgentError::Generation(err.to_string())
    }
}
