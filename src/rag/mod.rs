pub mod context_builder;
pub mod scoring;
pub mod store;

pub use context_builder::{AssembledContext, AssemblerConfig, ContextAssembler, SourceRef};
pub use store::{DocumentIndex, Fragment, RetrievedFragment};
