pub mod resolver;
pub mod graph_builder;

pub use graph_builder::{GraphBuilder, InclusionPolicy, IngestStats};
pub use resolver::ContactResolver;
