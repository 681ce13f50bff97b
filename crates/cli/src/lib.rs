pub mod logging;
pub mod pipeline;
pub mod report;

pub use pipeline::{GenerationResult, Pipeline};
