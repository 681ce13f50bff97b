pub mod synthesizer;
pub mod templates;
pub mod writer;

pub use synthesizer::ResourceSynthesizer;
pub use templates::{Stub, RESOURCE_STUB};
pub use writer::CodeWriter;
