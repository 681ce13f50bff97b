pub mod config;
pub mod errors;
pub mod naming;
pub mod specs;

pub use config::{ConfigError, ConfigSource, GeneratorConfig};
pub use errors::{GeneratorError, GeneratorResult};
pub use specs::{
    FieldSet, ModelDescriptor, Outcome, RelationDescriptor, RelationKind, RunSummary, Shape,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
