pub mod model;
pub mod summary;

pub use model::{FieldSet, ModelDescriptor, RelationDescriptor, RelationKind, Shape};
pub use summary::{Outcome, RunSummary};
