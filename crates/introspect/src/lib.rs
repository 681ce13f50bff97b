pub mod discovery;
pub mod extractor;
pub mod lexer;
pub mod loader;
pub mod manifest;
pub mod model;
pub mod registry;
pub mod scanner;
pub mod schema;

pub use discovery::{discover_relations, Discovery};
pub use extractor::extract_declaration;
pub use loader::{LoadedModel, ModelLoader};
pub use manifest::Manifest;
pub use model::{AccessorFailure, AccessorValue, Instance, Model, PlainInstance, Relation};
pub use registry::{Factory, ModelRegistry};
pub use schema::{SchemaSnapshot, SchemaStore};
