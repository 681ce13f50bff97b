pub mod postgres;
pub mod snapshot;

pub use snapshot::SchemaSnapshot;

use resgen_core::GeneratorResult;

/// Column listing collaborator, queried once per model
pub trait SchemaStore {
    /// Column names of `table`, in table order
    fn column_listing(&self, table: &str) -> GeneratorResult<Vec<String>>;
}
