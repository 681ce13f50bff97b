use crate::model::Model;
use crate::registry::ModelRegistry;
use crate::schema::SchemaStore;
use resgen_core::{FieldSet, GeneratorError, GeneratorResult};

/// A constructed model with its visible fields resolved
pub struct LoadedModel {
    pub type_name: String,
    pub table: String,
    pub fields: FieldSet,
    model: Box<dyn Model>,
}

impl LoadedModel {
    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }
}

impl std::fmt::Debug for LoadedModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModel")
            .field("type_name", &self.type_name)
            .field("table", &self.table)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

pub struct ModelLoader<'a> {
    registry: &'a ModelRegistry,
    schema: &'a dyn SchemaStore,
}

impl<'a> ModelLoader<'a> {
    pub fn new(registry: &'a ModelRegistry, schema: &'a dyn SchemaStore) -> Self {
        Self { registry, schema }
    }

    /// Construct the named type, require the model capability and compute
    /// its visible fields from the table's column listing.
    pub fn load(&self, type_name: &str) -> GeneratorResult<LoadedModel> {
        let instance = self.registry.construct(type_name)?;
        let model = instance
            .into_model()
            .ok_or_else(|| GeneratorError::not_a_model(type_name))?;

        let table = model.table();
        let columns = self.schema.column_listing(&table)?;
        let hidden = model.hidden();
        let fields = FieldSet::visible(&columns, &hidden);

        tracing::debug!(
            model = type_name,
            table = %table,
            columns = columns.len(),
            visible = fields.len(),
            "loaded model"
        );

        Ok(LoadedModel {
            type_name: type_name.to_string(),
            table,
            fields,
            model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::Manifest;
    use crate::schema::SchemaSnapshot;

    fn fixtures() -> (ModelRegistry, SchemaSnapshot) {
        let registry = Manifest::from_yaml(
            r#"
models:
  - class: App\Models\Post
    hidden: [secret]
  - class: App\Models\Tag
  - class: App\Models\Casts\Money
    model: false
"#,
        )
        .unwrap()
        .into_registry("models.yaml");

        let schema = SchemaSnapshot::new().with_table("posts", ["id", "title", "body", "secret"]);
        (registry, schema)
    }

    #[test]
    fn test_load_computes_visible_fields() {
        let (registry, schema) = fixtures();
        let loader = ModelLoader::new(&registry, &schema);

        let loaded = loader.load("App\\Models\\Post").unwrap();
        assert_eq!(loaded.table, "posts");
        assert_eq!(loaded.fields.iter().collect::<Vec<_>>(), vec!["id", "title", "body"]);
        assert_eq!(loaded.model().accessors(), Vec::<String>::new());
    }

    #[test]
    fn test_load_failures() {
        let (registry, schema) = fixtures();
        let loader = ModelLoader::new(&registry, &schema);

        assert!(matches!(
            loader.load("App\\Models\\Ghost"),
            Err(GeneratorError::NotLoadable { .. })
        ));
        assert!(matches!(
            loader.load("App\\Models\\Casts\\Money"),
            Err(GeneratorError::NotAModel { .. })
        ));
        assert!(matches!(
            loader.load("App\\Models\\Tag"),
            Err(GeneratorError::SchemaUnavailable { .. })
        ));
    }
}
