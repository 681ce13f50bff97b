//! YAML model manifest
//!
//! Declares, per fully-qualified class, what a reflective ORM would report
//! at runtime: the table, hidden fields and the model's own accessors.
//!
//! ```yaml
//! models:
//!   - class: App\Models\Post
//!     hidden: [secret]
//!     relations:
//!       - { name: comments, kind: has_many, related: App\Models\Comment }
//!       - { name: author, kind: belongs_to, related: App\Models\User }
//!       - { name: commentable, kind: morph_to }
//!       - { name: legacyTags, kind: has_many, error: "Class \"Tag\" not found" }
//!     accessors: [excerpt]
//! ```
//!
//! `related` is required for collection relations only, since their entry
//! names the related resource. `error` makes the accessor fail when invoked.

use crate::model::{AccessorFailure, AccessorValue, Instance, Model, PlainInstance, Relation};
use crate::registry::ModelRegistry;
use resgen_core::{naming, GeneratorError, GeneratorResult, RelationKind, Shape};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::rc::Rc;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub models: Vec<ModelEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelEntry {
    pub class: String,
    /// Defaults to the snake_case plural of the class basename
    #[serde(default)]
    pub table: Option<String>,
    #[serde(default)]
    pub hidden: Vec<String>,
    /// Abstract classes cannot be constructed
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// `false` for classes that live among the models but are not models
    #[serde(default = "default_true")]
    pub model: bool,
    #[serde(default)]
    pub relations: Vec<RelationEntry>,
    /// Public zero-argument methods that do not return relations
    #[serde(default)]
    pub accessors: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationEntry {
    pub name: String,
    pub kind: RelationKind,
    #[serde(default)]
    pub related: Option<String>,
    /// Message of the exception the accessor throws
    #[serde(default)]
    pub error: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Manifest {
    pub fn from_yaml(yaml: &str) -> GeneratorResult<Self> {
        let manifest: Self = serde_yaml::from_str(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Accessor names are unique per class across relations and accessors
    fn validate(&self) -> GeneratorResult<()> {
        for entry in &self.models {
            let mut seen = HashSet::new();
            let names = entry
                .relations
                .iter()
                .map(|relation| relation.name.as_str())
                .chain(entry.accessors.iter().map(String::as_str));

            for name in names {
                if !seen.insert(name) {
                    return Err(GeneratorError::configuration(format!(
                        "Manifest entry {} declares accessor '{}' more than once",
                        entry.class, name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Register one factory per entry. `origin` names the manifest in
    /// accessor failure locations.
    pub fn register_into(self, registry: &mut ModelRegistry, origin: &str) {
        let origin: Rc<str> = Rc::from(origin);

        for entry in self.models {
            let class = entry.class.trim_start_matches('\\').to_string();
            let model = Rc::new(ManifestModel {
                entry,
                origin: Rc::clone(&origin),
            });

            let replaced = registry.register(&class, move || model.construct());
            if replaced {
                tracing::warn!(class = %class, "duplicate manifest entry, the last one wins");
            }
        }
    }

    pub fn into_registry(self, origin: &str) -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        self.register_into(&mut registry, origin);
        registry
    }
}

/// A model described by a manifest entry
#[derive(Debug, Clone)]
pub struct ManifestModel {
    entry: ModelEntry,
    origin: Rc<str>,
}

impl ManifestModel {
    fn construct(&self) -> Result<Box<dyn Instance>, String> {
        if self.entry.is_abstract {
            return Err(format!("Cannot instantiate abstract class {}", self.entry.class));
        }
        if !self.entry.model {
            return Ok(Box::new(PlainInstance));
        }
        Ok(Box::new(self.clone()))
    }

    fn location(&self) -> String {
        format!("{} ({})", self.origin, self.entry.class)
    }
}

impl Instance for ManifestModel {
    fn into_model(self: Box<Self>) -> Option<Box<dyn Model>> {
        Some(self)
    }
}

impl Model for ManifestModel {
    fn table(&self) -> String {
        self.entry
            .table
            .clone()
            .unwrap_or_else(|| naming::table_name_for(&self.entry.class))
    }

    fn hidden(&self) -> Vec<String> {
        self.entry.hidden.clone()
    }

    fn accessors(&self) -> Vec<String> {
        self.entry
            .relations
            .iter()
            .map(|relation| relation.name.clone())
            .chain(self.entry.accessors.iter().cloned())
            .collect()
    }

    fn invoke(&self, accessor: &str) -> Result<AccessorValue, AccessorFailure> {
        if let Some(relation) = self.entry.relations.iter().find(|r| r.name == accessor) {
            if let Some(message) = &relation.error {
                return Err(AccessorFailure::new(message.clone(), self.location()));
            }

            let related = relation
                .related
                .as_deref()
                .map(|related| related.trim().trim_start_matches('\\'))
                .unwrap_or_default();

            if related.is_empty() && relation.kind.shape() == Shape::Collection {
                return Err(AccessorFailure::new(
                    format!("Collection relation '{}' does not declare a related class", accessor),
                    self.location(),
                ));
            }
            return Ok(AccessorValue::Relation(Relation::new(relation.kind, related)));
        }

        if self.entry.accessors.iter().any(|a| a == accessor) {
            return Ok(AccessorValue::Value);
        }

        Err(AccessorFailure::new(
            format!("Call to undefined method {}::{}()", self.entry.class, accessor),
            self.location(),
        ))
    }
}
