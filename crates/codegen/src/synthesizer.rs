use crate::templates::Stub;
use resgen_core::naming::to_snake_case;
use resgen_core::{FieldSet, GeneratorResult, RelationDescriptor, Shape};
use std::collections::HashMap;

/// Separator between array entries, matching the stub's indentation
const ENTRY_SEPARATOR: &str = "\n            ";

/// Renders resource classes from a stub
#[derive(Debug, Clone)]
pub struct ResourceSynthesizer {
    stub: Stub,
    namespace: String,
}

impl ResourceSynthesizer {
    /// Synthesizer using the built-in stub
    pub fn new(namespace: impl Into<String>) -> GeneratorResult<Self> {
        Ok(Self::with_stub(Stub::builtin()?, namespace))
    }

    pub fn with_stub(stub: Stub, namespace: impl Into<String>) -> Self {
        Self {
            stub,
            namespace: namespace.into(),
        }
    }

    pub fn resource_class(type_name: &str) -> String {
        format!("{}Resource", type_name)
    }

    /// Resource source for `type_name`. Pure: identical inputs give
    /// byte-identical output.
    pub fn render(&self, type_name: &str, fields: &FieldSet, relations: &[RelationDescriptor]) -> String {
        let mut context = HashMap::new();
        context.insert("namespace", self.namespace.clone());
        context.insert("resourceClass", Self::resource_class(type_name));
        context.insert("columns", Self::field_entries(fields));
        context.insert("relations", Self::relation_entries(relations));

        self.stub.render(&context)
    }

    fn field_entries(fields: &FieldSet) -> String {
        fields
            .iter()
            .map(|field| format!("'{field}' => $this->{field},"))
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }

    fn relation_entries(relations: &[RelationDescriptor]) -> String {
        relations
            .iter()
            .map(Self::relation_entry)
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }

    fn relation_entry(relation: &RelationDescriptor) -> String {
        let key = to_snake_case(&relation.accessor_name);
        let loaded = format!("$this->whenLoaded('{}')", relation.accessor_name);

        match relation.shape {
            Shape::Collection => format!(
                "'{}' => {}::collection({}),",
                key,
                Self::resource_class(relation.target_basename()),
                loaded
            ),
            Shape::Singular => format!("'{}' => {},", key, loaded),
        }
    }
}
