use serde::{Deserialize, Serialize};
use std::fmt;

/// Namespace and class name recovered from a model source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub namespace: String,
    pub type_name: String,
}

impl ModelDescriptor {
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            type_name: type_name.into(),
        }
    }

    /// True when no type declaration was found
    pub fn is_empty(&self) -> bool {
        self.type_name.is_empty()
    }

    /// `Namespace\Type`, or just `Type` in the global namespace
    pub fn fully_qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.type_name.clone()
        } else {
            format!("{}\\{}", self.namespace, self.type_name)
        }
    }
}

impl fmt::Display for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fully_qualified())
    }
}

/// Ordered visible field names of a model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSet(Vec<String>);

impl FieldSet {
    /// Columns minus hidden fields, keeping column order
    pub fn visible(columns: &[String], hidden: &[String]) -> Self {
        Self(
            columns
                .iter()
                .filter(|column| !hidden.contains(column))
                .cloned()
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for FieldSet {
    fn from(fields: Vec<String>) -> Self {
        Self(fields)
    }
}

/// Output shape of a relation in the generated resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    Singular,
    Collection,
}

/// Relation kinds a model accessor may return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    /// One-to-one (hasOne)
    HasOne,
    /// One-to-many (hasMany)
    HasMany,
    /// Inverse of one-to-one or one-to-many (belongsTo)
    BelongsTo,
    /// Many-to-many through a pivot table
    BelongsToMany,
    HasOneThrough,
    HasManyThrough,
    /// Polymorphic one-to-one
    MorphOne,
    /// Polymorphic one-to-many
    MorphMany,
    /// Inverse polymorphic relation
    MorphTo,
    /// Polymorphic many-to-many
    MorphToMany,
    /// Inverse of a polymorphic many-to-many
    MorphedByMany,
    /// Any relation kind outside the known set
    #[serde(other)]
    Other,
}

impl RelationKind {
    /// Kinds whose related values render as a resource collection
    pub const COLLECTION_KINDS: [RelationKind; 6] = [
        RelationKind::HasMany,
        RelationKind::HasManyThrough,
        RelationKind::BelongsToMany,
        RelationKind::MorphMany,
        RelationKind::MorphToMany,
        RelationKind::MorphedByMany,
    ];

    pub fn shape(self) -> Shape {
        if Self::COLLECTION_KINDS.contains(&self) {
            Shape::Collection
        } else {
            Shape::Singular
        }
    }
}

/// A relation accessor discovered on a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDescriptor {
    pub accessor_name: String,
    pub target_type_name: String,
    pub shape: Shape,
}

impl RelationDescriptor {
    pub fn new(
        accessor_name: impl Into<String>,
        target_type_name: impl Into<String>,
        shape: Shape,
    ) -> Self {
        Self {
            accessor_name: accessor_name.into(),
            target_type_name: target_type_name.into(),
            shape,
        }
    }

    /// Target type name without its namespace
    pub fn target_basename(&self) -> &str {
        crate::naming::class_basename(&self.target_type_name)
    }
}
