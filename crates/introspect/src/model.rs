use resgen_core::RelationKind;

/// Relation returned by a model accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub kind: RelationKind,
    /// Fully-qualified name of the related model
    pub related: String,
}

impl Relation {
    pub fn new(kind: RelationKind, related: impl Into<String>) -> Self {
        Self {
            kind,
            related: related.into(),
        }
    }
}

/// Value produced by invoking an accessor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessorValue {
    Relation(Relation),
    /// Anything that is not a relation; ignored during discovery
    Value,
}

/// Raised by an accessor that could not be invoked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessorFailure {
    pub message: String,
    /// Where the failing accessor is defined
    pub location: String,
}

impl AccessorFailure {
    pub fn new(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: location.into(),
        }
    }
}

/// A persisted model: bound to a table, with an explicit accessor table
/// in place of runtime reflection.
pub trait Model {
    /// Backing table name
    fn table(&self) -> String;

    /// Fields excluded from serialization
    fn hidden(&self) -> Vec<String> {
        Vec::new()
    }

    /// The model's own public zero-argument accessors, in declaration order
    fn accessors(&self) -> Vec<String>;

    fn invoke(&self, accessor: &str) -> Result<AccessorValue, AccessorFailure>;
}

/// Anything the registry can construct. Only some instances are models.
pub trait Instance {
    /// The "is a persisted model" capability
    fn into_model(self: Box<Self>) -> Option<Box<dyn Model>>;
}

/// Marker instance for registered types that are not models
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainInstance;

impl Instance for PlainInstance {
    fn into_model(self: Box<Self>) -> Option<Box<dyn Model>> {
        None
    }
}
