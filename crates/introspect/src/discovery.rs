use crate::model::{AccessorValue, Model};
use resgen_core::{GeneratorError, RelationDescriptor};

/// Relations found on one model, plus the accessors that failed
#[derive(Debug, Default)]
pub struct Discovery {
    pub relations: Vec<RelationDescriptor>,
    /// Always `GeneratorError::AccessorInvocationFailed`
    pub failures: Vec<GeneratorError>,
}

/// Invoke every accessor of `model` in order and keep the relations.
///
/// A failing accessor is recorded and skipped; it never stops discovery of
/// the remaining accessors. Non-relation values are ignored.
pub fn discover_relations(type_name: &str, model: &dyn Model) -> Discovery {
    let mut discovery = Discovery::default();

    for accessor in model.accessors() {
        match model.invoke(&accessor) {
            Ok(AccessorValue::Relation(relation)) => {
                let shape = relation.kind.shape();
                tracing::debug!(model = type_name, accessor = %accessor, kind = ?relation.kind, ?shape, "found relation");
                discovery
                    .relations
                    .push(RelationDescriptor::new(accessor, relation.related, shape));
            }
            Ok(AccessorValue::Value) => {}
            Err(failure) => {
                tracing::warn!(model = type_name, accessor = %accessor, "accessor failed: {}", failure.message);
                discovery.failures.push(GeneratorError::AccessorInvocationFailed {
                    accessor: format!("{}::{}", type_name, accessor),
                    message: failure.message,
                    location: failure.location,
                });
            }
        }
    }

    discovery
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AccessorFailure, Relation};
    use resgen_core::{RelationKind, Shape};

    /// Hand-written model with one accessor that always fails
    struct Post;

    impl Model for Post {
        fn table(&self) -> String {
            "posts".to_string()
        }

        fn accessors(&self) -> Vec<String> {
            ["comments", "author", "brokenRelation", "excerpt", "latestComment"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        }

        fn invoke(&self, accessor: &str) -> Result<AccessorValue, AccessorFailure> {
            match accessor {
                "comments" => Ok(AccessorValue::Relation(Relation::new(
                    RelationKind::HasMany,
                    "App\\Models\\Comment",
                ))),
                "author" => Ok(AccessorValue::Relation(Relation::new(
                    RelationKind::BelongsTo,
                    "App\\Models\\User",
                ))),
                "latestComment" => Ok(AccessorValue::Relation(Relation::new(
                    RelationKind::HasOne,
                    "App\\Models\\Comment",
                ))),
                "excerpt" => Ok(AccessorValue::Value),
                _ => Err(AccessorFailure::new(
                    "Undefined property: $category",
                    "app/Models/Post.php:42",
                )),
            }
        }
    }

    #[test]
    fn test_relations_in_accessor_order() {
        let discovery = discover_relations("App\\Models\\Post", &Post);

        assert_eq!(
            discovery.relations,
            vec![
                RelationDescriptor::new("comments", "App\\Models\\Comment", Shape::Collection),
                RelationDescriptor::new("author", "App\\Models\\User", Shape::Singular),
                RelationDescriptor::new("latestComment", "App\\Models\\Comment", Shape::Singular),
            ]
        );
    }

    #[test]
    fn test_failing_accessor_is_recorded_and_skipped() {
        let discovery = discover_relations("App\\Models\\Post", &Post);

        assert_eq!(discovery.failures.len(), 1);
        match &discovery.failures[0] {
            GeneratorError::AccessorInvocationFailed {
                accessor,
                message,
                location,
            } => {
                assert_eq!(accessor, "App\\Models\\Post::brokenRelation");
                assert_eq!(message, "Undefined property: $category");
                assert_eq!(location, "app/Models/Post.php:42");
            }
            other => panic!("unexpected failure: {other}"),
        }
        assert_eq!(discovery.relations.len(), 3);
    }
}
