use super::SchemaStore;
use resgen_core::{GeneratorError, GeneratorResult};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// In-memory table -> ordered columns map
///
/// Loaded from a YAML file (`tables: { posts: [id, title] }`) or filled
/// from a live database before the run starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaSnapshot {
    #[serde(default)]
    tables: HashMap<String, Vec<String>>,
}

impl SchemaSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> GeneratorResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    pub fn with_table<I, S>(mut self, table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables
            .insert(table.to_string(), columns.into_iter().map(Into::into).collect());
        self
    }

    /// Append one column to a table, creating the table on first use
    pub fn push_column(&mut self, table: &str, column: impl Into<String>) {
        self.tables
            .entry(table.to_string())
            .or_default()
            .push(column.into());
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

impl SchemaStore for SchemaSnapshot {
    fn column_listing(&self, table: &str) -> GeneratorResult<Vec<String>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| GeneratorError::schema_unavailable(table, "table does not exist"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_keep_declared_order() {
        let snapshot = SchemaSnapshot::from_yaml(
            "tables:\n  posts: [id, title, body, secret]\n  comments: [id, post_id, body]\n",
        )
        .unwrap();

        assert_eq!(snapshot.table_count(), 2);
        assert_eq!(
            snapshot.column_listing("posts").unwrap(),
            vec!["id", "title", "body", "secret"]
        );
    }

    #[test]
    fn test_missing_table_is_schema_error() {
        let snapshot = SchemaSnapshot::new().with_table("posts", ["id"]);
        assert!(matches!(
            snapshot.column_listing("comments"),
            Err(GeneratorError::SchemaUnavailable { .. })
        ));
    }

    #[test]
    fn test_push_column() {
        let mut snapshot = SchemaSnapshot::new();
        snapshot.push_column("users", "id");
        snapshot.push_column("users", "email");
        assert_eq!(snapshot.column_listing("users").unwrap(), vec!["id", "email"]);
    }
}
