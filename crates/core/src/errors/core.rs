use std::path::PathBuf;
use thiserror::Error;

/// Core error type for the resource generator
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No class declaration found in {}", path.display())]
    ExtractionFailed { path: PathBuf },

    #[error("{type_name} could not be loaded: {reason}")]
    NotLoadable { type_name: String, reason: String },

    #[error("{type_name} is not a valid model class.")]
    NotAModel { type_name: String },

    #[error("Column listing for table '{table}' failed: {message}")]
    SchemaUnavailable { table: String, message: String },

    #[error("Error while executing method {accessor}\n{message} in {location}")]
    AccessorInvocationFailed {
        accessor: String,
        message: String,
        location: String,
    },

    #[error("Output directory {} is unavailable: {source}", path.display())]
    OutputDirectoryUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Template error: {message}")]
    Template { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl GeneratorError {
    /// Create a new not-loadable error
    pub fn not_loadable(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::NotLoadable {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    pub fn not_a_model(type_name: impl Into<String>) -> Self {
        Self::NotAModel {
            type_name: type_name.into(),
        }
    }

    /// Create a new schema error for the given table
    pub fn schema_unavailable(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::SchemaUnavailable {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Errors that abort the whole run instead of a single input
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::OutputDirectoryUnavailable { .. } | Self::Configuration { .. } | Self::Database { .. }
        )
    }

    /// Non-model inputs are reported as warnings rather than errors
    pub fn is_warning(&self) -> bool {
        matches!(self, Self::NotAModel { .. })
    }
}

/// Result alias used throughout the generator crates
pub type GeneratorResult<T> = Result<T, GeneratorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        let err = GeneratorError::OutputDirectoryUnavailable {
            path: PathBuf::from("app/Http/Resources"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.is_fatal());

        assert!(!GeneratorError::not_a_model("App\\Models\\Helper").is_fatal());
        assert!(!GeneratorError::ExtractionFailed { path: PathBuf::from("x.php") }.is_fatal());
        assert!(!GeneratorError::schema_unavailable("posts", "missing").is_fatal());
    }

    #[test]
    fn test_accessor_failure_message() {
        let err = GeneratorError::AccessorInvocationFailed {
            accessor: "App\\Models\\Post::author".to_string(),
            message: "relation target is not declared".to_string(),
            location: "resgen.models.yaml (App\\Models\\Post)".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error while executing method App\\Models\\Post::author\nrelation target is not declared in resgen.models.yaml (App\\Models\\Post)"
        );
    }

    #[test]
    fn test_not_a_model_is_warning() {
        assert!(GeneratorError::not_a_model("App\\Models\\Casts\\Money").is_warning());
        assert!(!GeneratorError::not_loadable("App\\Models\\Ghost", "not registered").is_warning());
    }
}
