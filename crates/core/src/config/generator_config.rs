use crate::config::{ConfigError, ConfigSource};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL_PATH: &str = "app/Models";
pub const DEFAULT_RESOURCE_DIR: &str = "app/Http/Resources";
pub const DEFAULT_RESOURCE_NAMESPACE: &str = "App\\Http\\Resources";
pub const DEFAULT_EXTENSION: &str = "php";
pub const DEFAULT_MANIFEST: &str = "resgen.models.yaml";
pub const DEFAULT_CONFIG_FILE: &str = "resgen.yaml";
pub const DEFAULT_DATABASE_SCHEMA: &str = "public";

/// Settings for one generator run
///
/// Layered as defaults < config file < environment < command line; each
/// value remembers its source.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Directory of model files, or a single model file
    pub model_path: PathBuf,
    pub resource_dir: PathBuf,
    pub resource_namespace: String,
    pub extension: String,
    pub manifest: PathBuf,
    /// Schema snapshot file (YAML)
    pub schema: Option<PathBuf>,
    pub database_url: Option<String>,
    pub database_schema: String,
    /// Custom stub replacing the built-in resource template
    pub stub: Option<PathBuf>,
    /// `None` means ask
    pub overwrite: Option<bool>,
    sources: HashMap<String, ConfigSource>,
}

/// On-disk shape of `resgen.yaml`; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub model_path: Option<PathBuf>,
    pub resource_dir: Option<PathBuf>,
    pub resource_namespace: Option<String>,
    pub extension: Option<String>,
    pub manifest: Option<PathBuf>,
    pub schema: Option<PathBuf>,
    pub database_url: Option<String>,
    pub database_schema: Option<String>,
    pub stub: Option<PathBuf>,
    pub overwrite: Option<bool>,
}

impl ConfigFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

impl GeneratorConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        let mut sources = HashMap::new();
        for (key, value) in [
            ("model_path", DEFAULT_MODEL_PATH),
            ("resource_dir", DEFAULT_RESOURCE_DIR),
            ("resource_namespace", DEFAULT_RESOURCE_NAMESPACE),
            ("extension", DEFAULT_EXTENSION),
            ("manifest", DEFAULT_MANIFEST),
            ("database_schema", DEFAULT_DATABASE_SCHEMA),
        ] {
            sources.insert(key.to_string(), ConfigSource::Default(value.to_string()));
        }

        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            resource_dir: PathBuf::from(DEFAULT_RESOURCE_DIR),
            resource_namespace: DEFAULT_RESOURCE_NAMESPACE.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            schema: None,
            database_url: None,
            database_schema: DEFAULT_DATABASE_SCHEMA.to_string(),
            stub: None,
            overwrite: None,
            sources,
        }
    }

    /// Merge a config file into this configuration
    pub fn apply_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let file = ConfigFile::from_yaml(&content)?;
        let source = ConfigSource::File(path.display().to_string());
        tracing::debug!(path = %path.display(), "applying configuration file");

        macro_rules! merge {
            ($field:ident) => {
                if let Some(value) = file.$field {
                    self.$field = value;
                    self.sources.insert(stringify!($field).to_string(), source.clone());
                }
            };
            (optional $field:ident) => {
                if let Some(value) = file.$field {
                    self.$field = Some(value);
                    self.sources.insert(stringify!($field).to_string(), source.clone());
                }
            };
        }

        merge!(model_path);
        merge!(resource_dir);
        merge!(resource_namespace);
        merge!(extension);
        merge!(manifest);
        merge!(optional schema);
        merge!(optional database_url);
        merge!(database_schema);
        merge!(optional stub);
        merge!(optional overwrite);

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Apply overrides using the given variable lookup
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut read = |var: &str, key: &str| {
            let value = lookup(var).filter(|v| !v.is_empty());
            if value.is_some() {
                tracing::debug!(var, key, "configuration value overridden from environment");
                self.sources
                    .insert(key.to_string(), ConfigSource::EnvVar(var.to_string()));
            }
            value
        };

        let model_path = read("RESGEN_MODEL_PATH", "model_path");
        let resource_dir = read("RESGEN_RESOURCE_DIR", "resource_dir");
        let resource_namespace = read("RESGEN_RESOURCE_NAMESPACE", "resource_namespace");
        let manifest = read("RESGEN_MANIFEST", "manifest");
        let schema = read("RESGEN_SCHEMA", "schema");
        let database_url = read("DATABASE_URL", "database_url");
        let stub = read("RESGEN_STUB", "stub");

        if let Some(value) = model_path {
            self.model_path = PathBuf::from(value);
        }
        if let Some(value) = resource_dir {
            self.resource_dir = PathBuf::from(value);
        }
        if let Some(value) = resource_namespace {
            self.resource_namespace = value;
        }
        if let Some(value) = manifest {
            self.manifest = PathBuf::from(value);
        }
        if let Some(value) = schema {
            self.schema = Some(PathBuf::from(value));
        }
        if let Some(value) = database_url {
            self.database_url = Some(value);
        }
        if let Some(value) = stub {
            self.stub = Some(PathBuf::from(value));
        }
    }

    /// Record that a value was set from the command line
    pub fn mark_command_line(&mut self, key: &str) {
        self.sources
            .insert(key.to_string(), ConfigSource::CommandLine);
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.is_some() && self.database_url.is_some() {
            tracing::warn!("both a schema file and a database URL are configured; the schema file is used");
        }

        if self.extension.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "extension",
                &self.extension,
                "a non-empty file extension",
            ));
        }

        if self.resource_namespace.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "resource_namespace",
                &self.resource_namespace,
                "a non-empty namespace such as App\\Http\\Resources",
            ));
        }

        if self.schema.is_none() && self.database_url.is_none() {
            return Err(ConfigError::missing_required(
                "schema",
                "Provide a schema snapshot with --schema or a database with --database-url/DATABASE_URL",
            ));
        }

        Ok(())
    }

    /// Source of each tracked configuration value
    pub fn config_sources(&self) -> &HashMap<String, ConfigSource> {
        &self.sources
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::new()
    }
}
