use crate::interactive;
use clap::Args;
use console::style;
use resgen::report;
use resgen::Pipeline;
use resgen_codegen::{CodeWriter, ResourceSynthesizer, Stub};
use resgen_core::config::DEFAULT_CONFIG_FILE;
use resgen_core::{GeneratorConfig, GeneratorError};
use resgen_introspect::schema::postgres;
use resgen_introspect::{Manifest, SchemaSnapshot};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory to search for models, or a single model file. Default is app/Models.
    #[arg(long)]
    model_path: Option<PathBuf>,

    /// Overwrite existing resources without asking
    #[arg(long, conflicts_with = "no_overwrite")]
    overwrite: bool,

    /// Skip models that already have a resource without asking
    #[arg(long)]
    no_overwrite: bool,

    /// Never prompt; existing resources are overwritten unless --no-overwrite is given
    #[arg(long, short = 'n')]
    no_interaction: bool,

    /// Configuration file (default: resgen.yaml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Model manifest describing tables, hidden fields and relations
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Schema snapshot file with the column listing of every table
    #[arg(long)]
    schema: Option<PathBuf>,

    /// PostgreSQL URL to read column listings from (also DATABASE_URL)
    #[arg(long)]
    database_url: Option<String>,

    /// Directory the resources are written to. Default is app/Http/Resources.
    #[arg(long)]
    resource_dir: Option<PathBuf>,

    /// Custom resource stub
    #[arg(long)]
    stub: Option<PathBuf>,
}

impl GenerateArgs {
    /// Defaults < config file < environment < command line
    fn resolve_config(&self) -> Result<GeneratorConfig, GeneratorError> {
        let mut config = GeneratorConfig::new();

        match &self.config {
            Some(path) => config.apply_file(path)?,
            None => {
                let default_file = Path::new(DEFAULT_CONFIG_FILE);
                if default_file.is_file() {
                    config.apply_file(default_file)?;
                }
            }
        }

        config.apply_env();

        if let Some(path) = &self.model_path {
            config.model_path = path.clone();
            config.mark_command_line("model_path");
        }
        if let Some(path) = &self.manifest {
            config.manifest = path.clone();
            config.mark_command_line("manifest");
        }
        if let Some(path) = &self.schema {
            config.schema = Some(path.clone());
            config.mark_command_line("schema");
        }
        if let Some(url) = &self.database_url {
            config.database_url = Some(url.clone());
            config.mark_command_line("database_url");
        }
        if let Some(path) = &self.resource_dir {
            config.resource_dir = path.clone();
            config.mark_command_line("resource_dir");
        }
        if let Some(path) = &self.stub {
            config.stub = Some(path.clone());
            config.mark_command_line("stub");
        }
        if self.overwrite || self.no_overwrite {
            config.overwrite = Some(self.overwrite);
            config.mark_command_line("overwrite");
        }

        config.validate()?;
        Ok(config)
    }
}

pub async fn run(args: GenerateArgs) -> Result<(), GeneratorError> {
    let config = args.resolve_config()?;
    for (key, source) in config.config_sources() {
        tracing::debug!(key = %key, source = %source.description(), "configuration value");
    }

    let overwrite = match config.overwrite {
        Some(overwrite) => overwrite,
        None if args.no_interaction => true,
        None => interactive::ask_overwrite()?,
    };

    let manifest_origin = config.manifest.display().to_string();
    let registry = Manifest::load(&config.manifest)?.into_registry(&manifest_origin);
    tracing::debug!(models = registry.len(), manifest = %manifest_origin, "model registry ready");

    let schema = load_schema(&config).await?;

    let stub = match &config.stub {
        Some(path) => Stub::new(std::fs::read_to_string(path)?)?,
        None => Stub::builtin()?,
    };
    let synthesizer = ResourceSynthesizer::with_stub(stub, config.resource_namespace.clone());
    let writer = CodeWriter::new(&config.resource_dir, &config.extension);

    let pipeline = Pipeline::new(&registry, &schema, &synthesizer, &writer, overwrite);
    let summary = pipeline.run(&config.model_path, report::print_progress)?;

    report::print_summary(&summary);
    Ok(())
}

/// A snapshot file wins over a database connection
async fn load_schema(config: &GeneratorConfig) -> Result<SchemaSnapshot, GeneratorError> {
    if let Some(path) = &config.schema {
        return SchemaSnapshot::load(path);
    }

    match &config.database_url {
        Some(url) => {
            println!("{}", style("Reading column listings from the database...").dim());
            postgres::load_snapshot(url, &config.database_schema).await
        }
        None => Err(GeneratorError::configuration(
            "No schema source configured; pass --schema or --database-url",
        )),
    }
}
