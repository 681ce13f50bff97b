mod commands;
mod interactive;

use clap::{Parser, Subcommand};
use commands::generate::GenerateArgs;
use resgen_core::GeneratorError;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resgen")]
#[command(about = "Generate Laravel API resources from Eloquent models")]
#[command(version = resgen_core::VERSION)]
struct Cli {
    /// Enable debug diagnostics on stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an API resource for every model under the model path
    Generate(GenerateArgs),

    /// Show the model declaration found in a single file
    Inspect {
        /// Model source file
        file: PathBuf,

        /// Model manifest used to list the model's relations
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), GeneratorError> {
    let cli = Cli::parse();
    resgen::logging::init_logging(cli.verbose);

    match cli.command {
        Commands::Generate(args) => {
            commands::generate::run(args).await?;
        }
        Commands::Inspect { file, manifest, json } => {
            commands::inspect::run(&file, manifest.as_deref(), json)?;
        }
    }

    Ok(())
}
