//! Scan -> extract -> load -> discover -> synthesize -> write, one input at
//! a time in file-name order.

use resgen_codegen::{CodeWriter, ResourceSynthesizer};
use resgen_core::{GeneratorError, GeneratorResult, Outcome, RunSummary};
use resgen_introspect::{
    discover_relations, extract_declaration, scanner, ModelLoader, ModelRegistry, SchemaStore,
};
use std::path::{Path, PathBuf};

/// Per-input result handed to the progress callback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub input: PathBuf,
    /// Fully-qualified model class
    pub model: String,
    pub resource: PathBuf,
    pub outcome: Outcome,
}

pub struct Pipeline<'a> {
    loader: ModelLoader<'a>,
    synthesizer: &'a ResourceSynthesizer,
    writer: &'a CodeWriter,
    overwrite: bool,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        registry: &'a ModelRegistry,
        schema: &'a dyn SchemaStore,
        synthesizer: &'a ResourceSynthesizer,
        writer: &'a CodeWriter,
        overwrite: bool,
    ) -> Self {
        Self {
            loader: ModelLoader::new(registry, schema),
            synthesizer,
            writer,
            overwrite,
        }
    }

    /// Process every input under `model_path`.
    ///
    /// Only an unavailable output directory or an unreadable model path
    /// aborts the run; every other failure is recorded in the summary and
    /// the next input is processed.
    pub fn run<F>(&self, model_path: &Path, mut progress: F) -> GeneratorResult<RunSummary>
    where
        F: FnMut(&GenerationResult),
    {
        self.writer.ensure_output_dir()?;

        let inputs = scanner::scan(model_path)?;
        let mut summary = RunSummary::new(inputs.len());
        tracing::debug!(inputs = inputs.len(), path = %model_path.display(), "scanned model path");

        for input in &inputs {
            match self.generate(input, &mut summary) {
                Ok(result) => {
                    summary.record(result.outcome);
                    progress(&result);
                }
                Err(err) if err.is_warning() => {
                    tracing::warn!(input = %input.display(), "{}", err);
                    summary.record_warning(err.to_string());
                }
                Err(err @ GeneratorError::Io(_)) => {
                    summary.record_failure(format!("{}: {}", input.display(), err));
                }
                Err(err) => {
                    tracing::debug!(input = %input.display(), "input abandoned: {}", err);
                    summary.record_failure(err.to_string());
                }
            }
        }

        Ok(summary)
    }

    fn generate(&self, input: &Path, summary: &mut RunSummary) -> GeneratorResult<GenerationResult> {
        let source = scanner::read_source(input)?;
        let descriptor = extract_declaration(&source);
        if descriptor.is_empty() {
            return Err(GeneratorError::ExtractionFailed {
                path: input.to_path_buf(),
            });
        }

        let model = descriptor.fully_qualified();
        let resource = self.writer.resource_path(&descriptor.type_name);
        let exists = resource.exists();

        if exists && !self.overwrite {
            return Ok(GenerationResult {
                input: input.to_path_buf(),
                model,
                resource,
                outcome: Outcome::Skipped,
            });
        }

        let loaded = self.loader.load(&model)?;
        let discovery = discover_relations(&model, loaded.model());
        for failure in &discovery.failures {
            summary.record_error(failure.to_string());
        }

        let content = self
            .synthesizer
            .render(&descriptor.type_name, &loaded.fields, &discovery.relations);
        self.writer.write(&resource, &content)?;

        let outcome = if exists {
            Outcome::Overwritten
        } else {
            Outcome::Created
        };

        Ok(GenerationResult {
            input: input.to_path_buf(),
            model,
            resource,
            outcome,
        })
    }
}
