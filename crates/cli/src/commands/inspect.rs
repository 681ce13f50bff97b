use console::style;
use resgen_core::{GeneratorError, RelationDescriptor};
use resgen_introspect::{discover_relations, extract_declaration, scanner, Manifest};
use serde_json::json;
use std::path::Path;

/// Show the declaration found in a model file and, given a manifest, the
/// relations the generator would discover for it.
pub fn run(file: &Path, manifest: Option<&Path>, json: bool) -> Result<(), GeneratorError> {
    let source = scanner::read_source(file)?;
    let descriptor = extract_declaration(&source);
    if descriptor.is_empty() {
        return Err(GeneratorError::ExtractionFailed {
            path: file.to_path_buf(),
        });
    }

    let model = descriptor.fully_qualified();
    let mut relations: Vec<RelationDescriptor> = Vec::new();
    let mut errors: Vec<String> = Vec::new();

    if let Some(manifest_path) = manifest {
        let origin = manifest_path.display().to_string();
        let registry = Manifest::load(manifest_path)?.into_registry(&origin);
        let instance = registry.construct(&model)?;
        let instance = instance
            .into_model()
            .ok_or_else(|| GeneratorError::not_a_model(&model))?;

        let discovery = discover_relations(&model, instance.as_ref());
        relations = discovery.relations;
        errors = discovery.failures.iter().map(ToString::to_string).collect();
    }

    if json {
        let output = json!({
            "namespace": descriptor.namespace,
            "type_name": descriptor.type_name,
            "model": model,
            "relations": relations,
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("🔍 {}", style(&model).bold());
    let namespace = if descriptor.namespace.is_empty() {
        "(global)"
    } else {
        descriptor.namespace.as_str()
    };
    println!("   namespace: {}", namespace);
    println!("   type:      {}", descriptor.type_name);

    if manifest.is_some() {
        if relations.is_empty() {
            println!("   relations: none");
        } else {
            println!("   relations:");
            for relation in &relations {
                println!(
                    "     {} -> {} ({:?})",
                    relation.accessor_name, relation.target_type_name, relation.shape
                );
            }
        }
        for error in &errors {
            eprintln!("{}", style(error).red());
        }
    }

    Ok(())
}
