use console::style;
use inquire::Confirm;
use resgen_core::GeneratorError;

/// Ask whether existing resources should be overwritten.
/// Without a terminal the default (overwrite) is used.
pub fn ask_overwrite() -> Result<bool, GeneratorError> {
    if !console::user_attended() {
        println!(
            "{}",
            style("No terminal attached, existing resources will be overwritten").dim()
        );
        return Ok(true);
    }

    Confirm::new("Overwrite existing resources?")
        .with_default(true)
        .with_help_message("Answer no to skip models that already have a resource")
        .prompt()
        .map_err(|e| GeneratorError::configuration(format!("Prompt failed: {}", e)))
}
