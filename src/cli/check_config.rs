//! Check-config command implementation.

use std::path::Path;

use tankbot::PolicyEngine;

use super::{CliError, load_config};

/// Execute the check-config command.
///
/// Prints the effective configuration as TOML, followed by the rule chain.
///
/// # Errors
///
/// Returns an error if the configuration is unreadable or invalid.
pub(crate) fn execute(config: Option<&Path>) -> Result<(), CliError> {
    let config = load_config(config)?;
    print!("{}", config.to_toml()?);

    let engine = PolicyEngine::new(config);
    println!();
    println!("# rules, in evaluation order:");
    for (i, name) in engine.rule_names().enumerate() {
        println!("#   {}. {name}", i + 1);
    }
    Ok(())
}
