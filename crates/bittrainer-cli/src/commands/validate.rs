//! The `bittrainer validate` command.

use std::path::PathBuf;

use anyhow::Result;

use bittrainer_core::config::{load_config_from, validate_config};

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    println!(
        "Config: {}-bit, {} answers, {} operation(s)",
        config.bit_width,
        config.base,
        config.operations.len()
    );

    let warnings = validate_config(&config);
    for w in &warnings {
        let prefix = w
            .operation
            .map(|op| format!("  [{op}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    // An unusable config is an error, not just a warning
    config.generator()?;

    if warnings.is_empty() {
        println!("Config valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
