//! The `bittrainer init` command.

use anyhow::Result;

use bittrainer_core::config::CONFIG_FILE_NAME;

pub fn execute() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);
    if path.exists() {
        println!("{CONFIG_FILE_NAME} already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created {CONFIG_FILE_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE_NAME} to pick a width, base and operations");
    println!("  2. Run: bittrainer validate");
    println!("  3. Run: bittrainer practice");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# bittrainer configuration

# Bit width of questions: 4, 8 or 16
bit_width = 8

# Base answers are typed in: binary, decimal or hex
base = "binary"

# Operations to practice (omit to practice all of them).
# Run `bittrainer list-ops` for the full list.
operations = [
    "and",
    "or",
    "xor",
    "not",
    "left-shift",
    "right-shift",
    "set-bit",
    "clear-bit",
    "toggle-bit",
    "check-bit-set",
    "mask",
]

# Questions per session (omit to keep going until you type "q")
rounds = 10

# How operand 2 is drawn for binary operations: "bit-index" or "value"
[operand2_domains]
mask = "value"
"#;
