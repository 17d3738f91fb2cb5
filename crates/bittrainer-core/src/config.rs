//! Trainer configuration loading and validation.
//!
//! Configuration lives in a TOML file. Operation names in the file go through
//! the same parser as the command line, so aliases like `shl` work there too.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::{Operand2Domain, OperationKind};
use crate::error::EngineError;
use crate::generator::{GeneratorConfig, QuestionGenerator};
use crate::model::{BitWidth, NumberBase};

/// Name of the per-directory config file.
pub const CONFIG_FILE_NAME: &str = "bittrainer.toml";

/// Intermediate TOML structure for parsing config files.
#[derive(Debug, Deserialize)]
struct TomlTrainerConfig {
    #[serde(default = "default_bit_width")]
    bit_width: u32,
    #[serde(default = "default_base_str")]
    base: String,
    #[serde(default)]
    operations: Option<Vec<String>>,
    #[serde(default)]
    operand2_domains: BTreeMap<String, Operand2Domain>,
    #[serde(default)]
    rounds: Option<u32>,
}

fn default_bit_width() -> u32 {
    8
}

fn default_base_str() -> String {
    "binary".to_string()
}

/// Top-level bittrainer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerConfig {
    /// Width of generated questions.
    pub bit_width: BitWidth,
    /// Base answers are typed and shown in.
    pub base: NumberBase,
    /// Enabled operations. May contain duplicates until validated.
    /// Defaults to [`default_operations`] for the configured width.
    pub operations: Vec<OperationKind>,
    /// Per-operation override of how operand 2 is drawn.
    pub operand2_domains: BTreeMap<OperationKind, Operand2Domain>,
    /// Number of questions per practice session (None = until quit).
    pub rounds: Option<u32>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            bit_width: BitWidth::default(),
            base: NumberBase::default(),
            operations: default_operations(BitWidth::default()),
            operand2_domains: BTreeMap::new(),
            rounds: None,
        }
    }
}

/// Operations enabled when the config does not list any: the whole catalog,
/// minus `extract-high-byte` below 16 bits where it always yields 0.
pub fn default_operations(bit_width: BitWidth) -> Vec<OperationKind> {
    OperationKind::ALL
        .into_iter()
        .filter(|op| bit_width >= BitWidth::Sixteen || *op != OperationKind::ExtractHighByte)
        .collect()
}

impl TrainerConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            bit_width: self.bit_width,
            operations: self.operations.clone(),
            operand2_domains: self.operand2_domains.clone(),
        }
    }

    /// Build a question generator, failing if no operation is enabled.
    pub fn generator(&self) -> Result<QuestionGenerator, EngineError> {
        QuestionGenerator::new(self.generator_config())
    }
}

/// Parse a config file.
pub fn parse_config(path: &Path) -> Result<TrainerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;

    parse_config_str(&content, path)
}

/// Parse a TOML string into a `TrainerConfig` (useful for testing).
pub fn parse_config_str(content: &str, source_path: &Path) -> Result<TrainerConfig> {
    let parsed: TomlTrainerConfig = toml::from_str(content)
        .with_context(|| format!("failed to parse config: {}", source_path.display()))?;

    let bit_width = BitWidth::try_from(parsed.bit_width)?;
    let base: NumberBase = parsed
        .base
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let operations = match parsed.operations {
        Some(names) => names
            .iter()
            .map(|n| n.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
            .collect::<Result<Vec<OperationKind>>>()?,
        None => default_operations(bit_width),
    };

    let operand2_domains = parsed
        .operand2_domains
        .into_iter()
        .map(|(name, domain)| {
            let kind: OperationKind = name.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
            Ok((kind, domain))
        })
        .collect::<Result<BTreeMap<_, _>>>()?;

    Ok(TrainerConfig {
        bit_width,
        base,
        operations,
        operand2_domains,
        rounds: parsed.rounds,
    })
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `bittrainer.toml` in the current directory
/// 2. `~/.config/bittrainer/config.toml`
///
/// Environment variable overrides (`BITTRAINER_BIT_WIDTH`, `BITTRAINER_BASE`)
/// are applied on top of whatever was loaded.
pub fn load_config_from(path: Option<&Path>) -> Result<TrainerConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from(CONFIG_FILE_NAME);
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            parse_config(&path)?
        }
        None => TrainerConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

    Ok(config)
}

/// Apply `BITTRAINER_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut TrainerConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(width) = lookup("BITTRAINER_BIT_WIDTH") {
        config.bit_width = width
            .parse::<BitWidth>()
            .context("invalid BITTRAINER_BIT_WIDTH")?;
    }
    if let Some(base) = lookup("BITTRAINER_BASE") {
        config.base = base
            .parse::<NumberBase>()
            .map_err(|e: String| anyhow::anyhow!("invalid BITTRAINER_BASE: {}", e))?;
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("bittrainer"))
}

/// A warning from config validation.
#[derive(Debug, Clone)]
pub struct ConfigWarning {
    /// The operation concerned (if applicable).
    pub operation: Option<OperationKind>,
    /// Warning message.
    pub message: String,
}

/// Validate a config for common issues.
pub fn validate_config(config: &TrainerConfig) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.operations.is_empty() {
        warnings.push(ConfigWarning {
            operation: None,
            message: "no operations enabled; questions cannot be generated".into(),
        });
    }

    let mut seen = HashSet::new();
    for op in &config.operations {
        if !seen.insert(*op) {
            warnings.push(ConfigWarning {
                operation: Some(*op),
                message: format!("duplicate operation: {op}"),
            });
        }
    }

    if config.bit_width < BitWidth::Sixteen && seen.contains(&OperationKind::ExtractHighByte) {
        warnings.push(ConfigWarning {
            operation: Some(OperationKind::ExtractHighByte),
            message: format!(
                "operands are only {} bits wide, so the high byte is always 0",
                config.bit_width
            ),
        });
    }

    for (op, domain) in &config.operand2_domains {
        if op.is_unary() {
            warnings.push(ConfigWarning {
                operation: Some(*op),
                message: format!("{op} is unary; the {domain} override for operand 2 is invalid"),
            });
        } else if !seen.contains(op) {
            warnings.push(ConfigWarning {
                operation: Some(*op),
                message: format!("{op} is not enabled; its operand 2 override has no effect"),
            });
        }
    }

    if config.rounds == Some(0) {
        warnings.push(ConfigWarning {
            operation: None,
            message: "rounds is 0; practice sessions will end immediately".into(),
        });
    }

    warnings
}
