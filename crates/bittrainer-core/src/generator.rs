//! Randomized question generation.
//!
//! The generator holds no mutable state. All randomness comes from the
//! `rand::Rng` the caller passes in, so a seeded RNG reproduces the same
//! question sequence.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::{Operand2Domain, OperationKind};
use crate::error::EngineError;
use crate::model::{BitWidth, Question};

/// Configuration for the question generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Width of every generated question.
    pub bit_width: BitWidth,
    /// Operations to draw from. Duplicates are ignored.
    pub operations: Vec<OperationKind>,
    /// Per-operation override of how the second operand is drawn.
    #[serde(default)]
    pub operand2_domains: BTreeMap<OperationKind, Operand2Domain>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            bit_width: BitWidth::default(),
            operations: OperationKind::ALL.to_vec(),
            operand2_domains: BTreeMap::new(),
        }
    }
}

/// Draws questions from a validated configuration.
#[derive(Debug, Clone)]
pub struct QuestionGenerator {
    bit_width: BitWidth,
    operations: Vec<OperationKind>,
    operand2_domains: BTreeMap<OperationKind, Operand2Domain>,
}

impl QuestionGenerator {
    /// Validate `config` and build a generator.
    ///
    /// Fails with `InvalidConfiguration` if no operation is enabled or an
    /// operand-2 override names a unary operation.
    pub fn new(config: GeneratorConfig) -> Result<Self, EngineError> {
        let mut operations = config.operations;
        operations.sort_unstable();
        operations.dedup();

        if operations.is_empty() {
            return Err(EngineError::InvalidConfiguration(
                "no operations enabled".into(),
            ));
        }

        if let Some(kind) = config.operand2_domains.keys().find(|k| k.is_unary()) {
            return Err(EngineError::InvalidConfiguration(format!(
                "'{kind}' is unary and has no second operand"
            )));
        }

        Ok(Self {
            bit_width: config.bit_width,
            operations,
            operand2_domains: config.operand2_domains,
        })
    }

    pub fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    /// Enabled operations in catalog order.
    pub fn operations(&self) -> &[OperationKind] {
        &self.operations
    }

    /// Effective domain of the second operand for `kind`.
    pub fn operand2_domain(&self, kind: OperationKind) -> Option<Operand2Domain> {
        let default = kind.operand2_domain()?;
        Some(self.operand2_domains.get(&kind).copied().unwrap_or(default))
    }

    /// Draw a fresh question.
    ///
    /// The operation is picked first, then operand 1, then operand 2 (only
    /// for binary operations).
    pub fn next<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
        let operation = self.operations[rng.gen_range(0..self.operations.len())];
        let limit = self.bit_width.limit();
        let operand1 = rng.gen_range(0..limit);
        let operand2 = match self.operand2_domain(operation) {
            None => 0,
            Some(Operand2Domain::BitIndex) => rng.gen_range(0..self.bit_width.bits()),
            Some(Operand2Domain::Value) => rng.gen_range(0..limit),
        };

        tracing::debug!(
            %operation,
            operand1,
            operand2,
            bit_width = self.bit_width.bits(),
            "generated question"
        );

        Question::from_parts(operation, operand1, operand2, self.bit_width)
    }
}

/// Draw one question from `enabled` at `bit_width` using default operand
/// domains.
pub fn next_question<R: Rng + ?Sized>(
    bit_width: BitWidth,
    enabled: &[OperationKind],
    rng: &mut R,
) -> Result<Question, EngineError> {
    let generator = QuestionGenerator::new(GeneratorConfig {
        bit_width,
        operations: enabled.to_vec(),
        operand2_domains: BTreeMap::new(),
    })?;
    Ok(generator.next(rng))
}
