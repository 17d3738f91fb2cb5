//! Core data model types for bittrainer.
//!
//! Everything here is value-like: questions and results are created whole
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalog::OperationKind;
use crate::error::EngineError;

/// Number of bits considered significant for a question.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum BitWidth {
    Four,
    #[default]
    Eight,
    Sixteen,
}

impl BitWidth {
    pub const ALL: [BitWidth; 3] = [BitWidth::Four, BitWidth::Eight, BitWidth::Sixteen];

    pub fn bits(self) -> u32 {
        match self {
            BitWidth::Four => 4,
            BitWidth::Eight => 8,
            BitWidth::Sixteen => 16,
        }
    }

    /// All-ones value of this width, e.g. `0xFF` for eight bits.
    pub fn mask(self) -> u32 {
        width_mask(self.bits())
    }

    /// Exclusive upper bound of values representable in this width.
    pub fn limit(self) -> u32 {
        1 << self.bits()
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = EngineError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            4 => Ok(BitWidth::Four),
            8 => Ok(BitWidth::Eight),
            16 => Ok(BitWidth::Sixteen),
            other => Err(EngineError::InvalidConfiguration(format!(
                "unsupported bit width {other} (expected 4, 8 or 16)"
            ))),
        }
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> u32 {
        width.bits()
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

impl FromStr for BitWidth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: u32 = s.trim().parse().map_err(|_| {
            EngineError::InvalidConfiguration(format!("bit width must be a number, got '{s}'"))
        })?;
        BitWidth::try_from(bits)
    }
}

/// All-ones value of `bits` width. Widths of 32 and above saturate.
pub(crate) fn width_mask(bits: u32) -> u32 {
    if bits >= u32::BITS {
        u32::MAX
    } else {
        (1 << bits) - 1
    }
}

/// Base used to read and display numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberBase {
    #[default]
    Binary,
    Decimal,
    Hexadecimal,
}

impl NumberBase {
    pub fn radix(self) -> u32 {
        match self {
            NumberBase::Binary => 2,
            NumberBase::Decimal => 10,
            NumberBase::Hexadecimal => 16,
        }
    }

    /// Literal prefix accepted in front of answers, if the base has one.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            NumberBase::Binary => Some("0b"),
            NumberBase::Decimal => None,
            NumberBase::Hexadecimal => Some("0x"),
        }
    }
}

impl fmt::Display for NumberBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberBase::Binary => write!(f, "binary"),
            NumberBase::Decimal => write!(f, "decimal"),
            NumberBase::Hexadecimal => write!(f, "hexadecimal"),
        }
    }
}

impl FromStr for NumberBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bin" | "binary" | "2" => Ok(NumberBase::Binary),
            "dec" | "decimal" | "10" => Ok(NumberBase::Decimal),
            "hex" | "hexadecimal" | "16" => Ok(NumberBase::Hexadecimal),
            other => Err(format!("unknown number base: {other}")),
        }
    }
}

/// One exercise: an operation applied to one or two operands.
///
/// Operands are always within `[0, 2^bit_width)`. For unary operations
/// `operand2` is zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuestionFields")]
pub struct Question {
    operation: OperationKind,
    operand1: u32,
    operand2: u32,
    bit_width: BitWidth,
}

#[derive(Deserialize)]
struct QuestionFields {
    operation: OperationKind,
    operand1: u32,
    #[serde(default)]
    operand2: u32,
    bit_width: BitWidth,
}

impl TryFrom<QuestionFields> for Question {
    type Error = EngineError;

    fn try_from(f: QuestionFields) -> Result<Self, Self::Error> {
        Question::new(f.operation, f.operand1, f.operand2, f.bit_width)
    }
}

impl Question {
    /// Build a question, checking that both operands fit in `bit_width`.
    ///
    /// `operand2` is ignored (stored as zero) for unary operations.
    pub fn new(
        operation: OperationKind,
        operand1: u32,
        operand2: u32,
        bit_width: BitWidth,
    ) -> Result<Self, EngineError> {
        let limit = bit_width.limit();
        if operand1 >= limit {
            return Err(EngineError::InvalidConfiguration(format!(
                "operand {operand1} does not fit in {bit_width} bits"
            )));
        }
        let operand2 = if operation.is_unary() {
            0
        } else if operand2 >= limit {
            return Err(EngineError::InvalidConfiguration(format!(
                "operand {operand2} does not fit in {bit_width} bits"
            )));
        } else {
            operand2
        };
        Ok(Self {
            operation,
            operand1,
            operand2,
            bit_width,
        })
    }

    /// Build a question from operands already known to be in range.
    pub(crate) fn from_parts(
        operation: OperationKind,
        operand1: u32,
        operand2: u32,
        bit_width: BitWidth,
    ) -> Self {
        debug_assert!(operand1 < bit_width.limit() && operand2 < bit_width.limit());
        Self {
            operation,
            operand1,
            operand2,
            bit_width,
        }
    }

    pub fn operation(&self) -> OperationKind {
        self.operation
    }

    pub fn operand1(&self) -> u32 {
        self.operand1
    }

    pub fn operand2(&self) -> u32 {
        self.operand2
    }

    pub fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    /// `operand2` reduced modulo the bit width, as bit-index and shift
    /// operations use it.
    pub fn bit_index(&self) -> u32 {
        self.operand2 % self.bit_width.bits()
    }

    /// The canonical answer.
    pub fn correct_value(&self) -> u32 {
        self.operation.apply(self.operand1, self.operand2, self.bit_width)
    }

    /// Width in bits that the canonical answer is formatted and parsed in.
    pub fn result_width(&self) -> u32 {
        self.operation.result_width(self.bit_width)
    }
}

/// Verdict on one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// The canonical answer.
    pub correct_value: u32,
    /// The parsed answer, or `None` if the text could not be parsed.
    pub submitted: Option<u32>,
    pub is_correct: bool,
    /// Human-readable reasoning for the canonical answer.
    pub explanation: String,
}

impl EvaluationResult {
    pub fn was_parsed(&self) -> bool {
        self.submitted.is_some()
    }
}
