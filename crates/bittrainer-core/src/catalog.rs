//! The operation catalog.
//!
//! A fixed, ordered table of every supported bitwise operation with its
//! display metadata and its evaluation formula. All formulas are total over
//! in-range operands.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::BitWidth;

/// A supported bitwise operation.
///
/// Declaration order is catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    And,
    Or,
    Xor,
    Not,
    LeftShift,
    RightShift,
    SetBit,
    ClearBit,
    ToggleBit,
    CheckBitSet,
    Mask,
    CombineBytes,
    ExtractLowByte,
    ExtractHighByte,
    #[serde(rename = "multiply-by-8")]
    MultiplyBy8,
    #[serde(rename = "divide-by-4")]
    DivideBy4,
    IsPowerOfTwo,
}

/// How many operands an operation reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arity {
    Unary,
    Binary,
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Unary => write!(f, "unary"),
            Arity::Binary => write!(f, "binary"),
        }
    }
}

/// How the second operand of a binary operation is drawn and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operand2Domain {
    /// A bit position in `[0, bit_width)`.
    BitIndex,
    /// A free value in `[0, 2^bit_width)`: a mask, a byte, or a shift count.
    Value,
}

impl fmt::Display for Operand2Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand2Domain::BitIndex => write!(f, "bit-index"),
            Operand2Domain::Value => write!(f, "value"),
        }
    }
}

/// Fixed metadata for one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationInfo {
    pub kind: OperationKind,
    /// Stable identifier used in config files and on the command line.
    pub id: &'static str,
    pub name: &'static str,
    pub symbol: &'static str,
    pub description: &'static str,
    /// Domain of the second operand; `None` for unary operations.
    pub operand2: Option<Operand2Domain>,
}

impl OperationInfo {
    pub fn arity(&self) -> Arity {
        match self.operand2 {
            Some(_) => Arity::Binary,
            None => Arity::Unary,
        }
    }
}

const fn entry(
    kind: OperationKind,
    id: &'static str,
    name: &'static str,
    symbol: &'static str,
    description: &'static str,
    operand2: Option<Operand2Domain>,
) -> OperationInfo {
    OperationInfo {
        kind,
        id,
        name,
        symbol,
        description,
        operand2,
    }
}

use Operand2Domain::{BitIndex, Value};

/// The catalog, indexed by `OperationKind as usize`.
pub const CATALOG: [OperationInfo; 17] = [
    entry(OperationKind::And, "and", "AND", "&", "result = a & b", Some(Value)),
    entry(OperationKind::Or, "or", "OR", "|", "result = a | b", Some(Value)),
    entry(OperationKind::Xor, "xor", "XOR", "^", "result = a ^ b", Some(Value)),
    entry(OperationKind::Not, "not", "NOT", "~", "result = ~value", None),
    entry(
        OperationKind::LeftShift,
        "left-shift",
        "Left shift",
        "<<",
        "result = value << n",
        Some(Value),
    ),
    entry(
        OperationKind::RightShift,
        "right-shift",
        "Right shift",
        ">>",
        "result = value >> n",
        Some(Value),
    ),
    entry(
        OperationKind::SetBit,
        "set-bit",
        "Set bit",
        "|= 1 <<",
        "value |= (1 << bit_position)",
        Some(BitIndex),
    ),
    entry(
        OperationKind::ClearBit,
        "clear-bit",
        "Clear bit",
        "&= ~(1 <<)",
        "value &= ~(1 << bit_position)",
        Some(BitIndex),
    ),
    entry(
        OperationKind::ToggleBit,
        "toggle-bit",
        "Toggle bit",
        "^= 1 <<",
        "value ^= (1 << bit_position)",
        Some(BitIndex),
    ),
    entry(
        OperationKind::CheckBitSet,
        "check-bit-set",
        "Check if bit is set",
        "& (1 <<)",
        "if (value & (1 << bit_position))",
        Some(BitIndex),
    ),
    entry(
        OperationKind::Mask,
        "mask",
        "Mask",
        "& mask",
        "masked_value = value & mask",
        Some(Value),
    ),
    entry(
        OperationKind::CombineBytes,
        "combine-bytes",
        "Combine bytes",
        "<< 8 |",
        "combined = (high_byte << 8) | low_byte",
        Some(Value),
    ),
    entry(
        OperationKind::ExtractLowByte,
        "extract-low-byte",
        "Extract low byte",
        "& 0xFF",
        "low_byte = value & 0xFF",
        None,
    ),
    entry(
        OperationKind::ExtractHighByte,
        "extract-high-byte",
        "Extract high byte",
        ">> 8 & 0xFF",
        "high_byte = (value >> 8) & 0xFF",
        None,
    ),
    entry(
        OperationKind::MultiplyBy8,
        "multiply-by-8",
        "Multiply by 8",
        "<<= 3",
        "value <<= 3",
        None,
    ),
    entry(
        OperationKind::DivideBy4,
        "divide-by-4",
        "Divide by 4",
        ">>= 2",
        "value >>= 2",
        None,
    ),
    entry(
        OperationKind::IsPowerOfTwo,
        "is-power-of-two",
        "Check if power of 2",
        "& (v - 1)",
        "if (value != 0 && (value & (value - 1)) == 0)",
        None,
    ),
];

impl OperationKind {
    /// Every operation, in catalog order.
    pub const ALL: [OperationKind; 17] = [
        OperationKind::And,
        OperationKind::Or,
        OperationKind::Xor,
        OperationKind::Not,
        OperationKind::LeftShift,
        OperationKind::RightShift,
        OperationKind::SetBit,
        OperationKind::ClearBit,
        OperationKind::ToggleBit,
        OperationKind::CheckBitSet,
        OperationKind::Mask,
        OperationKind::CombineBytes,
        OperationKind::ExtractLowByte,
        OperationKind::ExtractHighByte,
        OperationKind::MultiplyBy8,
        OperationKind::DivideBy4,
        OperationKind::IsPowerOfTwo,
    ];

    pub fn info(self) -> &'static OperationInfo {
        &CATALOG[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.info().id
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn arity(self) -> Arity {
        self.info().arity()
    }

    pub fn is_unary(self) -> bool {
        self.arity() == Arity::Unary
    }

    /// Default domain of the second operand; `None` for unary operations.
    pub fn operand2_domain(self) -> Option<Operand2Domain> {
        self.info().operand2
    }

    /// Apply the operation to `a` and `b` at the given width.
    ///
    /// `b` is ignored by unary operations. Bit positions and shift counts
    /// are taken modulo the width. CombineBytes and ExtractHighByte work on
    /// 8-bit bytes regardless of `width`.
    pub fn apply(self, a: u32, b: u32, width: BitWidth) -> u32 {
        let bits = width.bits();
        let mask = width.mask();
        let n = b % bits;
        let bit = 1u32 << n;
        match self {
            OperationKind::And | OperationKind::Mask => a & b,
            OperationKind::Or => a | b,
            OperationKind::Xor => a ^ b,
            OperationKind::Not => !a & mask,
            OperationKind::LeftShift => (a << n) & mask,
            OperationKind::RightShift => a >> n,
            OperationKind::SetBit => a | bit,
            OperationKind::ClearBit => a & !bit,
            OperationKind::ToggleBit => a ^ bit,
            OperationKind::CheckBitSet => u32::from((a & bit) != 0),
            OperationKind::CombineBytes => ((a << 8) | b) & 0xFFFF,
            OperationKind::ExtractLowByte => a & 0xFF,
            OperationKind::ExtractHighByte => (a >> 8) & 0xFF,
            OperationKind::MultiplyBy8 => (a << 3) & mask,
            OperationKind::DivideBy4 => a >> 2,
            OperationKind::IsPowerOfTwo => u32::from(a.is_power_of_two()),
        }
    }

    /// Width in bits of this operation's result at the given width.
    pub fn result_width(self, width: BitWidth) -> u32 {
        match self {
            OperationKind::CombineBytes => 16,
            OperationKind::ExtractHighByte => width.bits().max(8),
            _ => width.bits(),
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for OperationKind {
    type Err = String;

    /// Accepts catalog ids and a few aliases, ignoring case, `-`, `_` and
    /// spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        let kind = match key.as_str() {
            "and" => OperationKind::And,
            "or" => OperationKind::Or,
            "xor" => OperationKind::Xor,
            "not" => OperationKind::Not,
            "leftshift" | "shl" => OperationKind::LeftShift,
            "rightshift" | "shr" => OperationKind::RightShift,
            "setbit" => OperationKind::SetBit,
            "clearbit" => OperationKind::ClearBit,
            "togglebit" => OperationKind::ToggleBit,
            "checkbitset" | "checkbit" => OperationKind::CheckBitSet,
            "mask" => OperationKind::Mask,
            "combinebytes" => OperationKind::CombineBytes,
            "extractlowbyte" => OperationKind::ExtractLowByte,
            "extracthighbyte" => OperationKind::ExtractHighByte,
            "multiplyby8" | "multiplybyeight" => OperationKind::MultiplyBy8,
            "divideby4" | "dividebyfour" => OperationKind::DivideBy4,
            "ispoweroftwo" | "ispowerof2" => OperationKind::IsPowerOfTwo,
            _ => return Err(format!("unknown operation: {s}")),
        };
        Ok(kind)
    }
}
