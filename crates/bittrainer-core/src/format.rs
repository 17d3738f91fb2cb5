//! Number formatting and answer parsing.
//!
//! [`format_value`] and [`parse_value`] round-trip for every value that fits
//! in the given width.

use crate::error::{EngineError, ParseFailure};
use crate::model::{width_mask, NumberBase};

/// Format `value` in `base`, padded for a `bits`-wide value.
///
/// Binary is zero-padded to `bits` digits, hexadecimal is uppercase and
/// zero-padded to `ceil(bits / 4)` digits, decimal is unpadded.
pub fn format_value(value: u32, base: NumberBase, bits: u32) -> String {
    let width = bits as usize;
    match base {
        NumberBase::Binary => format!("{value:0width$b}"),
        NumberBase::Decimal => value.to_string(),
        NumberBase::Hexadecimal => format!("{value:0w$X}", w = width.div_ceil(4)),
    }
}

/// Parse an answer written in `base` that must fit in `bits` bits.
///
/// Surrounding whitespace is ignored, as are `_` separators and a `0b` /
/// `0x` prefix matching the base. Anything else that is not a digit of the
/// base is rejected; empty input is never read as zero.
pub fn parse_value(raw: &str, base: NumberBase, bits: u32) -> Result<u32, EngineError> {
    let fail = |reason| EngineError::Parse {
        input: raw.to_string(),
        base,
        reason,
    };

    let mut digits = raw.trim();
    if let Some(prefix) = base.prefix() {
        if digits
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        {
            digits = &digits[prefix.len()..];
        }
    }

    let radix = base.radix();
    let mut value: u64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c
            .to_digit(radix)
            .ok_or_else(|| fail(ParseFailure::InvalidDigit(c)))?;
        seen_digit = true;
        value = value
            .saturating_mul(u64::from(radix))
            .saturating_add(u64::from(d));
    }

    if !seen_digit {
        return Err(fail(ParseFailure::Empty));
    }
    if value > u64::from(width_mask(bits)) {
        return Err(fail(ParseFailure::OutOfRange { width: bits }));
    }
    Ok(value as u32)
}
