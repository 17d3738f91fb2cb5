//! Answer evaluation and explanations.

use std::fmt::Write;

use crate::catalog::OperationKind;
use crate::error::EngineError;
use crate::format::{format_value, parse_value};
use crate::model::{EvaluationResult, NumberBase, Question};

/// Judge `raw_answer`, written in `base`, against the canonical answer.
///
/// Unparseable input is reported as an incorrect answer with
/// `submitted: None`; it is never read as zero.
pub fn evaluate(question: &Question, raw_answer: &str, base: NumberBase) -> EvaluationResult {
    let correct_value = question.correct_value();
    let result_width = question.result_width();
    let reasoning = explain(question, base);

    match parse_value(raw_answer, base, result_width) {
        Ok(submitted) => {
            let is_correct = submitted == correct_value;
            tracing::debug!(
                operation = %question.operation(),
                submitted,
                correct_value,
                is_correct,
                "evaluated answer"
            );
            EvaluationResult {
                correct_value,
                submitted: Some(submitted),
                is_correct,
                explanation: reasoning,
            }
        }
        Err(e) => {
            tracing::debug!(operation = %question.operation(), error = %e, "unparseable answer");
            let reason = match &e {
                EngineError::Parse { reason, .. } => reason.to_string(),
                other => other.to_string(),
            };
            EvaluationResult {
                correct_value,
                submitted: None,
                is_correct: false,
                explanation: format!(
                    "Could not parse '{}' as a {base} number ({reason}). \
                     The correct answer is {}.\n{reasoning}",
                    raw_answer.trim(),
                    format_value(correct_value, base, result_width)
                ),
            }
        }
    }
}

/// Explain why the canonical answer is correct, formatting values in `base`.
pub fn explain(question: &Question, base: NumberBase) -> String {
    let op = question.operation();
    let bits = question.bit_width().bits();
    let a = question.operand1();
    let b = question.operand2();
    let result = question.correct_value();
    let fmt = |v: u32| format_value(v, base, bits);
    let fmt_result = format_value(result, base, question.result_width());

    match op {
        OperationKind::And | OperationKind::Or | OperationKind::Xor => {
            let symbol = op.info().symbol;
            let mut out = format!("{} {symbol} {} = {fmt_result}", fmt(a), fmt(b));
            for i in (0..bits).rev() {
                let _ = write!(
                    out,
                    "\nbit {i}: {} {symbol} {} = {}",
                    bit(a, i),
                    bit(b, i),
                    bit(result, i)
                );
            }
            out
        }
        OperationKind::Not => {
            let mut out = format!("~{} = {fmt_result}", fmt(a));
            for i in (0..bits).rev() {
                let _ = write!(out, "\nbit {i}: ~{} = {}", bit(a, i), bit(result, i));
            }
            out
        }
        OperationKind::LeftShift | OperationKind::RightShift => {
            let n = question.bit_index();
            let factor = 1u32 << n;
            let amount = format!("shift amount {b} mod {bits} = {n}");
            if op == OperationKind::LeftShift {
                format!(
                    "{} << {n} = {fmt_result}: {amount}; shifting left by {n} multiplies by \
                     2^{n} = {factor}, keeping only the low {bits} bits.",
                    fmt(a)
                )
            } else {
                format!(
                    "{} >> {n} = {fmt_result}: {amount}; shifting right by {n} divides by \
                     2^{n} = {factor}, discarding the remainder.",
                    fmt(a)
                )
            }
        }
        OperationKind::SetBit | OperationKind::ClearBit | OperationKind::ToggleBit => {
            let n = question.bit_index();
            let verb = match op {
                OperationKind::SetBit => "Setting",
                OperationKind::ClearBit => "Clearing",
                _ => "Toggling",
            };
            format!(
                "{verb} bit {n} ({b} mod {bits} = {n}) of {} gives {fmt_result}; \
                 bit {n} goes from {} to {}.",
                fmt(a),
                bit(a, n),
                bit(result, n)
            )
        }
        OperationKind::CheckBitSet => {
            let n = question.bit_index();
            let state = if result == 1 { "set" } else { "clear" };
            format!(
                "Bit {n} ({b} mod {bits} = {n}) of {} is {state}, so the answer is {fmt_result}.",
                fmt(a)
            )
        }
        _ => {
            let info = op.info();
            let operands = match op {
                OperationKind::Mask => format!("value = {}, mask = {}", fmt(a), fmt(b)),
                OperationKind::CombineBytes => {
                    format!("high_byte = {}, low_byte = {}", fmt(a), fmt(b))
                }
                _ => format!("value = {}", fmt(a)),
            };
            format!(
                "{}: {} with {operands} gives {fmt_result}.",
                info.name, info.description
            )
        }
    }
}

fn bit(value: u32, index: u32) -> u32 {
    (value >> index) & 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BitWidth;

    fn question(op: OperationKind, a: u32, b: u32, bits: u32) -> Question {
        Question::new(op, a, b, BitWidth::try_from(bits).unwrap()).unwrap()
    }

    #[test]
    fn and_scenario() {
        let q = question(OperationKind::And, 0b1010, 0b1100, 4);
        let result = evaluate(&q, "1000", NumberBase::Binary);
        assert_eq!(result.correct_value, 8);
        assert!(result.is_correct);
        assert_eq!(result.submitted, Some(8));
    }

    #[test]
    fn left_shift_scenario() {
        let q = question(OperationKind::LeftShift, 0b1010, 2, 4);
        let result = evaluate(&q, "8", NumberBase::Decimal);
        assert_eq!(result.correct_value, 8);
        assert!(result.is_correct);
        assert!(result.explanation.contains("multiplies by 2^2 = 4"));
    }

    #[test]
    fn set_bit_scenario() {
        let q = question(OperationKind::SetBit, 170, 2, 8);
        let result = evaluate(&q, "AE", NumberBase::Hexadecimal);
        assert_eq!(result.correct_value, 174);
        assert!(result.is_correct);
        assert!(result.explanation.contains("Setting bit 2"));
        assert!(result.explanation.contains("from 0 to 1"));
    }

    #[test]
    fn set_bit_already_set_is_unchanged() {
        let q = question(OperationKind::SetBit, 170, 3, 8);
        let result = evaluate(&q, "10101010", NumberBase::Binary);
        assert_eq!(result.correct_value, 170);
        assert!(result.is_correct);
        assert!(result.explanation.contains("from 1 to 1"));
    }

    #[test]
    fn invalid_binary_digit_is_incorrect_not_zero() {
        let q = question(OperationKind::And, 0b1010, 0b0101, 4);
        assert_eq!(q.correct_value(), 0);
        let result = evaluate(&q, "2", NumberBase::Binary);
        assert!(!result.is_correct);
        assert_eq!(result.submitted, None);
        assert!(result.explanation.starts_with("Could not parse"));
        assert!(result.explanation.contains("The correct answer is 0000."));
    }

    #[test]
    fn empty_answer_is_incorrect_even_when_answer_is_zero() {
        let q = question(OperationKind::IsPowerOfTwo, 0, 0, 8);
        let result = evaluate(&q, "", NumberBase::Decimal);
        assert!(!result.is_correct);
        assert!(!result.was_parsed());
    }

    #[test]
    fn wrong_answer_keeps_submitted_value() {
        let q = question(OperationKind::Xor, 3, 5, 4);
        let result = evaluate(&q, "7", NumberBase::Decimal);
        assert!(!result.is_correct);
        assert_eq!(result.submitted, Some(7));
        assert_eq!(result.correct_value, 6);
    }

    #[test]
    fn out_of_range_answer_is_a_parse_failure() {
        let q = question(OperationKind::Or, 1, 2, 4);
        let result = evaluate(&q, "10011", NumberBase::Binary);
        assert_eq!(result.submitted, None);
    }

    #[test]
    fn combine_bytes_accepts_sixteen_bit_answer_at_narrow_width() {
        let q = question(OperationKind::CombineBytes, 0x12, 0x34, 8);
        let result = evaluate(&q, "0x1234", NumberBase::Hexadecimal);
        assert!(result.is_correct);
        assert_eq!(
            result.explanation,
            "Combine bytes: combined = (high_byte << 8) | low_byte with high_byte = 12, \
             low_byte = 34 gives 1234."
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let q = question(OperationKind::ToggleBit, 0xBEEF, 21, 16);
        for raw in ["0xBEEF", "nonsense", ""] {
            assert_eq!(
                evaluate(&q, raw, NumberBase::Hexadecimal),
                evaluate(&q, raw, NumberBase::Hexadecimal)
            );
        }
    }

    #[test]
    fn logical_explanation_lists_every_bit() {
        let q = question(OperationKind::Xor, 0b1010, 0b0110, 4);
        let text = explain(&q, NumberBase::Binary);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1010 ^ 0110 = 1100");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1], "bit 3: 1 ^ 0 = 1");
        assert_eq!(lines[4], "bit 0: 0 ^ 0 = 0");
    }

    #[test]
    fn not_explanation_lists_every_bit() {
        let q = question(OperationKind::Not, 0b0011, 0, 4);
        let text = explain(&q, NumberBase::Binary);
        assert!(text.starts_with("~0011 = 1100"));
        assert!(text.contains("bit 0: ~1 = 0"));
    }

    #[test]
    fn shift_explanation_names_reduced_amount() {
        let q = question(OperationKind::RightShift, 200, 10, 8);
        let text = explain(&q, NumberBase::Decimal);
        assert!(text.contains("shift amount 10 mod 8 = 2"));
        assert!(text.contains("divides by 2^2 = 4"));
    }

    #[test]
    fn check_bit_explanation_states_bit() {
        let q = question(OperationKind::CheckBitSet, 0b0100, 2, 4);
        let text = explain(&q, NumberBase::Decimal);
        assert_eq!(text, "Bit 2 (2 mod 4 = 2) of 4 is set, so the answer is 1.");
    }

    #[test]
    fn unary_restatement() {
        let q = question(OperationKind::DivideBy4, 103, 0, 8);
        assert_eq!(
            explain(&q, NumberBase::Decimal),
            "Divide by 4: value >>= 2 with value = 103 gives 25."
        );
    }
}
