//! Plain-text rendering of questions and feedback.

use bittrainer_core::{format_value, EvaluationResult, NumberBase, OperationKind, Question};

/// Render a question as a few indented lines.
pub fn question(q: &Question, base: NumberBase) -> String {
    let op = q.operation();
    let info = op.info();
    let bits = q.bit_width().bits();
    let fmt = |v: u32| format_value(v, base, bits);

    let mut out = format!("{} ({}-bit): {}\n", info.name, bits, info.description);
    match op {
        OperationKind::CombineBytes => {
            out.push_str(&format!("  high_byte = {}\n", fmt(q.operand1())));
            out.push_str(&format!("  low_byte  = {}", fmt(q.operand2())));
        }
        OperationKind::Mask => {
            out.push_str(&format!("  value = {}\n", fmt(q.operand1())));
            out.push_str(&format!("  mask  = {}", fmt(q.operand2())));
        }
        OperationKind::LeftShift | OperationKind::RightShift => {
            out.push_str(&format!("  value = {}\n", fmt(q.operand1())));
            out.push_str(&format!("  n     = {}", q.operand2()));
        }
        OperationKind::SetBit
        | OperationKind::ClearBit
        | OperationKind::ToggleBit
        | OperationKind::CheckBitSet => {
            out.push_str(&format!("  value        = {}\n", fmt(q.operand1())));
            out.push_str(&format!("  bit_position = {}", q.operand2()));
        }
        _ if op.is_unary() => {
            out.push_str(&format!("  value = {}", fmt(q.operand1())));
        }
        _ => {
            out.push_str(&format!("  a = {}\n", fmt(q.operand1())));
            out.push_str(&format!("  b = {}", fmt(q.operand2())));
        }
    }
    out
}

/// Render the verdict line(s) for an evaluated answer.
pub fn feedback(q: &Question, result: &EvaluationResult, base: NumberBase) -> String {
    if result.is_correct {
        "Correct!".to_string()
    } else if !result.was_parsed() {
        result.explanation.clone()
    } else {
        format!(
            "Incorrect. The correct answer is {}.\n{}",
            format_value(result.correct_value, base, q.result_width()),
            result.explanation
        )
    }
}
