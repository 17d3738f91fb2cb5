//! The `bittrainer explain` command.

use anyhow::{Context, Result};

use bittrainer_core::{
    explain, format_value, parse_value, BitWidth, NumberBase, OperationKind, Question,
};

use crate::render;

pub fn execute(
    op: String,
    a: String,
    b: Option<String>,
    width: u32,
    base: String,
    json: bool,
) -> Result<()> {
    let operation: OperationKind = op.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    let bit_width = BitWidth::try_from(width)?;
    let base: NumberBase = base.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;

    let operand1 = parse_operand(&a).context("invalid operand --a")?;
    let operand2 = match &b {
        Some(raw) => parse_operand(raw).context("invalid operand --b")?,
        None if operation.is_unary() => 0,
        None => anyhow::bail!("{operation} needs a second operand (--b)"),
    };

    let question = Question::new(operation, operand1, operand2, bit_width)?;
    let answer = format_value(question.correct_value(), base, question.result_width());
    let explanation = explain(&question, base);

    if json {
        let out = serde_json::json!({
            "question": question,
            "correct_value": question.correct_value(),
            "answer": answer,
            "explanation": explanation,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", render::question(&question, base));
        println!("Answer: {answer}");
        println!("{explanation}");
    }

    Ok(())
}

/// Parse an operand written in decimal, or in binary/hex with a prefix.
fn parse_operand(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let lower = trimmed.to_ascii_lowercase();
    let base = if lower.starts_with("0b") {
        NumberBase::Binary
    } else if lower.starts_with("0x") {
        NumberBase::Hexadecimal
    } else {
        NumberBase::Decimal
    };
    Ok(parse_value(trimmed, base, u32::BITS)?)
}
