//! The `bittrainer practice` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use bittrainer_core::config::{load_config_from, validate_config};
use bittrainer_core::{evaluate, BitWidth, NumberBase, QuestionGenerator, Session};

use crate::render;

pub fn execute(
    width: Option<u32>,
    base: Option<String>,
    ops: Option<String>,
    rounds: Option<u32>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let mut config = load_config_from(config_path.as_deref())?;

    // Command-line flags win over the config file
    if let Some(w) = width {
        config.bit_width = BitWidth::try_from(w)?;
    }
    if let Some(b) = &base {
        config.base = b.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?;
    }
    if let Some(list) = &ops {
        config.operations = parse_op_list(list)?;
    }
    if rounds.is_some() {
        config.rounds = rounds;
    }

    for w in validate_config(&config) {
        tracing::warn!("config: {}", w.message);
    }

    let generator = config.generator()?;
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = run_session(
        &generator,
        config.base,
        config.rounds,
        &mut rng,
        stdin.lock(),
        stdout.lock(),
    )?;

    print_summary(&session);
    Ok(())
}

/// Parse a comma-separated operation list.
pub fn parse_op_list(list: &str) -> Result<Vec<bittrainer_core::OperationKind>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .collect()
}

/// Ask questions until `rounds` are answered, the input ends, or the user
/// types `q`.
pub fn run_session<R, I, O>(
    generator: &QuestionGenerator,
    base: NumberBase,
    rounds: Option<u32>,
    rng: &mut R,
    input: I,
    mut output: O,
) -> Result<Session>
where
    R: Rng + ?Sized,
    I: BufRead,
    O: Write,
{
    let mut session = Session::new();
    let mut lines = input.lines();

    while rounds.map_or(true, |r| session.total() < r) {
        let question = generator.next(rng);
        writeln!(output, "\nQuestion {}:", session.total() + 1)?;
        writeln!(output, "{}", render::question(&question, base))?;
        write!(output, "Answer ({base}): ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
            break;
        }

        let result = evaluate(&question, &line, base);
        writeln!(output, "{}", render::feedback(&question, &result, base))?;
        session.record(question, result);
        writeln!(output, "Score: {}/{}", session.correct(), session.total())?;
    }

    Ok(session)
}

fn print_summary(session: &Session) {
    use comfy_table::{Cell, Table};

    println!(
        "\nSession complete: {}/{} correct ({:.1}%), best streak {}",
        session.correct(),
        session.total(),
        session.accuracy() * 100.0,
        session.best_streak()
    );
    if session.total() == 0 {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Operation", "Correct", "Total", "Accuracy"]);
    for (op, tally) in session.per_operation() {
        table.add_row(vec![
            Cell::new(op.name()),
            Cell::new(tally.correct),
            Cell::new(tally.total),
            Cell::new(format!("{:.1}%", tally.accuracy() * 100.0)),
        ]);
    }
    println!("{table}");

    let unparsed = session.unparsed();
    if unparsed > 0 {
        println!("{unparsed} answer(s) could not be parsed.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bittrainer_core::{format_value, GeneratorConfig, OperationKind};
    use std::io::Cursor;

    fn generator() -> QuestionGenerator {
        QuestionGenerator::new(GeneratorConfig {
            bit_width: BitWidth::Four,
            operations: vec![OperationKind::And, OperationKind::Not],
            operand2_domains: Default::default(),
        })
        .unwrap()
    }

    #[test]
    fn answers_every_round_correctly() {
        let generator = generator();
        let mut replay = ChaCha8Rng::seed_from_u64(9);
        let answers: String = (0..3)
            .map(|_| {
                let q = generator.next(&mut replay);
                format_value(q.correct_value(), NumberBase::Binary, q.result_width()) + "\n"
            })
            .collect();

        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut out = Vec::new();
        let session = run_session(
            &generator,
            NumberBase::Binary,
            Some(3),
            &mut rng,
            Cursor::new(answers),
            &mut out,
        )
        .unwrap();

        assert_eq!(session.correct(), 3);
        assert_eq!(session.total(), 3);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Score: 3/3"));
        assert!(!text.contains("Question 4"));
    }

    #[test]
    fn quit_stops_without_recording() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let session = run_session(
            &generator(),
            NumberBase::Binary,
            None,
            &mut rng,
            Cursor::new("xyz\nq\n1111\n"),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(session.total(), 1);
        assert_eq!(session.unparsed(), 1);
    }

    #[test]
    fn quit_is_case_insensitive() {
        for input in ["Q\n", "Quit\n", "  QUIT  \n"] {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            let session = run_session(
                &generator(),
                NumberBase::Binary,
                None,
                &mut rng,
                Cursor::new(input),
                Vec::new(),
            )
            .unwrap();
            assert_eq!(session.total(), 0, "{input:?} should end the session");
        }
    }

    #[test]
    fn end_of_input_ends_session() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let session = run_session(
            &generator(),
            NumberBase::Decimal,
            None,
            &mut rng,
            Cursor::new(""),
            Vec::new(),
        )
        .unwrap();
        assert_eq!(session.total(), 0);
    }

    #[test]
    fn zero_rounds_asks_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut out = Vec::new();
        run_session(
            &generator(),
            NumberBase::Binary,
            Some(0),
            &mut rng,
            Cursor::new("1\n"),
            &mut out,
        )
        .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn op_list_parsing() {
        assert_eq!(
            parse_op_list("and, shl,,set-bit").unwrap(),
            vec![
                OperationKind::And,
                OperationKind::LeftShift,
                OperationKind::SetBit
            ]
        );
        assert!(parse_op_list("and,rotate").is_err());
    }
}
