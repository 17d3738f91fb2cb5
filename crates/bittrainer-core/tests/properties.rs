//! Property tests over the whole operation catalog.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use bittrainer_core::{
    evaluate, format_value, next_question, parse_value, BitWidth, EngineError, NumberBase,
    OperationKind, Question,
};

fn bit_width() -> impl Strategy<Value = BitWidth> {
    prop::sample::select(BitWidth::ALL.to_vec())
}

fn operation() -> impl Strategy<Value = OperationKind> {
    prop::sample::select(OperationKind::ALL.to_vec())
}

fn base() -> impl Strategy<Value = NumberBase> {
    prop::sample::select(vec![
        NumberBase::Binary,
        NumberBase::Decimal,
        NumberBase::Hexadecimal,
    ])
}

/// A width together with two operands that fit in it.
fn sized_operands() -> impl Strategy<Value = (BitWidth, u32, u32)> {
    bit_width().prop_flat_map(|w| (Just(w), 0..w.limit(), 0..w.limit()))
}

proptest! {
    #[test]
    fn results_stay_within_their_range(op in operation(), (w, a, b) in sized_operands()) {
        let result = op.apply(a, b, w);
        match op {
            OperationKind::CombineBytes => prop_assert!(result <= 0xFFFF),
            OperationKind::ExtractHighByte => prop_assert!(result <= 0xFF),
            _ => prop_assert!(result < w.limit(), "{op} gave {result} at width {w}"),
        }
    }

    #[test]
    fn format_parse_roundtrip(b in base(), (w, v, _) in sized_operands()) {
        let text = format_value(v, b, w.bits());
        prop_assert_eq!(parse_value(&text, b, w.bits()).unwrap(), v);
    }

    #[test]
    fn binary_and_hex_have_fixed_length((w, v, _) in sized_operands()) {
        prop_assert_eq!(format_value(v, NumberBase::Binary, w.bits()).len(), w.bits() as usize);
        prop_assert_eq!(
            format_value(v, NumberBase::Hexadecimal, w.bits()).len(),
            w.bits().div_ceil(4) as usize
        );
    }

    #[test]
    fn formatted_correct_value_is_accepted(
        op in operation(),
        b in base(),
        (w, x, y) in sized_operands(),
    ) {
        let q = Question::new(op, x, y, w).unwrap();
        let answer = format_value(q.correct_value(), b, q.result_width());
        let result = evaluate(&q, &answer, b);
        prop_assert!(result.is_correct, "{op} {x} {y} @{w}: {}", result.explanation);
        prop_assert_eq!(result.submitted, Some(q.correct_value()));
    }

    #[test]
    fn evaluation_is_idempotent(
        op in operation(),
        (w, x, y) in sized_operands(),
        raw in "[0-9a-fA-Fxb_ ]{0,12}",
    ) {
        let q = Question::new(op, x, y, w).unwrap();
        prop_assert_eq!(
            evaluate(&q, &raw, NumberBase::Hexadecimal),
            evaluate(&q, &raw, NumberBase::Hexadecimal)
        );
    }

    #[test]
    fn generator_respects_enabled_set(
        seed in any::<u64>(),
        w in bit_width(),
        enabled in prop::sample::subsequence(OperationKind::ALL.to_vec(), 1..=OperationKind::ALL.len()),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for _ in 0..20 {
            let q = next_question(w, &enabled, &mut rng).unwrap();
            prop_assert!(enabled.contains(&q.operation()));
            prop_assert!(q.operand1() < w.limit());
            prop_assert!(q.operand2() < w.limit());
        }
    }
}

#[test]
fn generator_rejects_empty_set_at_every_width() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for w in BitWidth::ALL {
        assert!(matches!(
            next_question(w, &[], &mut rng),
            Err(EngineError::InvalidConfiguration(_))
        ));
    }
}

#[test]
fn exhaustive_roundtrip_at_sixteen_bits() {
    for b in [NumberBase::Binary, NumberBase::Decimal, NumberBase::Hexadecimal] {
        for v in 0..=0xFFFF {
            let text = format_value(v, b, 16);
            assert_eq!(parse_value(&text, b, 16).unwrap(), v, "{b} {text}");
        }
    }
}
