use criterion::{black_box, criterion_group, criterion_main, Criterion};

use bittrainer_core::{format_value, parse_value, NumberBase};

const BASES: [NumberBase; 3] = [
    NumberBase::Binary,
    NumberBase::Decimal,
    NumberBase::Hexadecimal,
];

fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format_value");

    for base in BASES {
        group.bench_function(base.to_string(), |b| {
            b.iter(|| format_value(black_box(0xBEEF), base, black_box(16)))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_value");

    let inputs = [
        (NumberBase::Binary, "0b1011_1110_1110_1111"),
        (NumberBase::Decimal, "48879"),
        (NumberBase::Hexadecimal, "0xBEEF"),
    ];
    for (base, raw) in inputs {
        group.bench_function(base.to_string(), |b| {
            b.iter(|| parse_value(black_box(raw), base, black_box(16)))
        });
    }

    group.bench_function("invalid_digit", |b| {
        b.iter(|| parse_value(black_box("10102"), NumberBase::Binary, black_box(8)))
    });

    group.finish();
}

criterion_group!(benches, bench_format, bench_parse);
criterion_main!(benches);
