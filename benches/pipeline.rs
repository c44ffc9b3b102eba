//! Benchmarks for the retint pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use retint::catalog::{Catalog, SetKind};
use retint::substitute::CompiledRules;
use retint::types::ColourSpec;

// -- Colour benchmarks --

fn bench_colour(c: &mut Criterion) {
    let mut group = c.benchmark_group("colour");

    let target = ColourSpec::from_hex("#3584E4").unwrap();

    group.bench_function("lightness_offset", |b| {
        b.iter(|| black_box(&target).with_lightness_offset(black_box(37)))
    });

    group.bench_function("offset_sweep", |b| {
        b.iter(|| {
            (-100..=100)
                .map(|o| target.with_lightness_offset(o).colour())
                .count()
        })
    });

    group.finish();
}

// -- Substitution benchmarks --

fn stylesheet(lines: usize) -> String {
    let mut css = String::new();
    for i in 0..lines {
        match i % 4 {
            0 => css.push_str(&format!(".widget-{} {{ color: #E95420; }}\n", i)),
            1 => css.push_str(&format!(
                ".widget-{} {{ background: rgba(233, 84, 32, 0.3); }}\n",
                i
            )),
            2 => css.push_str(&format!(".widget-{} {{ border-color: #c7431a; }}\r\n", i)),
            _ => css.push_str(&format!(".widget-{} {{ margin: {}px; }}\n", i, i % 7)),
        }
    }
    css
}

fn bench_substitution(c: &mut Criterion) {
    let mut group = c.benchmark_group("substitution");

    let target = ColourSpec::from_hex("#3584E4").unwrap();
    let catalog = Catalog::builtin();
    let set = catalog.get(SetKind::Theme, "Yaru").unwrap();
    let rules = set.rules(&target, "Blue").unwrap();

    group.bench_function("compile_yaru_rules", |b| {
        b.iter(|| CompiledRules::compile(black_box(&rules)).unwrap())
    });

    let compiled = CompiledRules::compile(&rules).unwrap();
    let small = stylesheet(40);
    let large = stylesheet(4000);

    group.bench_function("apply_small", |b| {
        b.iter(|| compiled.apply(black_box(&small)))
    });

    group.bench_function("apply_large", |b| {
        b.iter(|| compiled.apply(black_box(&large)))
    });

    group.finish();
}

criterion_group!(benches, bench_colour, bench_substitution);
criterion_main!(benches);
