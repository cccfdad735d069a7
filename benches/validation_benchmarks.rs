use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use karyotype_check::parser::parse;
use karyotype_check::validation::{validate, validate_karyotype, RuleCatalog, RuleEngine};
use std::hint::black_box;

/// Karyotypes with a given share of rule violations
fn generate_validation_inputs(count: usize, scenario: &str) -> Vec<String> {
    let mut inputs = Vec::with_capacity(count);

    match scenario {
        "all_valid" => {
            for i in 0..count {
                inputs.push(format!("47,XY,+{}", i % 22 + 1));
            }
        }
        "tree_errors" => {
            for i in 0..count {
                if i % 2 == 0 {
                    inputs.push(format!("{},XX", 10 + i % 10));
                } else {
                    inputs.push("46,Y".to_string());
                }
            }
        }
        "abnormality_errors" => {
            for i in 0..count {
                match i % 3 {
                    0 => inputs.push("46,XX,inv(9)(p12)".to_string()),
                    1 => inputs.push("46,XX,r(1)(p36p42)".to_string()),
                    _ => inputs.push("46,XX,t(9;22)(q34)".to_string()),
                }
            }
        }
        _ => {
            for i in 0..count {
                match i % 4 {
                    0 => inputs.push("46,XX".to_string()),
                    1 => inputs.push("46,X".to_string()),
                    2 => inputs.push("46,XX,del(5)(p13q33)".to_string()),
                    3 => inputs.push("46,XX,del(5)(q)".to_string()),
                    _ => unreachable!(),
                }
            }
        }
    }

    inputs
}

fn bench_validation_scenarios(c: &mut Criterion) {
    let scenarios = vec!["all_valid", "tree_errors", "abnormality_errors", "mixed"];
    let size = 1_000;

    let mut group = c.benchmark_group("validation_scenarios");
    group.throughput(Throughput::Elements(size as u64));

    for scenario in scenarios {
        let inputs = generate_validation_inputs(size, scenario);
        group.bench_with_input(BenchmarkId::new("validate_karyotype", scenario), &inputs, |b, inputs| {
            b.iter(|| {
                for input in inputs {
                    black_box(validate_karyotype(black_box(input)));
                }
            })
        });
    }

    group.finish();
}

fn bench_tree_validation(c: &mut Criterion) {
    let trees: Vec<_> = [
        "46,XX",
        "46,XX,t(9;22)(q34;q11.2)",
        "47,XX,?del(5)(q13q33)mat,+8c,t(9;22)(q34;q11.2),i(17q),+2mar",
    ]
    .iter()
    .filter_map(|input| parse(input).ok())
    .collect();

    let mut group = c.benchmark_group("tree_validation");

    for (idx, tree) in trees.iter().enumerate() {
        group.bench_with_input(BenchmarkId::new("validate", idx), tree, |b, tree| {
            b.iter(|| black_box(validate(black_box(tree))))
        });
    }

    group.finish();
}

fn bench_catalog_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    group.bench_function("standard", |b| b.iter(|| black_box(RuleCatalog::standard())));

    group.bench_function("without", |b| {
        let catalog = RuleCatalog::standard();
        b.iter(|| black_box(catalog.without(black_box(&["SEX_CHR_COHERENCE"]))))
    });

    group.bench_function("custom_engine", |b| {
        let engine = RuleEngine::new(
            RuleCatalog::standard()
                .without(&["ABN_RECOGNIZED"])
                .unwrap_or_default(),
        );
        b.iter(|| black_box(engine.validate_str(black_box("47,XX,21"))))
    });

    group.finish();
}

criterion_group!(
    validation_benches,
    bench_validation_scenarios,
    bench_tree_validation,
    bench_catalog_construction
);

criterion_main!(validation_benches);
