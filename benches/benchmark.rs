use criterion::{Criterion, criterion_group, criterion_main};
use heat_hurt::{ForestConfig, HeatHurt, SampleInput};

fn sample_input() -> SampleInput {
    SampleInput {
        age: 24,
        hair_type: "Straight".into(),
        tool_type: "Straightener".into(),
        temperature: 230.0,
        duration_min: 45,
        usage_freq: "Daily".into(),
        total_usage_months: 18,
    }
}

fn bench_training(c: &mut Criterion) {
    let config = ForestConfig::default();

    c.bench_function("train 100 trees", |b| {
        b.iter(|| HeatHurt::train(&config).unwrap());
    });
}

fn bench_assess_single(c: &mut Criterion) {
    let model = HeatHurt::train(&ForestConfig::default()).unwrap();
    let input = sample_input();

    c.bench_function("assess one sample", |b| {
        b.iter(|| {
            let _ = model.assess(&input);
        })
    });
}

fn bench_bulk_prediction(c: &mut Criterion) {
    let model = HeatHurt::train(&ForestConfig::default()).unwrap();
    let (x, _) = model.corpus().to_arrays();

    c.bench_function("predict training matrix", |b| {
        b.iter(|| {
            let _ = model.forest().predict(&x).unwrap();
        });
    });
}

criterion_group!(benches, bench_training, bench_assess_single, bench_bulk_prediction);
criterion_main!(benches);
