use criterion::{Criterion, black_box, criterion_group, criterion_main};

use gus::{
    engine::{Gus, test_hypothesis},
    utils::conf::GusConfig,
};

fn bench_enumeration(c: &mut Criterion) {
    let gus = Gus::new(GusConfig::default()).unwrap();

    // Every single atom and every admissible pair.
    c.bench_function("hypothesize_two_tiers", |b| {
        b.iter(|| {
            let count = gus.hypothesize().take_while(|h| h.len() <= 2).count();
            black_box(count);
        })
    });
}

fn bench_backtest(c: &mut Criterion) {
    let squares: Vec<i32> = (1..=10).map(|x| x * x).collect();

    c.bench_function("backtest_squares", |b| {
        b.iter(|| black_box(test_hypothesis(&squares, black_box("nct"), false)))
    });
}

fn bench_guess(c: &mut Criterion) {
    let config = |workers| GusConfig {
        max_hypotheses: Some(20_000),
        workers,
        batch_size: 1024,
        ..Default::default()
    };

    for workers in [1, 4] {
        c.bench_function(&format!("guess_fibonacci_w{workers}"), |b| {
            b.iter(|| {
                let mut gus = Gus::new(config(workers)).unwrap();
                // Refuse everything to measure a full capped search.
                let found = gus.guess_sequence(&[1, 1, 2, 3, 5, 8, 13], |_| {}).unwrap();
                black_box(found);
            })
        });
    }
}

criterion_group!(benches, bench_enumeration, bench_backtest, bench_guess);
criterion_main!(benches);
