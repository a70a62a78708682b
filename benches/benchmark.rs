use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bandurria::aggregator::TrialAggregator;
use bandurria::config::{ExperimentConfig, ThetaSource};
use bandurria::simulator::BanditSimulator;
use bandurria::strategy::{EpsilonGreedy, Strategy, ThompsonSampling, Ucb};

fn run_benchmark(c: &mut Criterion) {
    let thetas = [0.1, 0.3, 0.5, 0.7, 0.9];

    let strategies = [
        ("epsilon-greedy", Strategy::EpsilonGreedy(EpsilonGreedy { epsilon: 0.1 })),
        ("ucb", Strategy::Ucb(Ucb { c: 2.0 })),
        ("thompson", Strategy::Thompson(ThompsonSampling)),
    ];

    let mut group = c.benchmark_group("run");
    group.sample_size(100);
    for (name, strategy) in strategies {
        group.bench_function(format!("{} 6500", name), |b| {
            b.iter(|| {
                let mut simulator = BanditSimulator::new(black_box(&thetas), strategy, 1.0, 1.0);
                let mut random = StdRng::seed_from_u64(7);
                simulator.run(6500, &mut random).unwrap();
            })
        });
    }
    group.finish();
}

fn trial_benchmark(c: &mut Criterion) {
    let config = ExperimentConfig {
        arms: 5,
        horizon: 1000,
        repeats: 30,
        theta: ThetaSource::Explicit(vec![0.1, 0.3, 0.5, 0.7, 0.9]),
        seed: Some(7),
        ..ExperimentConfig::default()
    };

    let mut group = c.benchmark_group("trial");
    group.sample_size(20);
    group.bench_function("30x1000", |b| {
        b.iter(|| {
            let aggregator = TrialAggregator::new(black_box(&config)).unwrap();
            aggregator.run(0).unwrap();
        })
    });
    group.finish();
}

criterion_group!(benches, run_benchmark, trial_benchmark);
criterion_main!(benches);
