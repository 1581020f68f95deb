use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use ml::{Action, EnvironmentAdapter, FeatureVector, LinearModel, SoftmaxPolicy};
use physics::{GoalPlacement, Vec3, World, WorldParams};
use rl::{compute_advantages, NavigationEnv, PpoTrainer, TrainerConfig};

/// Terminates after `len` steps with features in `[0, 1)`.
struct Rollout {
    states: Vec<[f64; 4]>,
    rewards: Vec<f64>,
    cursor: usize,
}

impl Rollout {
    fn new(len: usize, seed: u64) -> Self {
        let rng = fastrand::Rng::with_seed(seed);
        Self {
            states: (0..len).map(|_| [rng.f64(), rng.f64(), rng.f64(), rng.f64()]).collect(),
            rewards: (0..len).map(|_| rng.f64() * 2.0 - 1.0).collect(),
            cursor: 0,
        }
    }
}

impl EnvironmentAdapter for Rollout {
    fn observe(&mut self) -> FeatureVector {
        FeatureVector::from(self.states[self.cursor])
    }

    fn act(&mut self, _action: Action) -> (f64, bool) {
        let reward = self.rewards[self.cursor];
        self.cursor += 1;
        (reward, self.cursor == self.states.len())
    }

    fn reset_episode(&mut self) {
        self.cursor = 0;
    }
}

fn bench_policy(c: &mut Criterion) {
    let mut rng = fastrand::Rng::with_seed(1);
    let model = LinearModel::uniform(4, 0.1, &mut rng);
    let features = FeatureVector::navigation(0.3, -1.2, 4.0, 2.0);
    c.bench_function("score_and_sample", |b| {
        b.iter(|| {
            let scores = model.score(black_box(&features)).unwrap_or([0.0; 4]);
            let probs = SoftmaxPolicy::distribution(&scores);
            SoftmaxPolicy::sample(&probs, black_box(0.42))
        });
    });
}

fn bench_advantages(c: &mut Criterion) {
    let rng = fastrand::Rng::with_seed(2);
    let rewards: Vec<f64> = (0..1000).map(|_| rng.f64() - 0.5).collect();
    let values: Vec<f64> = (0..1000).map(|_| rng.f64()).collect();
    c.bench_function("advantages_1000", |b| {
        b.iter(|| compute_advantages(black_box(&rewards), black_box(&values), 0.99));
    });
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("ppo_rollout");
    for len in [100usize, 500] {
        group.bench_function(format!("collect_and_update_{len}"), |b| {
            b.iter_batched(
                || {
                    let env = Rollout::new(len, 3);
                    let trainer = PpoTrainer::new(env, TrainerConfig::default(), 4);
                    (trainer, fastrand::Rng::with_seed(5))
                },
                |(trainer, mut rng)| {
                    let Ok(mut trainer) = trainer else { return };
                    for _ in 0..len {
                        if trainer.tick(&mut rng).is_err() {
                            break;
                        }
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_navigation(c: &mut Criterion) {
    c.bench_function("navigation_episode", |b| {
        b.iter_batched(
            || {
                let world = World::new(
                    WorldParams::default(),
                    Vec3::ZERO,
                    GoalPlacement::Random { grid_size: 5 },
                    7,
                );
                let env = NavigationEnv::new(world, 500);
                (PpoTrainer::new(env, TrainerConfig::default(), 8), fastrand::Rng::with_seed(9))
            },
            |(trainer, mut rng)| {
                let Ok(mut trainer) = trainer else { return };
                while let Ok(outcome) = trainer.tick(&mut rng) {
                    if outcome.terminated {
                        break;
                    }
                }
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_policy, bench_advantages, bench_update, bench_navigation);
criterion_main!(benches);
