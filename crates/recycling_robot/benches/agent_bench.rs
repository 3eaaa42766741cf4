//! Benchmarks for the recycling robot
//!
//! Run with: cargo bench -p recycling_robot

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use recycling_robot::{
    AgentConfig, EnvironmentDynamics, LearningAgent, RewardModel, SimulationConfig, Trainer,
    TransitionParameters,
};

fn environment(seed: u64) -> EnvironmentDynamics {
    let rewards = RewardModel::new(0.5, 0.2).unwrap();
    let params = TransitionParameters::new(0.3, 0.3).unwrap();
    EnvironmentDynamics::seeded(params, rewards, seed)
}

/// Benchmark a single select/step/observe cycle
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("Step");

    group.bench_function("select_step_observe", |b| {
        let mut agent = LearningAgent::seeded(AgentConfig::default(), 1);
        let mut env = environment(2);
        b.iter(|| {
            let action = agent.select_action();
            let transition = env.step(black_box(action));
            agent.observe_transition(transition.next_state);
            // Keep the trajectory from growing across iterations
            if agent.trajectory().len() >= 10_000 {
                agent.begin_episode();
            }
        });
    });

    group.finish();
}

/// Benchmark the backward pass for different episode lengths
fn bench_update_policy(c: &mut Criterion) {
    let mut group = c.benchmark_group("Update Policy");

    for steps in [100usize, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, &steps| {
            let mut agent = LearningAgent::seeded(AgentConfig::default(), 3);
            let mut env = environment(4);
            let mut total = 0.0;
            for _ in 0..steps {
                let action = agent.select_action();
                let transition = env.step(action);
                agent.observe_transition(transition.next_state);
                total += transition.reward;
            }

            b.iter(|| agent.update_policy(black_box(total)));
        });
    }

    group.finish();
}

/// Benchmark a full default-sized training run
fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("Training");
    group.sample_size(10);

    group.bench_function("50_epochs_x_1000_steps", |b| {
        b.iter(|| {
            let config = SimulationConfig {
                runs: 1,
                ..SimulationConfig::default()
            }
            .with_seed(5);
            let mut trainer = Trainer::new(config).unwrap();
            black_box(trainer.run())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_step, bench_update_policy, bench_training);
criterion_main!(benches);
