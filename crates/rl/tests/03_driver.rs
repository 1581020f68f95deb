mod common;

use common::{nav_env, Scripted};
use ml::{LinearModel, Replay};
use physics::Vec3;
use rl::{DriverConfig, EpisodeDriver, PpoTrainer, RlError, TrainerConfig};
use std::sync::mpsc;
use std::thread;

fn zero_trainer<E: ml::EnvironmentAdapter>(env: E) -> PpoTrainer<E> {
    PpoTrainer::with_weights(env, TrainerConfig::default(), LinearModel::zeros(4), LinearModel::zeros(4))
        .unwrap()
}

#[test]
fn counters_reset_when_episode_ends() {
    let env = Scripted::new(vec![vec![0.1, 0.2, 0.3, 0.4]; 3], vec![-0.01, -0.01, 1.0]);
    let mut driver =
        EpisodeDriver::new(zero_trainer(env), Replay::constant(0.0), DriverConfig::default()).unwrap();

    assert_eq!(driver.tick().unwrap(), None);
    assert_eq!(driver.step(), 1);

    let summary = driver.run_episode().unwrap();
    assert_eq!(summary.episode, 0);
    assert_eq!(summary.steps, 3);
    assert!((summary.total_reward - 0.98).abs() < 1e-12);
    assert!(!summary.truncated && !summary.diverged);
    assert_eq!(summary.update.map(|u| u.transitions), Some(3));
    assert_eq!(driver.step(), 0);
    assert_eq!(driver.episode(), 1);
}

#[test]
fn goal_scenario_resets_step_counter() {
    let env = nav_env(Vec3::ZERO, Vec3::on_plane(0.0, 0.5), 500);
    let mut driver =
        EpisodeDriver::new(zero_trainer(env), Replay::constant(0.0), DriverConfig::default()).unwrap();
    let summary = driver.tick().unwrap().expect("goal reached on the first tick");
    assert_eq!(summary.steps, 1);
    assert_eq!(summary.total_reward, 1.0);
    assert_eq!(driver.step(), 0);
    assert!(driver.learner().buffer().is_empty());
}

#[test]
fn long_episodes_are_truncated() {
    let env = Scripted::endless(vec![vec![0.5; 4]], vec![-0.01]);
    let config = DriverConfig { episodes: 2, episode_length: 5 };
    let mut driver = EpisodeDriver::new(zero_trainer(env), fastrand::Rng::with_seed(0), config).unwrap();

    let summaries = driver.run().unwrap();
    assert_eq!(summaries.len(), 2);
    for (i, s) in summaries.iter().enumerate() {
        assert_eq!(s.episode as usize, i);
        assert_eq!(s.steps, 5);
        assert!(s.truncated);
        assert!(s.update.is_none());
    }
    let trainer = driver.into_learner();
    assert_eq!(trainer.env().resets, 2);
    assert_eq!(trainer.current_policy_weights(), &[0.0; 4]);
}

#[test]
fn divergence_is_recovered_and_counted() {
    let env = Scripted::new(vec![vec![1e200; 4]], vec![1.0]);
    let trainer = PpoTrainer::with_weights(
        env,
        TrainerConfig::default(),
        LinearModel::zeros(4),
        LinearModel::new(vec![1.0; 4]),
    )
    .unwrap();
    let config = DriverConfig { episodes: 3, episode_length: 10 };
    let mut driver = EpisodeDriver::new(trainer, Replay::constant(0.5), config).unwrap();

    let summaries = driver.run().unwrap();
    assert_eq!(summaries.len(), 3);
    assert!(summaries.iter().all(|s| s.diverged));
    assert_eq!(driver.divergences(), 3);
    assert_eq!(driver.learner().current_value_weights(), &[1.0; 4]);
}

#[test]
fn fatal_errors_propagate() {
    let env = Scripted::new(vec![vec![1.0; 2]], vec![0.0]);
    let mut driver =
        EpisodeDriver::new(zero_trainer(env), Replay::constant(0.0), DriverConfig::default()).unwrap();
    assert!(matches!(driver.run_episode(), Err(RlError::Model(_))));
}

#[test]
fn waits_for_readiness_signal() {
    let (tx, rx) = mpsc::channel();
    let host = thread::spawn(move || {
        tx.send(nav_env(Vec3::ZERO, Vec3::on_plane(0.0, 0.5), 500)).unwrap();
    });
    let mut driver = EpisodeDriver::await_ready(
        &rx,
        |env| PpoTrainer::new(env, TrainerConfig::default(), 0),
        Replay::constant(0.0),
        DriverConfig::default(),
    )
    .unwrap();
    host.join().unwrap();
    assert!(driver.run_episode().unwrap().steps == 1);
}

#[test]
fn closed_host_is_reported() {
    let (tx, rx) = mpsc::channel::<Scripted>();
    drop(tx);
    let result = EpisodeDriver::await_ready(
        &rx,
        |env| Ok(zero_trainer(env)),
        Replay::constant(0.0),
        DriverConfig::default(),
    );
    assert!(matches!(result, Err(RlError::EnvironmentUnavailable)));
}

#[test]
fn invalid_driver_config_is_rejected() {
    let env = Scripted::new(vec![vec![0.0; 4]], vec![0.0]);
    let config = DriverConfig { episodes: 0, ..DriverConfig::default() };
    assert!(matches!(
        EpisodeDriver::new(zero_trainer(env), Replay::constant(0.0), config),
        Err(RlError::InvalidConfig(_))
    ));
}
