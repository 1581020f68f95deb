//! # Training run
//!
//! [`run`] resolves the configuration, starts the world host on its own
//! thread, waits for it to hand over the environment and then drives the
//! chosen learner for the configured number of episodes.

use crate::cli::{Algorithm, Cli};
use crate::config::AppConfig;
use crate::report::Report;
use anyhow::{Context, Result};
use rl::{EpisodeDriver, EpisodeSummary, NavigationEnv, PpoTrainer, QLearningAgent};
use scenario::Scene;
use std::fs::File;
use std::io::BufWriter;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub episodes: Vec<EpisodeSummary>,
    pub divergences: u32,
}

impl RunReport {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_reward(&self) -> f64 {
        if self.episodes.is_empty() {
            return 0.0;
        }
        let total: f64 = self.episodes.iter().map(|s| s.total_reward).sum();
        total / self.episodes.len() as f64
    }
}

/// Runs one training session as described by `cli`.
///
/// # Errors
///
/// Returns configuration and scene errors, errors from the world host, any
/// non-recoverable learner error, and failures writing `--weights-out`.
pub fn run(cli: &Cli) -> Result<RunReport> {
    let config = cli.resolve_config()?;
    let scene = match &cli.scene {
        Some(path) => Scene::load(path)?,
        None => Scene::default(),
    };
    scene.validate()?;
    tracing::info!(algorithm = ?cli.algorithm, seed = config.seed, "starting run");

    let (ready, host) = spawn_host(scene, &config);
    let report = Report::init(cli.report.clone());
    let result = match cli.algorithm {
        Algorithm::Ppo => train_ppo(cli, &config, &ready, &report),
        Algorithm::QLearning => train_q_learning(&config, &ready, &report),
    };

    // Host errors win over the driver's EnvironmentUnavailable.
    let hosted = host
        .join()
        .map_err(|_| anyhow::anyhow!("world host panicked"))?;
    hosted?;
    result
}

/// Builds the world on its own thread and sends the environment once ready.
fn spawn_host(
    scene: Scene,
    config: &AppConfig,
) -> (mpsc::Receiver<NavigationEnv>, JoinHandle<Result<()>>) {
    let (tx, rx) = mpsc::channel();
    let seed = config.seed;
    let max_episode_steps = config.trainer.max_episode_steps;
    let handle = thread::spawn(move || {
        let world = scene.into_world(seed).context("building world")?;
        tracing::info!(obstacles = world.obstacles.len(), "world host ready");
        // The driver may already have given up; nothing to report then.
        let _ = tx.send(NavigationEnv::new(world, max_episode_steps));
        Ok(())
    });
    (rx, handle)
}

fn train_ppo(
    cli: &Cli,
    config: &AppConfig,
    ready: &mpsc::Receiver<NavigationEnv>,
    report: &Report,
) -> Result<RunReport> {
    let trainer_config = config.trainer.clone();
    let seed = config.seed;
    let mut driver = EpisodeDriver::await_ready(
        ready,
        |env| PpoTrainer::new(env, trainer_config, seed),
        fastrand::Rng::with_seed(seed.wrapping_add(1)),
        config.driver.clone(),
    )?;
    let episodes = driver.run_with(|summary| report.save_line(summary))?;
    log_termination(driver.learner().env());

    if let Some(path) = &cli.weights_out {
        let file = File::create(path)
            .with_context(|| format!("creating weights file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &driver.learner().snapshot())
            .with_context(|| format!("writing weights to {}", path.display()))?;
        tracing::info!(path = %path.display(), "weights saved");
    }

    Ok(RunReport {
        episodes,
        divergences: driver.divergences(),
    })
}

fn train_q_learning(
    config: &AppConfig,
    ready: &mpsc::Receiver<NavigationEnv>,
    report: &Report,
) -> Result<RunReport> {
    let q_config = config.q_learning.clone();
    let mut driver = EpisodeDriver::await_ready(
        ready,
        |env| QLearningAgent::new(env, q_config),
        fastrand::Rng::with_seed(config.seed),
        config.driver.clone(),
    )?;
    let episodes = driver.run_with(|summary| report.save_line(summary))?;
    log_termination(driver.learner().env());
    tracing::info!(states = driver.learner().table_len(), "q-table size");
    Ok(RunReport {
        episodes,
        divergences: driver.divergences(),
    })
}

fn log_termination(env: &NavigationEnv) {
    match env.termination() {
        Some(cause) => tracing::info!(?cause, "last episode termination"),
        None => tracing::info!("no episode terminated inside the environment"),
    }
}

