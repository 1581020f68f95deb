use crate::config::AppConfig;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Clipped policy-gradient trainer with linear heads.
    Ppo,
    /// Tabular Q-learning over grid cells.
    QLearning,
}

/// Train an agent to reach a goal on the plane.
#[derive(Parser, Debug)]
#[command(name = "navppo", version, about, long_about = None)]
pub struct Cli {
    /// JSON run configuration; defaults apply to anything it leaves out
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// JSON scene; an open 5x5 arena with a random goal if omitted
    #[arg(long)]
    pub scene: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Algorithm::Ppo)]
    pub algorithm: Algorithm,

    #[arg(long)]
    pub episodes: Option<u32>,

    /// Ticks after which the driver truncates an episode
    #[arg(long)]
    pub episode_length: Option<u32>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Step size for whichever algorithm runs
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor for whichever algorithm runs
    #[arg(long)]
    pub gamma: Option<f64>,

    #[arg(long)]
    pub clip_epsilon: Option<f64>,

    #[arg(long)]
    pub epochs: Option<u32>,

    /// Environment step cap per episode
    #[arg(long)]
    pub max_episode_steps: Option<u32>,

    /// Q-learning exploration rate
    #[arg(long)]
    pub exploration_rate: Option<f64>,

    /// Write `episode,reward,steps` lines here
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write the final PPO weights here as JSON
    #[arg(long)]
    pub weights_out: Option<PathBuf>,
}

impl Cli {
    /// Loads `--config` (or the defaults) and applies the flag overrides.
    pub fn resolve_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(episodes) = self.episodes {
            config.driver.episodes = episodes;
        }
        if let Some(length) = self.episode_length {
            config.driver.episode_length = length;
        }
        if let Some(lr) = self.learning_rate {
            config.trainer.learning_rate = lr;
            config.q_learning.learning_rate = lr;
        }
        if let Some(gamma) = self.gamma {
            config.trainer.gamma = gamma;
            config.q_learning.discount = gamma;
        }
        if let Some(eps) = self.clip_epsilon {
            config.trainer.clip_epsilon = eps;
        }
        if let Some(epochs) = self.epochs {
            config.trainer.epochs = epochs;
        }
        if let Some(steps) = self.max_episode_steps {
            config.trainer.max_episode_steps = steps;
        }
        if let Some(rate) = self.exploration_rate {
            config.q_learning.exploration_rate = rate;
        }
    }
}
