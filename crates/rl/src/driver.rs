//! # Episode driver
//!
//! [`EpisodeDriver`] is the fixed-tick loop around a [`Learner`]. It owns the
//! random source and the episode and step counters, closes an episode when the
//! learner reports termination, and truncates episodes that run past
//! [`DriverConfig::episode_length`].
//!
//! The driver never starts ticking before the world host is ready:
//! [`EpisodeDriver::await_ready`] blocks once on a channel that carries the
//! initialised environment.

use crate::config::DriverConfig;
use crate::error::RlError;
use crate::ppo::UpdateStats;
use crate::Learner;
use ml::UniformSource;
use std::sync::mpsc::Receiver;

/// Result of one finished episode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    /// Zero-based episode index.
    pub episode: u32,
    pub steps: u32,
    pub total_reward: f64,
    /// `true` when the driver cut the episode at its length cap.
    pub truncated: bool,
    /// `true` when the update diverged and the weights were reset.
    pub diverged: bool,
    pub update: Option<UpdateStats>,
}

pub struct EpisodeDriver<L: Learner, R: UniformSource> {
    learner: L,
    rng: R,
    config: DriverConfig,
    episode: u32,
    step: u32,
    episode_reward: f64,
    divergences: u32,
}

impl<L: Learner, R: UniformSource> EpisodeDriver<L, R> {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] if `config` fails validation.
    pub fn new(learner: L, rng: R, config: DriverConfig) -> Result<Self, RlError> {
        config.validate()?;
        Ok(Self {
            learner,
            rng,
            config,
            episode: 0,
            step: 0,
            episode_reward: 0.0,
            divergences: 0,
        })
    }

    /// Waits for the host to hand over its environment, then builds the
    /// learner around it.
    ///
    /// # Errors
    ///
    /// [`RlError::EnvironmentUnavailable`] if the sender was dropped without
    /// sending, or whatever `build` returns.
    pub fn await_ready<E>(
        ready: &Receiver<E>,
        build: impl FnOnce(E) -> Result<L, RlError>,
        rng: R,
        config: DriverConfig,
    ) -> Result<Self, RlError> {
        let env = ready.recv().map_err(|_| RlError::EnvironmentUnavailable)?;
        tracing::info!("environment ready");
        Self::new(build(env)?, rng, config)
    }

    #[must_use]
    pub fn learner(&self) -> &L {
        &self.learner
    }

    pub fn learner_mut(&mut self) -> &mut L {
        &mut self.learner
    }

    /// Episodes finished so far.
    #[must_use]
    pub fn episode(&self) -> u32 {
        self.episode
    }

    /// Ticks into the current episode.
    #[must_use]
    pub fn step(&self) -> u32 {
        self.step
    }

    /// Updates that diverged and forced a weight reset.
    #[must_use]
    pub fn divergences(&self) -> u32 {
        self.divergences
    }

    /// Advances the learner by one tick. Returns a summary when that tick
    /// ended the episode.
    ///
    /// # Errors
    ///
    /// Any non-recoverable [`RlError`] from the learner.
    pub fn tick(&mut self) -> Result<Option<EpisodeSummary>, RlError> {
        self.step += 1;
        match self.learner.tick(&mut self.rng) {
            Ok(outcome) => {
                self.episode_reward += outcome.reward;
                if outcome.terminated {
                    return Ok(Some(self.finish(false, false, outcome.update)));
                }
                if self.step >= self.config.episode_length {
                    self.learner.reset();
                    return Ok(Some(self.finish(true, false, None)));
                }
                Ok(None)
            }
            Err(err) if err.is_recoverable() => {
                tracing::error!(%err, episode = self.episode, "learner diverged");
                self.divergences += 1;
                Ok(Some(self.finish(false, true, None)))
            }
            Err(err) => Err(err),
        }
    }

    fn finish(&mut self, truncated: bool, diverged: bool, update: Option<UpdateStats>) -> EpisodeSummary {
        let summary = EpisodeSummary {
            episode: self.episode,
            steps: self.step,
            total_reward: self.episode_reward,
            truncated,
            diverged,
            update,
        };
        tracing::info!(
            episode = summary.episode,
            steps = summary.steps,
            reward = summary.total_reward,
            truncated,
            diverged,
            "episode finished"
        );
        self.episode += 1;
        self.step = 0;
        self.episode_reward = 0.0;
        summary
    }

    /// Ticks until the current episode ends.
    ///
    /// # Errors
    ///
    /// Any non-recoverable [`RlError`] from the learner.
    pub fn run_episode(&mut self) -> Result<EpisodeSummary, RlError> {
        loop {
            if let Some(summary) = self.tick()? {
                return Ok(summary);
            }
        }
    }

    /// Runs [`DriverConfig::episodes`] episodes.
    ///
    /// # Errors
    ///
    /// Any non-recoverable [`RlError`] from the learner.
    pub fn run(&mut self) -> Result<Vec<EpisodeSummary>, RlError> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_episode` after each episode.
    ///
    /// # Errors
    ///
    /// Any non-recoverable [`RlError`] from the learner.
    pub fn run_with(
        &mut self,
        mut on_episode: impl FnMut(&EpisodeSummary),
    ) -> Result<Vec<EpisodeSummary>, RlError> {
        let mut summaries = Vec::with_capacity(self.config.episodes as usize);
        for _ in 0..self.config.episodes {
            let summary = self.run_episode()?;
            on_episode(&summary);
            summaries.push(summary);
        }
        Ok(summaries)
    }

    /// Abandons the current episode between ticks.
    pub fn reset(&mut self) {
        self.learner.reset();
        self.step = 0;
        self.episode_reward = 0.0;
    }

    /// Hands back the learner, e.g. to snapshot its weights.
    pub fn into_learner(self) -> L {
        self.learner
    }
}
