//! Hyper-parameters for the learners and the driver.
//!
//! Every config deserialises from JSON with per-field defaults, so a file only
//! needs the values it changes. Call `validate` before use; constructors in
//! this crate do it for you.

use crate::error::RlError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub learning_rate: f64,
    pub gamma: f64,
    pub clip_epsilon: f64,
    pub epochs: u32,
    pub max_episode_steps: u32,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            gamma: 0.99,
            clip_epsilon: 0.2,
            epochs: 4,
            max_episode_steps: 500,
        }
    }
}

impl TrainerConfig {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), RlError> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(invalid("learning_rate", "must be > 0", self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(invalid("gamma", "must be in [0, 1]", self.gamma));
        }
        if !(self.clip_epsilon > 0.0 && self.clip_epsilon < 1.0) {
            return Err(invalid("clip_epsilon", "must be in (0, 1)", self.clip_epsilon));
        }
        if self.epochs == 0 {
            return Err(invalid("epochs", "must be >= 1", self.epochs));
        }
        if self.max_episode_steps == 0 {
            return Err(invalid("max_episode_steps", "must be >= 1", self.max_episode_steps));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QLearningConfig {
    pub learning_rate: f64,
    pub discount: f64,
    pub exploration_rate: f64,
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            discount: 0.95,
            exploration_rate: 0.1,
        }
    }
}

impl QLearningConfig {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] naming the first out-of-range field.
    pub fn validate(&self) -> Result<(), RlError> {
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(invalid("learning_rate", "must be in (0, 1]", self.learning_rate));
        }
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(invalid("discount", "must be in [0, 1]", self.discount));
        }
        if !(0.0..=1.0).contains(&self.exploration_rate) {
            return Err(invalid("exploration_rate", "must be in [0, 1]", self.exploration_rate));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Episodes to run in [`crate::EpisodeDriver::run`].
    pub episodes: u32,
    /// Ticks after which the driver truncates an episode on its own.
    pub episode_length: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            episodes: 100,
            episode_length: 1000,
        }
    }
}

impl DriverConfig {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] if either counter is zero.
    pub fn validate(&self) -> Result<(), RlError> {
        if self.episodes == 0 {
            return Err(invalid("episodes", "must be >= 1", self.episodes));
        }
        if self.episode_length == 0 {
            return Err(invalid("episode_length", "must be >= 1", self.episode_length));
        }
        Ok(())
    }
}

fn invalid(field: &str, rule: &str, value: impl std::fmt::Display) -> RlError {
    RlError::InvalidConfig(format!("{field} {rule}, got {value}"))
}
