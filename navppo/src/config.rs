//! Run configuration loaded from JSON.

use anyhow::{Context, Result};
use rl::{DriverConfig, QLearningConfig, TrainerConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything a run needs besides the scene.
///
/// ```json
/// { "seed": 7, "trainer": { "epochs": 8 }, "driver": { "episodes": 50 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub seed: u64,
    pub trainer: TrainerConfig,
    pub q_learning: QLearningConfig,
    pub driver: DriverConfig,
}

impl AppConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.trainer.validate().context("trainer")?;
        self.q_learning.validate().context("q_learning")?;
        self.driver.validate().context("driver")?;
        Ok(())
    }
}
