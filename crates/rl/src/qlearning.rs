//! Tabular Q-learning over rounded grid cells.
//!
//! This is the simpler of the two learners. It consumes the same
//! [`EnvironmentAdapter`] as [`crate::PpoTrainer`], so rewards and termination
//! mean exactly the same thing for both.

use crate::config::QLearningConfig;
use crate::error::RlError;
use crate::ppo::TickOutcome;
use crate::Learner;
use ml::{Action, EnvironmentAdapter, FeatureVector, UniformSource, ACTION_COUNT};
use std::collections::HashMap;

/// Integer cell the agent occupies, from its rounded x/z coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub x: i32,
    pub z: i32,
}

impl GridCell {
    /// Reads the agent coordinates from the first two features.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_features(features: &FeatureVector) -> Self {
        let coord = |i: usize| features.get(i).copied().unwrap_or(0.0).round() as i32;
        Self { x: coord(0), z: coord(1) }
    }
}

pub struct QLearningAgent<E: EnvironmentAdapter> {
    env: E,
    config: QLearningConfig,
    table: HashMap<(GridCell, Action), f64>,
}

impl<E: EnvironmentAdapter> QLearningAgent<E> {
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] if `config` fails validation.
    pub fn new(env: E, config: QLearningConfig) -> Result<Self, RlError> {
        config.validate()?;
        Ok(Self {
            env,
            config,
            table: HashMap::new(),
        })
    }

    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Stored value, zero for unseen pairs.
    #[must_use]
    pub fn q_value(&self, cell: GridCell, action: Action) -> f64 {
        self.table.get(&(cell, action)).copied().unwrap_or(0.0)
    }

    /// Number of visited state-action pairs.
    #[must_use]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// First action with the highest value in `cell`.
    #[must_use]
    pub fn best_action(&self, cell: GridCell) -> Action {
        let mut best = Action::ALL[0];
        let mut best_value = f64::NEG_INFINITY;
        for action in Action::ALL {
            let v = self.q_value(cell, action);
            if v > best_value {
                best_value = v;
                best = action;
            }
        }
        best
    }

    fn max_q(&self, cell: GridCell) -> f64 {
        Action::ALL
            .iter()
            .map(|&a| self.q_value(cell, a))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn choose_action<R: UniformSource + ?Sized>(&self, cell: GridCell, rng: &mut R) -> Action {
        if rng.next_uniform() < self.config.exploration_rate {
            let i = (rng.next_uniform() * ACTION_COUNT as f64) as usize;
            Action::ALL[i.min(ACTION_COUNT - 1)]
        } else {
            self.best_action(cell)
        }
    }

    /// One ε-greedy step followed by the tabular update.
    ///
    /// # Errors
    ///
    /// Never fails today; the signature matches [`Learner::tick`].
    pub fn tick<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> Result<TickOutcome, RlError> {
        let cell = GridCell::from_features(&self.env.observe());
        let action = self.choose_action(cell, rng);
        let (reward, terminated) = self.env.act(action);
        let next = GridCell::from_features(&self.env.observe());

        let alpha = self.config.learning_rate;
        let next_max = if terminated { 0.0 } else { self.max_q(next) };
        let old = self.q_value(cell, action);
        let updated = (1.0 - alpha) * old + alpha * (reward + self.config.discount * next_max);
        self.table.insert((cell, action), updated);

        if terminated {
            tracing::debug!(states = self.table.len(), "q-learning episode terminated");
            self.env.reset_episode();
        }
        Ok(TickOutcome {
            reward,
            terminated,
            update: None,
        })
    }

    pub fn reset(&mut self) {
        self.env.reset_episode();
    }
}

impl<E: EnvironmentAdapter> Learner for QLearningAgent<E> {
    fn tick(&mut self, rng: &mut dyn UniformSource) -> Result<TickOutcome, RlError> {
        QLearningAgent::tick(self, rng)
    }

    fn reset(&mut self) {
        QLearningAgent::reset(self);
    }
}
