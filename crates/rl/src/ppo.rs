//! # Clipped policy-gradient trainer
//!
//! [`PpoTrainer`] runs one rollout per episode. While [`Phase::Collecting`] it
//! observes, scores, samples and stores one transition per tick. The tick that
//! reports termination switches it to [`Phase::Updating`], where it computes
//! advantages and runs `epochs` passes of the clipped update over the buffer
//! before clearing it, resetting the environment and collecting again.
//!
//! The update rule:
//!
//! -   probabilities are recomputed from the current weights on every
//!     transition, so the "old" probability drifts with the update;
//! -   the "new" probability is `exp(score)` without normalisation, and the
//!     ratio to the "old" one is capped at [`RATIO_CAP`];
//! -   each weight moves by `lr * loss * feature` rather than by an analytic
//!     gradient of the clipped objective.

use crate::buffer::{RolloutBuffer, Transition};
use crate::config::TrainerConfig;
use crate::error::RlError;
use crate::Learner;
use ml::{
    checked_probability, Action, EnvironmentAdapter, Head, LinearModel, MlError, SoftmaxPolicy,
    UniformSource, PROBABILITY_FLOOR,
};
use serde::{Deserialize, Serialize};

/// Half-width of the uniform range used for initial weights.
pub const INIT_WEIGHT_LIMIT: f64 = 0.1;

/// Largest probability ratio fed into the clipped objective.
pub const RATIO_CAP: f64 = 1e8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Collecting,
    Updating,
}

/// Summary of one completed update cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateStats {
    /// Transitions in the rollout.
    pub transitions: usize,
    pub epochs: u32,
    pub mean_policy_loss: f64,
    pub mean_value_loss: f64,
    /// Probabilities that had to be floored during ratio computation.
    pub degenerate_probabilities: usize,
}

/// What one tick produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutcome {
    pub reward: f64,
    pub terminated: bool,
    /// Present on the tick that closed the rollout.
    pub update: Option<UpdateStats>,
}

/// Serializable copy of both heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsSnapshot {
    pub policy: LinearModel,
    pub value: LinearModel,
}

pub struct PpoTrainer<E: EnvironmentAdapter> {
    env: E,
    config: TrainerConfig,
    policy: LinearModel,
    value: LinearModel,
    initial: WeightsSnapshot,
    buffer: RolloutBuffer,
    phase: Phase,
}

impl<E: EnvironmentAdapter> PpoTrainer<E> {
    /// Creates a trainer with weights drawn from `[-0.1, 0.1)` using `seed`.
    ///
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] if `config` fails validation.
    pub fn new(env: E, config: TrainerConfig, seed: u64) -> Result<Self, RlError> {
        let mut rng = fastrand::Rng::with_seed(seed);
        let policy = LinearModel::uniform(ml::FEATURE_DIM, INIT_WEIGHT_LIMIT, &mut rng);
        let value = LinearModel::uniform(ml::FEATURE_DIM, INIT_WEIGHT_LIMIT, &mut rng);
        Self::with_weights(env, config, policy, value)
    }

    /// Creates a trainer from explicit initial weights.
    ///
    /// # Errors
    ///
    /// [`RlError::InvalidConfig`] if `config` fails validation or the two
    /// heads differ in length.
    pub fn with_weights(
        env: E,
        config: TrainerConfig,
        policy: LinearModel,
        value: LinearModel,
    ) -> Result<Self, RlError> {
        config.validate()?;
        if policy.dim() != value.dim() {
            return Err(RlError::InvalidConfig(format!(
                "policy head has {} weights but value head has {}",
                policy.dim(),
                value.dim()
            )));
        }
        let initial = WeightsSnapshot {
            policy: policy.clone(),
            value: value.clone(),
        };
        let capacity = config.max_episode_steps as usize;
        Ok(Self {
            env,
            config,
            policy,
            value,
            initial,
            buffer: RolloutBuffer::with_capacity(capacity),
            phase: Phase::Collecting,
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn buffer(&self) -> &RolloutBuffer {
        &self.buffer
    }

    #[must_use]
    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    #[must_use]
    pub fn current_policy_weights(&self) -> &[f64] {
        self.policy.weights()
    }

    #[must_use]
    pub fn current_value_weights(&self) -> &[f64] {
        self.value.weights()
    }

    #[must_use]
    pub fn snapshot(&self) -> WeightsSnapshot {
        WeightsSnapshot {
            policy: self.policy.clone(),
            value: self.value.clone(),
        }
    }

    /// Replaces both heads, e.g. from a saved snapshot. The restored weights
    /// also become the fallback used after divergence.
    ///
    /// # Errors
    ///
    /// [`MlError::DimensionMismatch`] if the snapshot heads do not match the
    /// current head length, [`MlError::NonFiniteWeight`] if they hold NaN or ∞.
    pub fn restore(&mut self, snapshot: WeightsSnapshot) -> Result<(), RlError> {
        for model in [&snapshot.policy, &snapshot.value] {
            if model.dim() != self.policy.dim() {
                return Err(MlError::DimensionMismatch {
                    expected: self.policy.dim(),
                    found: model.dim(),
                }
                .into());
            }
        }
        snapshot.policy.ensure_finite(Head::Policy)?;
        snapshot.value.ensure_finite(Head::Value)?;
        self.policy = snapshot.policy.clone();
        self.value = snapshot.value.clone();
        self.initial = snapshot;
        self.clear_rollout();
        Ok(())
    }

    /// Abandons the rollout in progress and resets the environment.
    pub fn reset(&mut self) {
        self.clear_rollout();
        self.env.reset_episode();
    }

    fn clear_rollout(&mut self) {
        self.buffer.clear();
        self.phase = Phase::Collecting;
    }

    /// One sense, act, store cycle. On the terminating tick the update runs
    /// before this returns.
    ///
    /// # Errors
    ///
    /// [`MlError::DimensionMismatch`] if the environment's observation does
    /// not match the heads. [`MlError::NonFiniteWeight`] if the update
    /// diverged; the weights have then been restored to their initial values
    /// and the environment reset.
    pub fn tick<R: UniformSource + ?Sized>(&mut self, rng: &mut R) -> Result<TickOutcome, RlError> {
        debug_assert_eq!(self.phase, Phase::Collecting);

        let state = self.env.observe();
        let value_estimate = self.value.dot(&state)?;
        let scores = self.policy.score(&state)?;
        let probs = SoftmaxPolicy::distribution(&scores);
        let action = Action::ALL[SoftmaxPolicy::sample(&probs, rng.next_uniform())];

        let (reward, terminated) = self.env.act(action);
        self.buffer.push(Transition {
            state,
            action,
            reward,
            value_estimate,
        });

        if !terminated {
            return Ok(TickOutcome {
                reward,
                terminated,
                update: None,
            });
        }

        self.phase = Phase::Updating;
        let result = self.update();
        self.clear_rollout();
        self.env.reset_episode();

        match result {
            Ok(stats) => Ok(TickOutcome {
                reward,
                terminated,
                update: Some(stats),
            }),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::error!(%err, "update diverged, restoring initial weights");
                    self.policy = self.initial.policy.clone();
                    self.value = self.initial.value.clone();
                }
                Err(err.into())
            }
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn update(&mut self) -> Result<UpdateStats, MlError> {
        let gamma = self.config.gamma;
        let lr = self.config.learning_rate;
        let eps = self.config.clip_epsilon;

        self.buffer.compute_advantages(gamma);
        let transitions = self.buffer.transitions();
        let advantages = self.buffer.advantages();
        let count = transitions.len();

        let mut stats = UpdateStats {
            transitions: count,
            epochs: self.config.epochs,
            ..UpdateStats::default()
        };
        let mut policy_loss_sum = 0.0;
        let mut value_loss_sum = 0.0;

        for epoch in 0..self.config.epochs {
            for (i, t) in transitions.iter().enumerate() {
                let a = t.action.index();
                let scores = self.policy.score(&t.state)?;
                let probs = SoftmaxPolicy::distribution(&scores);

                let old_probability = guard_probability(probs[a], &mut stats);
                let new_probability = guard_probability(scores[a].exp(), &mut stats);
                let ratio = bounded_ratio(new_probability, old_probability, &mut stats);
                let clipped = ratio.clamp(1.0 - eps, 1.0 + eps);
                let advantage = advantages[i];
                let policy_loss = -(ratio * advantage).min(clipped * advantage);
                self.policy.descend(lr * policy_loss, &t.state)?;

                let next_value = transitions.get(i + 1).map_or(0.0, |n| n.value_estimate);
                let target = t.reward + gamma * next_value;
                let value_loss = (target - t.value_estimate).powi(2);
                self.value.descend(lr * value_loss, &t.state)?;

                policy_loss_sum += policy_loss;
                value_loss_sum += value_loss;
            }

            self.policy.ensure_finite(Head::Policy)?;
            self.value.ensure_finite(Head::Value)?;
            tracing::trace!(epoch, "update epoch finished");
        }

        let samples = (count * self.config.epochs as usize).max(1) as f64;
        stats.mean_policy_loss = policy_loss_sum / samples;
        stats.mean_value_loss = value_loss_sum / samples;
        tracing::debug!(
            transitions = stats.transitions,
            policy_loss = stats.mean_policy_loss,
            value_loss = stats.mean_value_loss,
            degenerate = stats.degenerate_probabilities,
            "update finished"
        );
        Ok(stats)
    }
}

/// Floors zero, negative and NaN probabilities; caps `+∞` at `f64::MAX`.
fn guard_probability(p: f64, stats: &mut UpdateStats) -> f64 {
    match checked_probability(p) {
        Ok(p) => p,
        Err(err) => {
            stats.degenerate_probabilities += 1;
            let floored = if p == f64::INFINITY { f64::MAX } else { PROBABILITY_FLOOR };
            tracing::warn!(%err, floored, "flooring probability");
            floored
        }
    }
}

/// `new / old`, capped at [`RATIO_CAP`].
fn bounded_ratio(new: f64, old: f64, stats: &mut UpdateStats) -> f64 {
    let ratio = new / old;
    if ratio <= RATIO_CAP {
        return ratio;
    }
    stats.degenerate_probabilities += 1;
    tracing::warn!(ratio, cap = RATIO_CAP, "capping probability ratio");
    RATIO_CAP
}

impl<E: EnvironmentAdapter> Learner for PpoTrainer<E> {
    fn tick(&mut self, rng: &mut dyn UniformSource) -> Result<TickOutcome, RlError> {
        PpoTrainer::tick(self, rng)
    }

    fn reset(&mut self) {
        PpoTrainer::reset(self);
    }
}
