#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Goal-seeking reinforcement learning
//!
//! On-policy training for an agent that must reach a goal while avoiding
//! obstacles, plus the pieces that drive it.
//!
//! ## Key Components
//!
//! -   **Rollouts:** [`RolloutBuffer`] and [`compute_advantages`] in
//!     [`buffer`]. One-step TD advantages with a zero bootstrap.
//! -   **Trainer:** [`PpoTrainer`] in [`ppo`]. Collects one rollout per
//!     episode and runs the clipped multi-epoch update when it terminates.
//! -   **Tabular agent:** [`QLearningAgent`] in [`qlearning`], sharing the
//!     same environment contract.
//! -   **Environment:** [`NavigationEnv`] in [`env`], the adapter over
//!     [`physics::World`].
//! -   **Driver:** [`EpisodeDriver`] in [`driver`], which ticks any
//!     [`Learner`] and keeps the episode counters.
//!
//! ```rust
//! use ml::Replay;
//! use physics::{GoalPlacement, Vec3, World, WorldParams};
//! use rl::{NavigationEnv, PpoTrainer, TrainerConfig};
//!
//! let world = World::new(
//!     WorldParams::default(),
//!     Vec3::ZERO,
//!     GoalPlacement::Fixed(Vec3::on_plane(0.0, 0.5)),
//!     0,
//! );
//! let env = NavigationEnv::new(world, 500);
//! let mut trainer = PpoTrainer::new(env, TrainerConfig::default(), 0).unwrap();
//! let outcome = trainer.tick(&mut Replay::constant(0.0)).unwrap();
//! assert!(outcome.terminated);
//! ```

pub mod buffer;
pub mod config;
pub mod driver;
pub mod env;
pub mod error;
pub mod ppo;
pub mod qlearning;

pub use buffer::{compute_advantages, RolloutBuffer, Transition};
pub use config::{DriverConfig, QLearningConfig, TrainerConfig};
pub use driver::{EpisodeDriver, EpisodeSummary};
pub use env::{NavigationEnv, Termination};
pub use error::RlError;
pub use ppo::{Phase, PpoTrainer, TickOutcome, UpdateStats, WeightsSnapshot, RATIO_CAP};
pub use qlearning::{GridCell, QLearningAgent};

use ml::UniformSource;

/// Anything the [`EpisodeDriver`] can tick.
pub trait Learner {
    /// Runs one sense, act, store cycle.
    ///
    /// # Errors
    ///
    /// Implementation specific; see [`RlError::is_recoverable`].
    fn tick(&mut self, rng: &mut dyn UniformSource) -> Result<TickOutcome, RlError>;

    /// Abandons the current episode. Only valid between ticks.
    fn reset(&mut self);
}
