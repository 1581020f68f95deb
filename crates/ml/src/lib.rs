#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Linear approximators for the navigation trainer
//!
//! This crate holds the numerical leaves of the trainer: the feature and action
//! types exchanged with the world, the single-layer [`LinearModel`] used for
//! both the policy head and the value head, and the [`SoftmaxPolicy`] that
//! turns policy scores into a categorical distribution.
//!
//! ## Key Components
//!
//! -   **Types:** [`FeatureVector`] and [`Action`], defined in [`types`].
//! -   **Models:** [`LinearModel`] in [`nn`]. One weight per feature
//!     dimension, broadcast across all action slots.
//! -   **Policy:** [`SoftmaxPolicy`] and the [`UniformSource`] randomness
//!     seam in [`policy`].
//! -   **Environment:** the [`EnvironmentAdapter`] boundary in [`env`].
//!
//! Nothing here owns training state. Weight mutation goes through
//! [`LinearModel::descend`], which only the trainer in the `rl` crate calls.

pub mod env;
pub mod error;
pub mod nn;
pub mod policy;
pub mod types;

pub use env::EnvironmentAdapter;
pub use error::{Head, MlError};
pub use nn::LinearModel;
pub use policy::{checked_probability, Replay, SoftmaxPolicy, UniformSource, PROBABILITY_FLOOR};
pub use types::{Action, FeatureVector, ACTION_COUNT, FEATURE_DIM};
