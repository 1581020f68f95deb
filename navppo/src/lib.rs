#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # navppo
//!
//! Application layer of the navigation trainer. It ties the workspace crates
//! together:
//!
//! -   [`scenario`] turns a JSON scene into a world;
//! -   [`rl`] wraps the world in a [`rl::NavigationEnv`] and trains either a
//!     [`rl::PpoTrainer`] or a [`rl::QLearningAgent`] under an
//!     [`rl::EpisodeDriver`];
//! -   the `ml` crate provides the linear heads and the softmax policy
//!     underneath.
//!
//! The world is built on a host thread and handed to the driver over a
//! one-shot channel; the driver does not tick until it arrives.
//!
//! ## Modules
//!
//! -   [`cli`]: flags and how they override the file configuration.
//! -   [`config`]: [`config::AppConfig`], the JSON run configuration.
//! -   [`report`]: per-episode CSV output.
//! -   [`app`]: the run itself.

pub mod app;
pub mod cli;
pub mod config;
pub mod report;
