#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Navigation World
//!
//! A minimal kinematic world host for the goal-seeking trainer.
//!
//! The world lives on the xz plane: the agent is a sphere that moves by a
//! fixed displacement per tick, the goal is a point, and obstacles are
//! spheres the agent must not overlap. There is no integration of forces and
//! no rendering; the world only answers the questions a trainer asks.
//!
//! ## Key Components
//!
//! -   **Vectors:** [`Vec3`] in the [`types`] module.
//! -   **World:** [`World`] in the [`world`] module, with [`WorldParams`]
//!     for speeds and radii and [`GoalPlacement`] for fixed or randomised
//!     goals.
//!
//! ```rust
//! use physics::{GoalPlacement, Vec3, World, WorldParams};
//!
//! let mut world = World::new(
//!     WorldParams::default(),
//!     Vec3::ZERO,
//!     GoalPlacement::Fixed(Vec3::new(0.0, 0.0, 3.0)),
//!     0,
//! );
//! world.move_agent(Vec3::FORWARD);
//! assert!(world.distance_to_goal() < 3.0);
//! ```

pub mod types;
pub mod world;

pub use types::{Obstacle, Vec3};
pub use world::{GoalPlacement, World, WorldParams};
