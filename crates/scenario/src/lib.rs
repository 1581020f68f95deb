#![deny(clippy::all, clippy::pedantic)]
//! # Scene definitions
//!
//! JSON description of a navigation arena: where the agent starts, how the
//! goal is placed and which obstacles stand in the way. A [`Scene`] is parsed
//! with [`Scene::from_str`], checked with [`Scene::validate`] and turned into
//! a [`physics::World`] with [`Scene::into_world`].
//!
//! ```rust
//! let scene = scenario::Scene::from_str(r#"{
//!     "agent_start": [0.0, 0.0],
//!     "goal": { "placement": "fixed", "pos": [3.0, 4.0] }
//! }"#).unwrap();
//! let world = scene.into_world(0).unwrap();
//! assert_eq!(world.distance_to_goal(), 5.0);
//! ```

use anyhow::{bail, Context, Result};
use physics::{GoalPlacement, Vec3, World, WorldParams};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scene {
    /// Agent start on the xz plane.
    #[serde(default)]
    pub agent_start: [f64; 2],
    pub goal: Goal,
    #[serde(default)]
    pub obstacles: Vec<ObstacleDef>,
    #[serde(default = "default_move_speed")]
    pub move_speed: f64,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,
    #[serde(default = "default_goal_radius")]
    pub goal_radius: f64,
    #[serde(default = "default_agent_radius")]
    pub agent_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "placement")]
pub enum Goal {
    #[serde(rename = "fixed")]
    Fixed { pos: [f64; 2] },
    #[serde(rename = "random")]
    Random { grid_size: u32 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ObstacleDef {
    pub id: String,
    pub pos: [f64; 2],
    pub radius: f64,
}

fn default_move_speed() -> f64 {
    WorldParams::default().move_speed
}

fn default_tick_seconds() -> f64 {
    WorldParams::default().dt
}

fn default_goal_radius() -> f64 {
    WorldParams::default().goal_radius
}

fn default_agent_radius() -> f64 {
    WorldParams::default().agent_radius
}

impl Default for Scene {
    /// Open 5x5 arena with a random goal and the agent at the origin.
    fn default() -> Self {
        Self {
            agent_start: [0.0, 0.0],
            goal: Goal::Random { grid_size: 5 },
            obstacles: Vec::new(),
            move_speed: default_move_speed(),
            tick_seconds: default_tick_seconds(),
            goal_radius: default_goal_radius(),
            agent_radius: default_agent_radius(),
        }
    }
}

impl Scene {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        Self::from_str(&json).with_context(|| format!("parsing scene {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("move_speed", self.move_speed),
            ("tick_seconds", self.tick_seconds),
            ("goal_radius", self.goal_radius),
            ("agent_radius", self.agent_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!("{name} must be positive, got {value}");
            }
        }
        if let Goal::Random { grid_size: 0 } = self.goal {
            bail!("goal grid_size must be at least 1");
        }
        let mut ids = HashSet::new();
        for obstacle in &self.obstacles {
            if !(obstacle.radius.is_finite() && obstacle.radius > 0.0) {
                bail!("obstacle {} radius must be positive, got {}", obstacle.id, obstacle.radius);
            }
            if !ids.insert(obstacle.id.as_str()) {
                bail!("duplicate obstacle id {}", obstacle.id);
            }
        }
        Ok(())
    }

    /// Validates the scene and builds the world. `seed` drives random goal
    /// placement.
    pub fn into_world(self, seed: u64) -> Result<World> {
        self.validate()?;
        let params = WorldParams {
            move_speed: self.move_speed,
            dt: self.tick_seconds,
            goal_radius: self.goal_radius,
            agent_radius: self.agent_radius,
        };
        let placement = match self.goal {
            Goal::Fixed { pos } => GoalPlacement::Fixed(on_plane(pos)),
            Goal::Random { grid_size } => GoalPlacement::Random { grid_size },
        };
        let mut world = World::new(params, on_plane(self.agent_start), placement, seed);
        for obstacle in self.obstacles {
            world.add_obstacle(on_plane(obstacle.pos), obstacle.radius);
        }
        Ok(world)
    }
}

fn on_plane([x, z]: [f64; 2]) -> Vec3 {
    Vec3::on_plane(x, z)
}
