//! # Kinematic Navigation World
//!
//! [`World`] tracks the agent, the goal and the obstacle set, and exposes the
//! three queries a trainer needs: how far the goal is, whether the agent
//! overlaps an obstacle, and where everything sits after a move.

use crate::types::{Obstacle, Vec3};

/// Tunable constants of the world.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldParams {
    /// Distance units per second.
    pub move_speed: f64,
    /// Seconds per tick.
    pub dt: f64,
    /// The goal counts as reached strictly inside this distance.
    pub goal_radius: f64,
    /// Radius of the agent sphere used for obstacle overlap.
    pub agent_radius: f64,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            dt: 0.02,
            goal_radius: 1.0,
            agent_radius: 0.5,
        }
    }
}

/// Where the goal goes on every reset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GoalPlacement {
    Fixed(Vec3),
    /// Integer cell drawn from `[0, grid_size)` on both axes.
    Random { grid_size: u32 },
}

pub struct World {
    pub params: WorldParams,
    pub obstacles: Vec<Obstacle>,
    agent: Vec3,
    agent_start: Vec3,
    goal: Vec3,
    placement: GoalPlacement,
    rng: fastrand::Rng,
}

impl World {
    /// Creates a world with the agent at `agent_start` and the goal placed
    /// according to `placement`. `seed` drives random goal placement.
    #[must_use]
    pub fn new(params: WorldParams, agent_start: Vec3, placement: GoalPlacement, seed: u64) -> Self {
        let mut world = Self {
            params,
            obstacles: Vec::new(),
            agent: agent_start,
            agent_start,
            goal: Vec3::ZERO,
            placement,
            rng: fastrand::Rng::with_seed(seed),
        };
        world.place_goal();
        world
    }

    /// Adds an obstacle and returns its index.
    pub fn add_obstacle(&mut self, center: Vec3, radius: f64) -> usize {
        self.obstacles.push(Obstacle::new(center, radius));
        self.obstacles.len() - 1
    }

    #[must_use]
    pub fn agent(&self) -> Vec3 {
        self.agent
    }

    #[must_use]
    pub fn goal(&self) -> Vec3 {
        self.goal
    }

    /// Teleports the agent without touching its start position.
    pub fn set_agent(&mut self, pos: Vec3) {
        self.agent = pos;
    }

    /// Moves the agent by `direction * move_speed * dt`.
    pub fn move_agent(&mut self, direction: Vec3) {
        self.agent += direction * (self.params.move_speed * self.params.dt);
    }

    #[must_use]
    pub fn distance_to_goal(&self) -> f64 {
        self.agent.distance(self.goal)
    }

    #[must_use]
    pub fn reached_goal(&self) -> bool {
        self.distance_to_goal() < self.params.goal_radius
    }

    #[must_use]
    pub fn hit_obstacle(&self) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.overlaps(self.agent, self.params.agent_radius))
    }

    /// Agent back to its start; goal re-placed when placement is random.
    pub fn reset(&mut self) {
        self.agent = self.agent_start;
        self.place_goal();
    }

    fn place_goal(&mut self) {
        self.goal = match self.placement {
            GoalPlacement::Fixed(pos) => pos,
            GoalPlacement::Random { grid_size } => {
                let n = grid_size.max(1);
                let x = self.rng.u32(0..n);
                let z = self.rng.u32(0..n);
                Vec3::on_plane(f64::from(x), f64::from(z))
            }
        };
        tracing::debug!(x = self.goal.x, z = self.goal.z, "goal placed");
    }
}
