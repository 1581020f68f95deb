#![allow(dead_code)]

use ml::{Action, EnvironmentAdapter, FeatureVector};
use physics::{GoalPlacement, Vec3, World, WorldParams};
use rl::NavigationEnv;

/// Plays back a fixed trajectory, terminating on its last step.
pub struct Scripted {
    pub states: Vec<Vec<f64>>,
    pub rewards: Vec<f64>,
    pub cursor: usize,
    pub resets: usize,
    pub actions: Vec<Action>,
    /// Terminate after the last scripted step; otherwise wrap forever.
    pub terminal: bool,
}

impl Scripted {
    pub fn new(states: Vec<Vec<f64>>, rewards: Vec<f64>) -> Self {
        assert_eq!(states.len(), rewards.len());
        Self { states, rewards, cursor: 0, resets: 0, actions: Vec::new(), terminal: true }
    }

    pub fn endless(states: Vec<Vec<f64>>, rewards: Vec<f64>) -> Self {
        Self { terminal: false, ..Self::new(states, rewards) }
    }

    /// Random features in `[0, 1)` and rewards in `[-1, 1)`.
    pub fn random(len: usize, seed: u64) -> Self {
        let rng = fastrand::Rng::with_seed(seed);
        let states = (0..len).map(|_| (0..4).map(|_| rng.f64()).collect()).collect();
        let rewards = (0..len).map(|_| rng.f64() * 2.0 - 1.0).collect();
        Self::new(states, rewards)
    }
}

impl EnvironmentAdapter for Scripted {
    fn observe(&mut self) -> FeatureVector {
        FeatureVector::new(self.states[self.cursor % self.states.len()].clone())
    }

    fn act(&mut self, action: Action) -> (f64, bool) {
        self.actions.push(action);
        let reward = self.rewards[self.cursor % self.rewards.len()];
        self.cursor += 1;
        (reward, self.terminal && self.cursor == self.states.len())
    }

    fn reset_episode(&mut self) {
        self.cursor = 0;
        self.resets += 1;
    }
}

pub fn nav_env(agent: Vec3, goal: Vec3, max_episode_steps: u32) -> NavigationEnv {
    let world = World::new(WorldParams::default(), agent, GoalPlacement::Fixed(goal), 0);
    NavigationEnv::new(world, max_episode_steps)
}
