use ml::{Action, EnvironmentAdapter, FeatureVector};
use physics::{Vec3, World};

/// Reward for reaching the goal.
pub const GOAL_REWARD: f64 = 1.0;
/// Reward for touching an obstacle.
pub const COLLISION_REWARD: f64 = -1.0;
/// Per-step cost while neither happened.
pub const STEP_REWARD: f64 = -0.01;

/// Why the last episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    GoalReached,
    Collision,
    StepCap,
}

/// Adapter exposing a [`World`] through [`EnvironmentAdapter`].
///
/// Owns the per-episode step count so it can enforce the step cap itself.
pub struct NavigationEnv {
    world: World,
    max_episode_steps: u32,
    steps: u32,
    termination: Option<Termination>,
}

impl NavigationEnv {
    #[must_use]
    pub fn new(world: World, max_episode_steps: u32) -> Self {
        Self {
            world,
            max_episode_steps: max_episode_steps.max(1),
            steps: 0,
            termination: None,
        }
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Acts taken since the last reset.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Cause of the most recent termination. Survives resets.
    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[must_use]
    pub fn direction(action: Action) -> Vec3 {
        match action {
            Action::Forward => Vec3::FORWARD,
            Action::Backward => Vec3::BACK,
            Action::Left => Vec3::LEFT,
            Action::Right => Vec3::RIGHT,
        }
    }
}

impl EnvironmentAdapter for NavigationEnv {
    fn observe(&mut self) -> FeatureVector {
        let agent = self.world.agent();
        let goal = self.world.goal();
        FeatureVector::navigation(agent.x, agent.z, goal.x, goal.z)
    }

    fn act(&mut self, action: Action) -> (f64, bool) {
        self.world.move_agent(Self::direction(action));
        self.steps += 1;

        let (reward, termination) = if self.world.reached_goal() {
            (GOAL_REWARD, Some(Termination::GoalReached))
        } else if self.world.hit_obstacle() {
            (COLLISION_REWARD, Some(Termination::Collision))
        } else if self.steps >= self.max_episode_steps {
            (STEP_REWARD, Some(Termination::StepCap))
        } else {
            (STEP_REWARD, None)
        };

        if let Some(cause) = termination {
            tracing::debug!(?cause, steps = self.steps, "episode terminated");
            self.termination = Some(cause);
        }
        (reward, termination.is_some())
    }

    fn reset_episode(&mut self) {
        self.world.reset();
        self.steps = 0;
    }
}
