use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Length of a navigation observation: agent x, agent z, goal x, goal z.
pub const FEATURE_DIM: usize = 4;

/// Number of discrete moves available to the agent.
pub const ACTION_COUNT: usize = 4;

/// An observation recorded at one tick.
///
/// The values are fixed once constructed; consumers only ever see a slice.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureVector(Box<[f64]>);

impl FeatureVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values.into_boxed_slice())
    }

    /// Builds the standard navigation observation in its fixed order.
    #[must_use]
    pub fn navigation(agent_x: f64, agent_z: f64, goal_x: f64, goal_z: f64) -> Self {
        Self::new(vec![agent_x, agent_z, goal_x, goal_z])
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Deref for FeatureVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; FEATURE_DIM]> for FeatureVector {
    fn from(values: [f64; FEATURE_DIM]) -> Self {
        Self::new(values.to_vec())
    }
}

/// Discrete movement command. The discriminant is the action index used by
/// the policy distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward = 0,
    Backward = 1,
    Left = 2,
    Right = 3,
}

impl Action {
    /// All actions, ordered by index.
    pub const ALL: [Action; ACTION_COUNT] =
        [Action::Forward, Action::Backward, Action::Left, Action::Right];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}
