use ml::{Action, FeatureVector};

/// One tick of experience.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: FeatureVector,
    pub action: Action,
    pub reward: f64,
    /// Value-head estimate of `state` at collection time.
    pub value_estimate: f64,
}

/// Transitions of the rollout in progress, plus their advantages once the
/// rollout has ended.
///
/// `advantages` stays empty while the rollout is open and has exactly one
/// entry per transition after [`compute_advantages`](Self::compute_advantages).
/// The buffer is created once and [`clear`](Self::clear)ed after every update.
#[derive(Debug, Default)]
pub struct RolloutBuffer {
    transitions: Vec<Transition>,
    advantages: Vec<f64>,
}

impl RolloutBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            transitions: Vec::with_capacity(capacity),
            advantages: Vec::with_capacity(capacity),
        }
    }

    /// Appends a transition. Any previously computed advantages belong to a
    /// closed rollout and are dropped.
    pub fn push(&mut self, transition: Transition) {
        self.advantages.clear();
        self.transitions.push(transition);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    #[must_use]
    pub fn advantages(&self) -> &[f64] {
        &self.advantages
    }

    /// Closes the rollout and fills the advantages.
    pub fn compute_advantages(&mut self, gamma: f64) -> &[f64] {
        let rewards: Vec<f64> = self.transitions.iter().map(|t| t.reward).collect();
        let values: Vec<f64> = self.transitions.iter().map(|t| t.value_estimate).collect();
        self.advantages = compute_advantages(&rewards, &values, gamma);
        &self.advantages
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
        self.advantages.clear();
    }
}

/// One-step TD advantages, walked back to front.
///
/// The value after the final transition is taken as zero: every rollout ends
/// at a terminal state.
///
/// # Panics
///
/// Panics if `rewards` and `values` differ in length.
#[must_use]
pub fn compute_advantages(rewards: &[f64], values: &[f64], gamma: f64) -> Vec<f64> {
    assert_eq!(rewards.len(), values.len(), "rewards and values must align");
    let mut advantages = vec![0.0; rewards.len()];
    let mut last_value = 0.0;
    for i in (0..rewards.len()).rev() {
        advantages[i] = rewards[i] + gamma * last_value - values[i];
        last_value = values[i];
    }
    advantages
}
