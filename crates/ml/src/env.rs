use crate::types::{Action, FeatureVector};

/// Sensing and acting boundary between the trainer and the world host.
///
/// Inspired by classic frameworks like OpenAI Gym, but split the way a
/// tick-driven host works: the trainer first [`observe`]s, then asks the host
/// to [`act`], and finally calls [`reset_episode`] once the episode is over.
/// The host decides what counts as termination (goal reached, collision or
/// step cap all collapse to the same flag).
///
/// [`observe`]: EnvironmentAdapter::observe
/// [`act`]: EnvironmentAdapter::act
/// [`reset_episode`]: EnvironmentAdapter::reset_episode
pub trait EnvironmentAdapter {
    /// Current observation of the world.
    fn observe(&mut self) -> FeatureVector;

    /// Apply one action and return `(reward, terminated)`.
    fn act(&mut self, action: Action) -> (f64, bool);

    /// Put the world back into its starting configuration.
    fn reset_episode(&mut self);
}

impl<E: EnvironmentAdapter + ?Sized> EnvironmentAdapter for Box<E> {
    fn observe(&mut self) -> FeatureVector {
        (**self).observe()
    }

    fn act(&mut self, action: Action) -> (f64, bool) {
        (**self).act(action)
    }

    fn reset_episode(&mut self) {
        (**self).reset_episode();
    }
}
