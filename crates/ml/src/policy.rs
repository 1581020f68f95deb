use crate::error::MlError;

/// Smallest probability the trainer will divide by.
pub const PROBABILITY_FLOOR: f64 = 1e-8;

/// Source of uniform samples in `[0, 1)`.
///
/// Each policy sample consumes exactly one value, so a fixed source gives a
/// fully reproducible trajectory.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

impl UniformSource for fastrand::Rng {
    fn next_uniform(&mut self) -> f64 {
        self.f64()
    }
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Replays a fixed list of samples, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct Replay {
    values: Vec<f64>,
    cursor: usize,
}

impl Replay {
    /// `None` when `values` is empty.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self { values, cursor: 0 })
    }

    /// A source that always yields `value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            values: vec![value],
            cursor: 0,
        }
    }
}

impl UniformSource for Replay {
    fn next_uniform(&mut self) -> f64 {
        let v = self.values[self.cursor];
        self.cursor = (self.cursor + 1) % self.values.len();
        v
    }
}

/// Categorical policy over softmax-normalised scores.
pub struct SoftmaxPolicy;

impl SoftmaxPolicy {
    /// `exp(s_i - max) / Σ_k exp(s_k - max)`.
    #[must_use]
    pub fn distribution(scores: &[f64]) -> Vec<f64> {
        let m = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let exp: Vec<f64> = scores.iter().map(|&s| (s - m).exp()).collect();
        let sum: f64 = exp.iter().sum();
        exp.iter().map(|&e| e / sum).collect()
    }

    /// First index whose running sum exceeds `u`, or the last index when
    /// rounding leaves the total short of `u`.
    #[must_use]
    pub fn sample(distribution: &[f64], u: f64) -> usize {
        let mut cumulative = 0.0;
        for (i, p) in distribution.iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                return i;
            }
        }
        distribution.len().saturating_sub(1)
    }

    /// Scores to a sampled index in one call.
    pub fn act(scores: &[f64], rng: &mut impl UniformSource) -> usize {
        let probs = Self::distribution(scores);
        Self::sample(&probs, rng.next_uniform())
    }
}

/// Accepts strictly positive, finite probabilities.
///
/// # Errors
///
/// [`MlError::DegenerateProbability`] for zero, negative, NaN or infinite input.
pub fn checked_probability(p: f64) -> Result<f64, MlError> {
    if p.is_finite() && p > 0.0 {
        Ok(p)
    } else {
        tracing::debug!(p, "rejecting degenerate probability");
        Err(MlError::DegenerateProbability(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_wraps() {
        let mut r = Replay::new(vec![0.1, 0.9]).unwrap();
        assert_eq!(r.next_uniform(), 0.1);
        assert_eq!(r.next_uniform(), 0.9);
        assert_eq!(r.next_uniform(), 0.1);
    }

    #[test]
    fn empty_replay_is_rejected() {
        assert!(Replay::new(Vec::new()).is_none());
    }

    #[test]
    fn degenerate_probabilities_rejected() {
        assert!(checked_probability(0.0).is_err());
        assert!(checked_probability(f64::NAN).is_err());
        assert!(checked_probability(f64::INFINITY).is_err());
        assert_eq!(checked_probability(0.25), Ok(0.25));
    }
}
