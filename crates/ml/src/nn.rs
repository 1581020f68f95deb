use crate::error::{Head, MlError};
use crate::types::ACTION_COUNT;
use serde::{Deserialize, Serialize};

/// A single-layer linear scorer with one weight per feature dimension.
///
/// The same weight vector is broadcast across every action slot, so all
/// entries of [`score`](LinearModel::score) are equal and an untrained or
/// trained policy alike samples uniformly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinearModel {
    weights: Vec<f64>,
}

impl LinearModel {
    /// Creates a model from explicit weights.
    #[must_use]
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// All-zero weights of the given length.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self::new(vec![0.0; dim])
    }

    /// Weights drawn uniformly from `[-limit, limit)`.
    pub fn uniform(dim: usize, limit: f64, rng: &mut fastrand::Rng) -> Self {
        let weights = (0..dim)
            .map(|_| rng.f64() * 2.0 * limit - limit)
            .collect();
        Self::new(weights)
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.weights.len()
    }

    fn check_dim(&self, features: &[f64]) -> Result<(), MlError> {
        if features.len() == self.weights.len() {
            Ok(())
        } else {
            Err(MlError::DimensionMismatch {
                expected: self.weights.len(),
                found: features.len(),
            })
        }
    }

    /// `Σ_j w[j] · x[j]`.
    ///
    /// # Errors
    ///
    /// [`MlError::DimensionMismatch`] if `features` and the weights differ in length.
    pub fn dot(&self, features: &[f64]) -> Result<f64, MlError> {
        self.check_dim(features)?;
        Ok(self
            .weights
            .iter()
            .zip(features)
            .map(|(w, x)| w * x)
            .sum())
    }

    /// Score vector over the action slots.
    ///
    /// # Errors
    ///
    /// [`MlError::DimensionMismatch`] if `features` and the weights differ in length.
    pub fn score(&self, features: &[f64]) -> Result<[f64; ACTION_COUNT], MlError> {
        let s = self.dot(features)?;
        Ok([s; ACTION_COUNT])
    }

    /// In-place step `w[j] -= scale * x[j]`.
    ///
    /// # Errors
    ///
    /// [`MlError::DimensionMismatch`] if `features` and the weights differ in length.
    pub fn descend(&mut self, scale: f64, features: &[f64]) -> Result<(), MlError> {
        self.check_dim(features)?;
        for (w, x) in self.weights.iter_mut().zip(features) {
            *w -= scale * x;
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`MlError::NonFiniteWeight`] naming the first NaN or infinite weight.
    pub fn ensure_finite(&self, head: Head) -> Result<(), MlError> {
        match self.weights.iter().position(|w| !w.is_finite()) {
            Some(index) => Err(MlError::NonFiniteWeight { head, index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_init_within_limit() {
        let mut rng = fastrand::Rng::with_seed(7);
        let m = LinearModel::uniform(4, 0.1, &mut rng);
        assert_eq!(m.dim(), 4);
        assert!(m.weights().iter().all(|w| (-0.1..0.1).contains(w)));
    }
}
