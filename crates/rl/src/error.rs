use ml::MlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RlError {
    #[error(transparent)]
    Model(#[from] MlError),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("environment host closed before signalling readiness")]
    EnvironmentUnavailable,
}

impl RlError {
    /// `true` when training may continue after the agent is reset.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RlError::Model(e) if e.is_recoverable())
    }
}
