//! Error types for the simulation kernel.
//!
//! Only the edges of the kernel can fail: scenario generation with unusable
//! parameters and external overrides of particle state. The per-tick solver and
//! integrator are infallible.

use thiserror::Error;

/// Main error type for particula_core operations.
#[derive(Error, Debug)]
pub enum SimError {
    /// Scenario parameters that cannot produce a valid particle set
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Particle index outside the current set
    #[error("Particle index {index} out of range (len {len})")]
    ParticleIndex { index: usize, len: usize },

    /// NaN or infinite value supplied from outside the kernel
    #[error("Non-finite value for {0}")]
    NonFinite(&'static str),

    /// Configuration rejected by validation
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for particula_core operations.
pub type Result<T> = std::result::Result<T, SimError>;

impl SimError {
    /// Creates a new invalid-parameter error.
    #[must_use]
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

impl From<anyhow::Error> for SimError {
    fn from(err: anyhow::Error) -> Self {
        Self::Config(err.to_string())
    }
}
