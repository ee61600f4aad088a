//! Error types for the gambler's ruin simulation

use thiserror::Error;

/// Errors raised while validating walk parameters or loading configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuinError {
    /// A walk or run parameter lies outside its meaningful range
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// An environment override could not be parsed
    #[error("invalid value {value:?} for environment variable {var}")]
    InvalidEnv { var: &'static str, value: String },
}

impl RuinError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        RuinError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RuinError>;
