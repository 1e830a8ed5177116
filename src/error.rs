//! Error types for the vector vault core

use thiserror::Error;

use crate::client::ClientError;

/// Main error type for the vector vault core
#[derive(Error, Debug)]
pub enum VaultError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("Unknown sort mode: {0}")]
    UnknownSort(String),

    #[error("Unknown feed tab: {0}")]
    UnknownTab(String),

    #[error("Unknown document slot: {0}")]
    UnknownDocumentSlot(String),

    #[error("Invalid tier: {0}")]
    InvalidTier(u8),

    #[error("Score out of range for {id}: {score}")]
    ScoreOutOfRange { id: String, score: u32 },

    #[error("Challenge not found: {0}")]
    ChallengeNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Visualization not found: {0}")]
    VisualizationNotFound(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl From<serde_json::Error> for VaultError {
    fn from(err: serde_json::Error) -> Self {
        VaultError::DeserializationError(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<VaultError> for pyo3::PyErr {
    fn from(err: VaultError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};

        match err {
            VaultError::ChallengeNotFound(_)
            | VaultError::UserNotFound(_)
            | VaultError::VisualizationNotFound(_) => PyKeyError::new_err(err.to_string()),
            VaultError::Io(_) | VaultError::Client(_) => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the vector vault core
pub type Result<T> = std::result::Result<T, VaultError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_is_transparent() {
        let err = VaultError::from(ClientError::InvalidCredentials);
        assert_eq!(err.to_string(), ClientError::InvalidCredentials.to_string());
    }

    #[test]
    fn test_json_error_maps_to_deserialization() {
        let err = serde_json::from_str::<u8>("not json").unwrap_err();
        assert!(matches!(
            VaultError::from(err),
            VaultError::DeserializationError(_)
        ));
    }
}
