use thiserror::Error;

/// Core domain errors
///
/// `Clone` so that a single failed lookup can be handed to every caller
/// that was waiting on it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Lookup error: {source_name} - {message}")]
    Lookup { source_name: String, message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn lookup(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}
