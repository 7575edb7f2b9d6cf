use thiserror::Error;

use crate::contract::model::AccountId;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Account with id [{id}] not found.")]
    AccountNotFound { id: AccountId },

    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn account_not_found(id: AccountId) -> Self {
        Self::AccountNotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

impl From<anyhow::Error> for DomainError {
    fn from(e: anyhow::Error) -> Self {
        // keep the whole context chain for the log line
        Self::database(format!("{e:#}"))
    }
}
