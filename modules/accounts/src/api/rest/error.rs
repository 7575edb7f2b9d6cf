use std::fmt::Display;

use api_errors::{ErrDef, ProblemResponse, ValidationError};
use axum::extract::rejection::PathRejection;

use crate::domain::error::DomainError;

// Error catalog of the accounts REST API

pub const ACCOUNTS_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Not Found",
    code: "ACCOUNTS_NOT_FOUND",
    type_url: "https://errors.example.com/ACCOUNTS_NOT_FOUND",
};

pub const ACCOUNTS_VALIDATION: ErrDef = ErrDef {
    status: 400,
    title: "Bad Request",
    code: "ACCOUNTS_VALIDATION",
    type_url: "https://errors.example.com/ACCOUNTS_VALIDATION",
};

pub const ACCOUNTS_UNSUPPORTED_MEDIA_TYPE: ErrDef = ErrDef {
    status: 415,
    title: "Unsupported Media Type",
    code: "ACCOUNTS_UNSUPPORTED_MEDIA_TYPE",
    type_url: "https://errors.example.com/ACCOUNTS_UNSUPPORTED_MEDIA_TYPE",
};

pub const INTERNAL_DB: ErrDef = ErrDef {
    status: 500,
    title: "Internal Server Error",
    code: "INTERNAL_DB",
    type_url: "https://errors.example.com/INTERNAL_DB",
};

/// 404 for an id that has no account (or cannot have one).
pub fn account_not_found(id: impl Display, instance: &str) -> ProblemResponse {
    ACCOUNTS_NOT_FOUND.respond(format!("Account with id [{id}] not found."), instance)
}

/// 400 for a body that failed structural decoding.
pub fn invalid_body(err: &serde_json::Error, instance: &str) -> ProblemResponse {
    ACCOUNTS_VALIDATION.respond(format!("Invalid request body: {err}"), instance)
}

/// 400 for a path id that is not a non-negative integer.
pub fn invalid_path_id(err: &PathRejection, instance: &str) -> ProblemResponse {
    ACCOUNTS_VALIDATION.respond(
        format!("Invalid account id: {}", err.body_text()),
        instance,
    )
}

/// Map domain error to RFC9457 ProblemResponse
pub fn map_domain_error(e: &DomainError, instance: &str) -> ProblemResponse {
    match e {
        DomainError::AccountNotFound { id } => account_not_found(id, instance),
        DomainError::Validation { field, message } => {
            let mut resp = ACCOUNTS_VALIDATION.respond(e.to_string(), instance);
            resp.0 = resp.0.with_errors(vec![ValidationError {
                detail: message.clone(),
                pointer: format!("/{field}"),
            }]);
            resp
        }
        DomainError::Database { .. } => {
            // Log the internal error details but don't expose them to the client
            tracing::error!(error = ?e, "Database error occurred");
            INTERNAL_DB.respond("An internal database error occurred", instance)
        }
    }
}
