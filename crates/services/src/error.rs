//! Service error taxonomy.
//!
//! Every lifecycle operation fails with one of these typed variants; the
//! request boundary translates them into responses (and may deliberately
//! render NotFound and Forbidden alike for privacy). Internal never carries
//! database detail in its display text; the cause is logged where it occurs.

use domain::models::InvitationStateError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error")]
    Internal(String),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ServiceError::NotFound("Resource not found".into()),
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => ServiceError::Conflict("Resource already exists".into()),
                        "23503" => ServiceError::NotFound("Referenced resource not found".into()),
                        _ => ServiceError::Internal(format!("Database error: {}", db_err)),
                    }
                } else {
                    ServiceError::Internal(format!("Database error: {}", db_err))
                }
            }
            _ => ServiceError::Internal(format!("Database error: {}", err)),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| {
                    let detail = e
                        .message
                        .clone()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, detail)
                })
            })
            .collect();

        ServiceError::Validation(messages.join("; "))
    }
}

impl From<InvitationStateError> for ServiceError {
    fn from(err: InvitationStateError) -> Self {
        match err {
            InvitationStateError::NotAddressedToUser => ServiceError::Forbidden(err.to_string()),
            InvitationStateError::Disabled
            | InvitationStateError::AlreadySettled(_)
            | InvitationStateError::DirectOnly
            | InvitationStateError::LinkOnly => ServiceError::Conflict(err.to_string()),
        }
    }
}
