//! Typed error hierarchy for the roadmap service.
//!
//! `StatusError` covers every refusal the status lifecycle can produce. The
//! HTTP layer maps each variant onto a status code; the CLI prints the
//! message as-is, so messages name the concrete reason.

use thiserror::Error;

/// Errors from status, post and organization operations.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{entity} {id} not found in organization {org_id}")]
    NotFound {
        entity: &'static str,
        id: i64,
        org_id: i64,
    },

    #[error("Organization {id} not found")]
    OrganizationNotFound { id: i64 },

    #[error("A status with key '{key}' already exists in organization {org_id}")]
    DuplicateKey { key: String, org_id: i64 },

    #[error(
        "Cannot delete '{key}': it is the last remaining status in organization {org_id}"
    )]
    LastStatus { key: String, org_id: i64 },

    #[error("Invalid reassignment target: {0}")]
    InvalidTarget(String),

    #[error("Invalid status order: {0}")]
    InvalidOrder(String),

    #[error("Status delete could not be committed and was rolled back: {0}")]
    TransactionFailure(#[source] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[source] anyhow::Error),
}

impl StatusError {
    pub fn status_not_found(id: i64, org_id: i64) -> Self {
        Self::NotFound {
            entity: "Status",
            id,
            org_id,
        }
    }

    pub fn post_not_found(id: i64, org_id: i64) -> Self {
        Self::NotFound {
            entity: "Post",
            id,
            org_id,
        }
    }

    pub fn board_not_found(id: i64, org_id: i64) -> Self {
        Self::NotFound {
            entity: "Board",
            id,
            org_id,
        }
    }
}

impl From<rusqlite::Error> for StatusError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.into())
    }
}

/// Result alias for status operations.
pub type StatusResult<T> = std::result::Result<T, StatusError>;
