use async_trait::async_trait;
use thiserror::Error;

use crate::models::UserRecord;

/// Errors a gateway call can end in, apart from a conflict.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a status the caller does not handle
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Result of a create or update the server accepted or rejected as a conflict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    /// Stored record as returned by the server (id assigned on create).
    Saved(UserRecord),
    /// A unique field (username, email) is already taken.
    Conflict(String),
}

/// Operations the users screen needs from the backend of record.
#[async_trait]
pub trait UsersGateway: Send + Sync {
    async fn list(&self) -> Result<Vec<UserRecord>, GatewayError>;

    async fn create(&self, record: &UserRecord) -> Result<MutationOutcome, GatewayError>;

    async fn update(&self, id: i64, record: &UserRecord) -> Result<MutationOutcome, GatewayError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), GatewayError>;
}
