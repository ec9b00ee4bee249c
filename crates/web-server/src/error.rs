use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid team: '{0}'")]
    InvalidCandidate(String),

    #[error("Malformed vote payload: {0}")]
    MalformedPayload(String),

    /// A cast-vote attempt failed after validation. The write is at-most-once:
    /// nothing retries it, the caller just gets a server error.
    #[error("Failed to record the vote: {0}")]
    VoteFailed(#[source] database::DbError),

    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
}

/// Converts our custom `AppError` into an HTTP response.
///
/// This is the only place errors become status codes and bodies; no raw
/// driver error text ever reaches the external interface.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidCandidate(team) => {
                tracing::warn!(%team, "Received invalid 'team' property.");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid team specified. Should be one of 'TABS' or 'SPACES'".to_string(),
                )
            }
            AppError::MalformedPayload(reason) => {
                tracing::warn!(%reason, "Rejected malformed vote payload.");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid vote payload: expected a 'team' field".to_string(),
                )
            }
            AppError::VoteFailed(db_err) => {
                tracing::error!(error = ?db_err, "Unable to cast vote.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Unable to successfully cast vote! Please check the application logs for more details.".to_string(),
                )
            }
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
        };

        (status, message).into_response()
    }
}
