//! Error type for the trends endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

pub type TrendsResult<T> = Result<T, TrendsError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrendsError {
    #[error("channel '{0}' not found")]
    ChannelNotFound(String),

    #[error("invalid channel id '{0}'")]
    InvalidChannelId(String),

    #[error("invalid channel url '{0}'")]
    InvalidUrl(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid channel payload: {0}")]
    InvalidPayload(String),
}

impl TrendsError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            TrendsError::ChannelNotFound(_) => StatusCode::NOT_FOUND,
            TrendsError::InvalidChannelId(_)
            | TrendsError::InvalidUrl(_)
            | TrendsError::InvalidQuery(_)
            | TrendsError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for TrendsError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Trends request failed");
        } else {
            tracing::debug!(error = %self, status = %status, "Trends request rejected");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
