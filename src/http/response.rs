//! Error responses.
//!
//! Every failure is rendered as `{"error": "<message>"}`; no error codes
//! beyond the HTTP status are exposed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Failures surfaced to HTTP callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("No results found")]
    NoResults,

    #[error("Failed to fetch search data")]
    SearchUnavailable,

    #[error("Failed to fetch search results")]
    SearchMapping,

    #[error("Failed to fetch game data")]
    GameUnavailable,

    #[error("Incomplete game details")]
    IncompleteDetails,

    #[error("Failed to fetch game details")]
    DetailMapping,

    #[error("Not found")]
    RouteNotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NoResults | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::SearchUnavailable
            | ApiError::SearchMapping
            | ApiError::GameUnavailable
            | ApiError::IncompleteDetails
            | ApiError::DetailMapping => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::NoResults.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::IncompleteDetails.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::SearchUnavailable.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_status() {
        let response = ApiError::GameUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers()["content-type"],
            "application/json"
        );
    }
}
