// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types and handling for the server.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields: {0}")]
    MissingFields(String),

    #[error("Invalid scale: {0}")]
    InvalidScale(String),

    #[error("No active building rules for {city} ({pincode})")]
    RulesNotFound { city: String, pincode: String },

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Join error")]
    Join(#[from] tokio::task::JoinError),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingFields(_) => (StatusCode::BAD_REQUEST, "MISSING_FIELDS"),
            ApiError::InvalidScale(_) => (StatusCode::BAD_REQUEST, "INVALID_SCALE"),
            ApiError::RulesNotFound { .. } => (StatusCode::NOT_FOUND, "RULES_NOT_FOUND"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Join(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TASK_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            status: "error",
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<plancheck_core::Error> for ApiError {
    fn from(err: plancheck_core::Error) -> Self {
        match err {
            plancheck_core::Error::InvalidScale(reason) => ApiError::InvalidScale(reason),
            plancheck_core::Error::UnknownUnit(unit) => {
                ApiError::InvalidScale(format!("unknown unit '{}'", unit))
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
