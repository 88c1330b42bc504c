//! Error types for ezpay-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use ezpay_core::error::{DefaultErrorLogger, ErrorCode, ErrorContext, ErrorDetails, ErrorLogger};
use ezpay_core::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err.code() {
                ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
                ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::InvalidStatusTransition
                | ErrorCode::AlreadyProcessed
                | ErrorCode::DuplicateEntry => StatusCode::CONFLICT,
            },
        }
    }

    pub fn details(&self) -> ErrorDetails {
        match self {
            ApiError::BadRequest { message } => {
                ErrorDetails::new(ErrorCode::ValidationError, message.clone())
            }
            ApiError::Core(err) => err.to_details(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Core(err) => DefaultErrorLogger.log_error(err, &ErrorContext::new("http")),
            ApiError::BadRequest { message } => log::debug!("rejected request: {}", message),
        }
        (self.status(), Json(json!({ "error": self.details() }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
