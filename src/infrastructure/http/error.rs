//! HTTP Error Handling
//!
//! 所有业务错误以 HTTP 200 + errno 的形式返回，消息直接展示给用户

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const INTERNAL_ERROR: i32 = 500;
    pub const SERVICE_UNAVAILABLE: i32 = 503;
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn errno(&self) -> i32 {
        match self {
            ApiError::BadRequest(_) => errno::BAD_REQUEST,
            ApiError::Internal(_) => errno::INTERNAL_ERROR,
            ApiError::ServiceUnavailable(_) => errno::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let errno = self.errno();
        let msg = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(errno = errno, error = %msg, "Bad request");
                msg
            }
            ApiError::Internal(msg) => {
                tracing::error!(errno = errno, error = %msg, "Internal server error");
                msg
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!(errno = errno, error = %msg, "Service unavailable");
                msg
            }
        };

        (StatusCode::OK, Json(ErrorResponse::new(errno, msg))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::Formula(_) | ApplicationError::EmptyText => {
                ApiError::BadRequest(e.to_string())
            }
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::Synthesis(_) => ApiError::ServiceUnavailable(e.to_string()),
            ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mixer::FormulaError;

    #[test]
    fn test_application_error_mapping() {
        let formula: ApiError = ApplicationError::from(FormulaError::EmptyFormula).into();
        assert_eq!(formula.errno(), errno::BAD_REQUEST);

        let empty: ApiError = ApplicationError::EmptyText.into();
        match empty {
            ApiError::BadRequest(msg) => assert_eq!(msg, "Please enter some text"),
            other => panic!("unexpected: {other:?}"),
        }

        let synthesis: ApiError = ApplicationError::Synthesis("boom".to_string()).into();
        match synthesis {
            ApiError::ServiceUnavailable(msg) => {
                assert_eq!(msg, "Failed to generate speech: boom")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
