/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - AuthError を HTTP status / エラーコードへ変換
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::{AuthError, LookupError};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { code: &'static str, message: String },

    #[error("forbidden")]
    Forbidden,

    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            code: "UNAUTHORIZED",
            message: "unauthorized".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized { code, message } => (StatusCode::UNAUTHORIZED, code, message),
            AppError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN", "forbidden".into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            // The user store being down is our problem, not the client's.
            AuthError::IdentityNotFound {
                source: LookupError::Backend(_),
                ..
            }
            | AuthError::Signing
            | AuthError::EmptySubject => AppError::Internal,
            other => AppError::Unauthorized {
                code: other.code(),
                message: other.to_string(),
            },
        }
    }
}
