use axum::extract::rejection::BytesRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use resize_core::{ConfigError, ParseError, StorageError, TransformError};

/// ハンドラ境界で JSON に変換されるエラー
///
/// メッセージは原因をそのまま含める（汎用メッセージで隠さない）
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    Configuration(String),
    Processing(String),
    Upload(String),
    /// axum の抽出やルーティングで拒否された（413 / 405 など）
    Rejected(StatusCode, String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Processing(_) | AppError::Upload(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Rejected(status, _) => *status,
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        let status = rejection.status();
        let message = rejection.body_text();
        tracing::warn!(status = %status, error = %message, "request body rejected");
        AppError::Rejected(status, message)
    }
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        tracing::warn!(error = %err, "invalid request payload");
        AppError::BadRequest(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        tracing::error!(error = %err, "storage is not configured");
        AppError::Configuration(err.to_string())
    }
}

impl From<TransformError> for AppError {
    fn from(err: TransformError) -> Self {
        match &err {
            TransformError::DecodeFailed(_) => {
                tracing::warn!(error = %err, "image decode failed");
            }
            _ => tracing::error!(error = %err, "image processing failed"),
        }
        AppError::Processing(err.to_string())
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        tracing::error!(error = %err, "upload failed");
        AppError::Upload(format!("Failed to upload image: {err}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::BadRequest(msg)
            | AppError::Configuration(msg)
            | AppError::Processing(msg)
            | AppError::Upload(msg)
            | AppError::Rejected(_, msg) => msg,
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}
