//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use sealed_record_common::{error::StoreError, protocol::ErrorResponse};
use tracing::warn;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub StoreError);

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            StoreError::SignatureRequired | StoreError::DataRequired => StatusCode::BAD_REQUEST,
        };

        warn!(status = %status, "Rejected write: {}", self.0);

        let payload = ErrorResponse {
            error: self.0.to_string(),
        };

        (status, Json(payload)).into_response()
    }
}
