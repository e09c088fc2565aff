//! レコードAPIハンドラー

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use sealed_record_common::{error::StoreError, protocol::WriteRecordRequest, types::Record};
use tracing::{debug, info};

use super::error::AppError;
use crate::AppState;

/// GET / - 現在のレコードを取得
pub async fn get_record(State(state): State<AppState>) -> Json<Record> {
    Json(state.store.get().await)
}

/// POST / - レコードを上書き（成功時はボディ無しの200）
///
/// JSONとして読めないボディ（Content-Type欠落、型不一致を含む）は署名無しとして扱う。
pub async fn write_record(
    State(state): State<AppState>,
    body: Result<Json<WriteRecordRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!("Unreadable write body: {}", rejection.body_text());
            return Err(AppError(StoreError::SignatureRequired));
        }
    };
    let data_included = req.present_data().is_some();
    state.store.put(req).await?;
    info!(data_included, "Record overwritten");
    Ok(StatusCode::OK)
}
