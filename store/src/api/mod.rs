//! REST APIハンドラー
//!
//! 単一レコードの取得・上書きAPI

pub mod error;
pub mod record;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// APIルーターを作成
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(record::get_record).post(record::write_record))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
