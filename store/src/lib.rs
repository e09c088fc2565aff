//! Sealed Record Store
//!
//! 署名付きレコードを1件だけメモリ上に保持する、検証を行わないストア

#![warn(missing_docs)]

/// REST APIハンドラー
pub mod api;

/// CLIオプション
pub mod cli;

/// レコード保持（単一レコード、後勝ち）
pub mod record;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// レコードストア
    pub store: record::RecordStore,
}
