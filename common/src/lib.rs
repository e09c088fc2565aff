//! Sealed Record 共通ライブラリ
//!
//! Store と Agent の間で共有する型・プロトコル・エラー・設定

#![warn(missing_docs)]

/// 共通型定義（Record, Backup）
pub mod types;

/// 通信プロトコル定義
pub mod protocol;

/// エラー型定義
pub mod error;

/// 設定管理
pub mod config;

/// ロギング初期化ユーティリティ
pub mod logging;
