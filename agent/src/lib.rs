//! Sealed Record Agent
//!
//! クライアント側で署名鍵を保持し、送信データへの署名・取得データの検証・
//! 改ざん検知時のローカルバックアップからの復元を行う

#![warn(missing_docs)]

/// 署名鍵（HMAC-SHA256）と署名の16進変換
pub mod key;

/// Record Store通信クライアント
pub mod client;

/// ローカルのキーバリューストレージとバックアップ
pub mod storage;

/// 署名エージェント（push / verify / 復元）
pub mod agent;

/// CLIオプション
pub mod cli;

/// 対話コマンド
pub mod repl;

pub use agent::{PushReceipt, SigningAgent, VerifyOutcome};
