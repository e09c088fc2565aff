//! 設定管理
//!
//! StoreConfig, AgentConfig等の設定構造体と環境変数ヘルパー

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::DEFAULT_RECORD_DATA;

/// Get an environment variable with fallback to a secondary name
///
/// If the primary variable is set, returns its value.
/// If only the fallback variable is set, returns its value.
pub fn get_env_with_fallback(name: &str, fallback: &str) -> Option<String> {
    if let Ok(val) = std::env::var(name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(fallback) {
        tracing::debug!("Environment variable '{}' not set, using '{}'", name, fallback);
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(name: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(name, fallback).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    name: &str,
    fallback: &str,
    default: T,
) -> T {
    get_env_with_fallback(name, fallback)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// `true/1/yes/on` を真として解釈する
pub fn get_env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| {
            matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            )
        })
        .unwrap_or(false)
}

/// Store の書き込みポリシー
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WritePolicy {
    /// 署名のみの書き込みを許可する（データは前回値を保持）
    #[default]
    AllowSignatureOnly,
    /// データと署名の両方を要求する
    RequireData,
}

/// push成功時にバックアップを更新する条件
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BackupPolicy {
    /// Store が書き込みを受理した時点で更新
    #[default]
    OnAck,
    /// 再取得したレコードが送信内容と一致した場合のみ更新
    Confirmed,
}

/// 署名不一致かつバックアップ無しの場合の扱い
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoBackupPolicy {
    /// 「有効」と報告する
    #[default]
    ReportValid,
    /// 「検証不能」と報告する
    ReportUnverifiable,
}

/// Record Store設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// 起動時のレコードデータ (デフォルト: "Hello World")
    #[serde(default = "default_initial_data")]
    pub initial_data: String,

    /// 書き込みポリシー (デフォルト: 署名のみの書き込みを許可)
    #[serde(default)]
    pub write_policy: WritePolicy,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_initial_data() -> String {
    DEFAULT_RECORD_DATA.to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            initial_data: default_initial_data(),
            write_policy: WritePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        let write_policy = if get_env_flag("SEALED_RECORD_REQUIRE_DATA") {
            WritePolicy::RequireData
        } else {
            WritePolicy::AllowSignatureOnly
        };

        Self {
            host: get_env_with_fallback_or("SEALED_RECORD_HOST", "HOST", &default_host()),
            port: get_env_with_fallback_parse("SEALED_RECORD_PORT", "PORT", default_port()),
            initial_data: default_initial_data(),
            write_policy,
        }
    }

    /// バインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Signing Agent設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Record StoreのURL (デフォルト: "http://localhost:8080")
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// HTTPリクエストタイムアウト（秒）(デフォルト: 10)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// バックアップ更新ポリシー
    #[serde(default)]
    pub backup_policy: BackupPolicy,

    /// バックアップ無し時の検証結果ポリシー
    #[serde(default)]
    pub no_backup_policy: NoBackupPolicy,

    /// ローカルストレージのディレクトリ（未指定時はOS標準のデータディレクトリ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_store_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            store_url: default_store_url(),
            request_timeout_secs: default_request_timeout(),
            backup_policy: BackupPolicy::default(),
            no_backup_policy: NoBackupPolicy::default(),
            data_dir: None,
        }
    }
}

impl AgentConfig {
    /// 環境変数から読み込む
    pub fn from_env() -> Self {
        let backup_policy = if get_env_flag("SEALED_RECORD_CONFIRM_BACKUP") {
            BackupPolicy::Confirmed
        } else {
            BackupPolicy::OnAck
        };
        let no_backup_policy = if get_env_flag("SEALED_RECORD_STRICT_VERIFY") {
            NoBackupPolicy::ReportUnverifiable
        } else {
            NoBackupPolicy::ReportValid
        };

        Self {
            store_url: get_env_with_fallback_or(
                "SEALED_RECORD_STORE_URL",
                "STORE_URL",
                &default_store_url(),
            ),
            request_timeout_secs: get_env_with_fallback_parse(
                "SEALED_RECORD_REQUEST_TIMEOUT_SECS",
                "REQUEST_TIMEOUT_SECS",
                default_request_timeout(),
            ),
            backup_policy,
            no_backup_policy,
            data_dir: std::env::var_os("SEALED_RECORD_AGENT_DATA_DIR").map(PathBuf::from),
        }
    }
}
