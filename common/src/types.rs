//! 共通型定義
//!
//! Record, Backup等のコアデータ型

use serde::{Deserialize, Serialize};

/// Store 起動時のデフォルトデータ
pub const DEFAULT_RECORD_DATA: &str = "Hello World";

/// ローカルストレージ上のバックアップデータのキー
pub const BACKUP_DATA_KEY: &str = "backupData";

/// ローカルストレージ上のバックアップ署名のキー
pub const BACKUP_SIGNATURE_KEY: &str = "backupSignature";

/// Store が保持する唯一のレコード
///
/// `signature` は `data` に対する HMAC の16進文字列。Store 側では検証されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// 保存データ
    pub data: String,
    /// 16進エンコードされた署名（未署名時は空文字列）
    pub signature: String,
}

impl Record {
    /// 指定データで未署名のレコードを作成
    pub fn unsigned(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            signature: String::new(),
        }
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::unsigned(DEFAULT_RECORD_DATA)
    }
}

/// Agent 自身が最後に送信したレコードのスナップショット
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Backup {
    /// 送信したデータ
    pub data: String,
    /// 送信した署名（16進）
    pub signature: String,
}

impl Backup {
    /// このバックアップが指すレコードと一致するか
    pub fn matches(&self, record: &Record) -> bool {
        self.data == record.data && self.signature == record.signature
    }
}
