//! 通信プロトコル定義
//!
//! Agent↔Store間の通信メッセージ

use serde::{Deserialize, Serialize};

/// 署名欠落時のエラーメッセージ（ワイヤ上の文言）
pub const SIGNATURE_REQUIRED_MESSAGE: &str = "Signature is required";

/// データ欠落時のエラーメッセージ（`RequireData` ポリシー時）
pub const DATA_REQUIRED_MESSAGE: &str = "Data is required";

/// `POST /` リクエスト
///
/// `data` を省略すると Store は既存データを保持したまま署名だけを置き換える。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct WriteRecordRequest {
    /// 保存データ（省略可）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// 16進署名（必須だが、検証のためにデシリアライズ時は省略を許容）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl WriteRecordRequest {
    /// データと署名の両方を持つリクエストを作成
    pub fn signed(data: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
            signature: Some(signature.into()),
        }
    }

    /// 空でないデータを返す
    pub fn present_data(&self) -> Option<&str> {
        self.data.as_deref().filter(|d| !d.is_empty())
    }

    /// 空でない署名を返す
    pub fn present_signature(&self) -> Option<&str> {
        self.signature.as_deref().filter(|s| !s.is_empty())
    }
}

/// エラーレスポンス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// エラーメッセージ
    pub error: String,
}
