//! レコード保持
//!
//! 単一のレコードをメモリ内で管理する。署名の正しさは一切検証しない。
//!
//! 注意: デフォルトの `WritePolicy::AllowSignatureOnly` では、データを省略した書き込みで
//! 署名だけを差し替えられる。ストアに書き込める者はデータと署名の対応を切り離せるため、
//! これはプロトコル上の弱点である。`WritePolicy::RequireData` で両方を必須にできる。

use std::sync::Arc;

use sealed_record_common::{
    config::{StoreConfig, WritePolicy},
    error::{StoreError, StoreResult},
    protocol::WriteRecordRequest,
    types::Record,
};
use tokio::sync::RwLock;
use tracing::debug;

/// レコードストア
///
/// クローンは同じレコードを共有する。同時書き込みは後勝ちで、バージョン管理はしない。
#[derive(Clone)]
pub struct RecordStore {
    record: Arc<RwLock<Record>>,
    write_policy: WritePolicy,
}

impl RecordStore {
    /// デフォルトレコード（"Hello World"、未署名）でストアを作成
    pub fn new() -> Self {
        Self::with_record(Record::default(), WritePolicy::default())
    }

    /// 設定からストアを作成
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_record(
            Record::unsigned(config.initial_data.clone()),
            config.write_policy,
        )
    }

    /// 初期レコードと書き込みポリシーを指定して作成
    pub fn with_record(record: Record, write_policy: WritePolicy) -> Self {
        Self {
            record: Arc::new(RwLock::new(record)),
            write_policy,
        }
    }

    /// 書き込みポリシー
    pub fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// 現在のレコードを取得
    pub async fn get(&self) -> Record {
        self.record.read().await.clone()
    }

    /// レコードを上書き
    ///
    /// 署名が空または欠落していればエラーで、状態は変更しない。
    /// データが空または欠落していれば前回のデータを保持し、署名だけを置き換える。
    pub async fn put(&self, req: WriteRecordRequest) -> StoreResult<()> {
        let signature = req
            .present_signature()
            .ok_or(StoreError::SignatureRequired)?
            .to_string();
        let data = req.present_data().map(str::to_string);

        if data.is_none() && self.write_policy == WritePolicy::RequireData {
            return Err(StoreError::DataRequired);
        }

        let mut record = self.record.write().await;
        match data {
            Some(data) => record.data = data,
            None => debug!("Write without data, keeping previous data"),
        }
        record.signature = signature;
        Ok(())
    }
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}
