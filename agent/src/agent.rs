//! 署名エージェント
//!
//! 鍵を持つ唯一の検証者。Storeは信頼しない。
//!
//! セッション状態: 鍵生成前 → 鍵準備完了 → (push | verify)* → 鍵準備完了。
//! `SigningAgent` は鍵を受け取って初めて構築できるため、鍵未生成の状態では操作できない。

use sealed_record_common::{
    config::{AgentConfig, BackupPolicy, NoBackupPolicy},
    error::AgentResult,
    protocol::WriteRecordRequest,
    types::{Backup, Record},
};
use tracing::{debug, info, warn};

use crate::client::RecordTransport;
use crate::key::SigningKey;
use crate::storage::LocalStorage;

/// 検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// 署名が一致した（またはバックアップ無しで `ReportValid`）
    Valid,
    /// 署名が一致せず、バックアップからの復元を試みた
    Tampered {
        /// 復元されたデータ（バックアップが不完全なら `None`）
        restored: Option<String>,
    },
    /// 署名が一致しないが、比較できるバックアップが無い
    Unverifiable,
}

/// push結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushReceipt {
    /// 署名したデータ
    pub data: String,
    /// 送信した16進署名
    pub signature: String,
    /// バックアップを更新したか
    pub backup_updated: bool,
}

/// 署名エージェント
pub struct SigningAgent<T, S> {
    key: SigningKey,
    transport: T,
    storage: S,
    data: String,
    backup_policy: BackupPolicy,
    no_backup_policy: NoBackupPolicy,
}

impl<T: RecordTransport, S: LocalStorage> SigningAgent<T, S> {
    /// 鍵・転送層・ローカルストレージを指定して作成
    pub fn new(key: SigningKey, transport: T, storage: S) -> Self {
        Self {
            key,
            transport,
            storage,
            data: String::new(),
            backup_policy: BackupPolicy::default(),
            no_backup_policy: NoBackupPolicy::default(),
        }
    }

    /// 新しいセッション鍵を生成して作成
    ///
    /// 鍵生成に失敗した場合はセッションを開始できない。
    pub fn initialize(transport: T, storage: S) -> AgentResult<Self> {
        let key = SigningKey::generate()?;
        info!("Session signing key generated");
        Ok(Self::new(key, transport, storage))
    }

    /// 設定のポリシーを適用
    pub fn with_config(self, config: &AgentConfig) -> Self {
        self.with_backup_policy(config.backup_policy)
            .with_no_backup_policy(config.no_backup_policy)
    }

    /// バックアップ更新ポリシーを設定
    pub fn with_backup_policy(mut self, policy: BackupPolicy) -> Self {
        self.backup_policy = policy;
        self
    }

    /// バックアップ無し時の検証結果ポリシーを設定
    pub fn with_no_backup_policy(mut self, policy: NoBackupPolicy) -> Self {
        self.no_backup_policy = policy;
        self
    }

    /// 作業中のデータ
    pub fn data(&self) -> &str {
        &self.data
    }

    /// 作業中のデータを編集（送信はしない）
    pub fn set_data(&mut self, data: impl Into<String>) {
        self.data = data.into();
    }

    /// ローカルストレージ
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Storeから取得したデータで作業中のデータを置き換える
    pub async fn refresh(&mut self) -> AgentResult<Record> {
        let record = self.transport.fetch().await?;
        self.data = record.data.clone();
        Ok(record)
    }

    /// セッション開始処理: 現在のレコードを取得し、新しい鍵で署名し直して送信
    pub async fn bootstrap(&mut self) -> AgentResult<PushReceipt> {
        self.refresh().await?;
        self.push(None).await
    }

    /// データに署名してStoreへ送信
    ///
    /// `new_data` が空または `None` の場合は作業中のデータに署名する。
    /// 送信に失敗した場合はリトライせず、バックアップも更新しない。
    pub async fn push(&mut self, new_data: Option<&str>) -> AgentResult<PushReceipt> {
        let data = match new_data.filter(|d| !d.is_empty()) {
            Some(d) => d.to_string(),
            None => self.data.clone(),
        };
        let signature = self.key.sign_hex(&data);
        let request = WriteRecordRequest::signed(data.clone(), signature.clone());

        self.transport.submit(&request).await?;
        info!(signature = %signature, "Record pushed");

        let backup = Backup {
            data: data.clone(),
            signature: signature.clone(),
        };

        let backup_updated = match self.backup_policy {
            BackupPolicy::OnAck => {
                self.storage.save_backup(&backup)?;
                self.refresh().await?;
                true
            }
            BackupPolicy::Confirmed => {
                let record = self.refresh().await?;
                if backup.matches(&record) {
                    self.storage.save_backup(&backup)?;
                    true
                } else {
                    warn!("Store does not report the pushed record; backup left unchanged");
                    false
                }
            }
        };

        Ok(PushReceipt {
            data,
            signature,
            backup_updated,
        })
    }

    /// Storeのレコードを取得して署名を検証
    ///
    /// 不一致かつバックアップがあれば改ざんとして復元する。
    /// 不一致でもバックアップが無い場合は `NoBackupPolicy` に従う。
    pub async fn verify(&mut self) -> AgentResult<VerifyOutcome> {
        let record = self.transport.fetch().await?;

        if self.key.verify_hex(&record.data, &record.signature) {
            debug!("Record signature verified");
            return Ok(VerifyOutcome::Valid);
        }

        if !self.storage.has_backup_data()? {
            warn!("Record signature mismatch, but no local backup to compare against");
            return Ok(match self.no_backup_policy {
                NoBackupPolicy::ReportValid => VerifyOutcome::Valid,
                NoBackupPolicy::ReportUnverifiable => VerifyOutcome::Unverifiable,
            });
        }

        warn!(
            signature = %record.signature,
            "Record has been tampered with, restoring backup"
        );
        let restored = self.recover_backup()?;
        Ok(VerifyOutcome::Tampered { restored })
    }

    /// バックアップから作業中のデータを復元（Storeへは送信しない）
    pub fn recover_backup(&mut self) -> AgentResult<Option<String>> {
        let Some(backup) = self.storage.load_backup()? else {
            debug!("No complete backup available");
            return Ok(None);
        };

        info!("Backup restored from storage");
        self.data = backup.data.clone();
        Ok(Some(backup.data))
    }
}
