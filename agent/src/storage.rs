//! ローカルストレージ
//!
//! 文字列キーバリューの永続化層と、その上に載るバックアップ
//! (`backupData` / `backupSignature`) の読み書き

use sealed_record_common::{
    config::AgentConfig,
    error::{AgentError, AgentResult, CommonError},
    types::{Backup, BACKUP_DATA_KEY, BACKUP_SIGNATURE_KEY},
};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// ストレージファイル名
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// ローカルのキーバリューストレージ
pub trait LocalStorage {
    /// 値を取得
    fn get_item(&self, key: &str) -> AgentResult<Option<String>>;

    /// 複数の値をまとめて書き込む
    fn set_items(&mut self, items: &[(&str, &str)]) -> AgentResult<()>;

    /// 値を書き込む
    fn set_item(&mut self, key: &str, value: &str) -> AgentResult<()> {
        self.set_items(&[(key, value)])
    }

    /// 空でないバックアップデータが存在するか
    fn has_backup_data(&self) -> AgentResult<bool> {
        Ok(self
            .get_item(BACKUP_DATA_KEY)?
            .is_some_and(|data| !data.is_empty()))
    }

    /// バックアップを書き込む（データと署名を同時に）
    ///
    /// データが空の場合は署名のみ更新し、既存の `backupData` は残す。
    fn save_backup(&mut self, backup: &Backup) -> AgentResult<()> {
        if backup.data.is_empty() {
            return self.set_item(BACKUP_SIGNATURE_KEY, backup.signature.as_str());
        }
        self.set_items(&[
            (BACKUP_DATA_KEY, backup.data.as_str()),
            (BACKUP_SIGNATURE_KEY, backup.signature.as_str()),
        ])
    }

    /// バックアップを読み込む（どちらかが欠けていれば `None`）
    fn load_backup(&self) -> AgentResult<Option<Backup>> {
        let data = self.get_item(BACKUP_DATA_KEY)?.filter(|d| !d.is_empty());
        let signature = self
            .get_item(BACKUP_SIGNATURE_KEY)?
            .filter(|s| !s.is_empty());
        Ok(match (data, signature) {
            (Some(data), Some(signature)) => Some(Backup { data, signature }),
            _ => None,
        })
    }
}

/// メモリ上のストレージ（プロセス終了で消える）
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    /// 空のストレージを作成
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> AgentResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_items(&mut self, items: &[(&str, &str)]) -> AgentResult<()> {
        for (key, value) in items {
            self.items.insert((*key).to_string(), (*value).to_string());
        }
        Ok(())
    }
}

/// JSONファイルに永続化するストレージ
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// ディレクトリ配下の `storage.json` を使うストレージを開く
    pub fn open(dir: impl AsRef<Path>) -> AgentResult<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| {
            AgentError::Storage(format!(
                "Failed to create storage directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self {
            path: dir.join(STORAGE_FILE_NAME),
        })
    }

    /// ストレージファイルのパス
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> AgentResult<BTreeMap<String, String>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(AgentError::Storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        serde_json::from_str(&content).map_err(|e| AgentError::Common(CommonError::from(e)))
    }

    fn write_all(&self, items: &BTreeMap<String, String>) -> AgentResult<()> {
        let content = serde_json::to_string_pretty(items)
            .map_err(|e| AgentError::Common(CommonError::from(e)))?;
        // 一時ファイルに書いてからrenameし、途中状態のファイルを残さない
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content).map_err(|e| {
            AgentError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            AgentError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })
    }
}

impl LocalStorage for FileStorage {
    fn get_item(&self, key: &str) -> AgentResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set_items(&mut self, items: &[(&str, &str)]) -> AgentResult<()> {
        let mut all = self.read_all()?;
        for (key, value) in items {
            all.insert((*key).to_string(), (*value).to_string());
        }
        self.write_all(&all)
    }
}

/// ストレージディレクトリを解決
///
/// 設定値 → OS標準データディレクトリ配下の `sealed-record` の順。
pub fn resolve_data_dir(config: &AgentConfig) -> AgentResult<PathBuf> {
    if let Some(dir) = &config.data_dir {
        return Ok(dir.clone());
    }
    dirs::data_dir()
        .map(|dir| dir.join("sealed-record"))
        .ok_or_else(|| {
            AgentError::Common(CommonError::Config(
                "Could not determine data directory; set SEALED_RECORD_AGENT_DATA_DIR".to_string(),
            ))
        })
}
