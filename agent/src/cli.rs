//! CLI module for sealed-record-agent

use clap::Parser;
use sealed_record_common::config::{AgentConfig, BackupPolicy, NoBackupPolicy};
use std::path::PathBuf;

/// Sealed Record Agent - signs, pushes and verifies the stored record
#[derive(Parser, Debug)]
#[command(name = "sealed-record-agent")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SEALED_RECORD_STORE_URL              Store base URL (default: http://localhost:8080)
    SEALED_RECORD_REQUEST_TIMEOUT_SECS   HTTP timeout in seconds (default: 10)
    SEALED_RECORD_AGENT_DATA_DIR         Local storage directory (default: OS data dir)
    SEALED_RECORD_CONFIRM_BACKUP         Update backup only after read-back matches
    SEALED_RECORD_STRICT_VERIFY          Report "unverifiable" when no backup exists
    SEALED_RECORD_LOG_LEVEL              Log level (default: info, fallback: RUST_LOG)
"#)]
pub struct Cli {
    /// Store base URL (overrides SEALED_RECORD_STORE_URL)
    #[arg(long)]
    pub store_url: Option<String>,

    /// Local storage directory (overrides SEALED_RECORD_AGENT_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Update the backup only after the store reports the pushed record
    #[arg(long)]
    pub confirm_backup: bool,

    /// Report "unverifiable" instead of "valid" when no backup exists
    #[arg(long)]
    pub strict_verify: bool,
}

impl Cli {
    /// CLI引数で環境変数由来の設定を上書きする
    pub fn apply(&self, mut config: AgentConfig) -> AgentConfig {
        if let Some(url) = &self.store_url {
            config.store_url = url.clone();
        }
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if self.confirm_backup {
            config.backup_policy = BackupPolicy::Confirmed;
        }
        if self.strict_verify {
            config.no_backup_policy = NoBackupPolicy::ReportUnverifiable;
        }
        config
    }
}
