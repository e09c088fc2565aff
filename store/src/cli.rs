//! CLI module for sealed-record-store
//!
//! Only -h/--help, -V/--version and bind overrides; everything else is
//! read from the environment.

use clap::Parser;
use sealed_record_common::config::{StoreConfig, WritePolicy};

/// Sealed Record Store - holds one signed record in memory
#[derive(Parser, Debug)]
#[command(name = "sealed-record-store")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    SEALED_RECORD_HOST            Bind address (default: 0.0.0.0)
    SEALED_RECORD_PORT            Listen port (default: 8080, fallback: PORT)
    SEALED_RECORD_REQUIRE_DATA    Reject signature-only writes (default: false)
    SEALED_RECORD_LOG_LEVEL       Log level (default: info, fallback: RUST_LOG)
    SEALED_RECORD_LOG_DIR         Directory for JSON log files (optional)
"#)]
pub struct Cli {
    /// Bind address (overrides SEALED_RECORD_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port (overrides SEALED_RECORD_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Reject writes that omit `data`
    #[arg(long)]
    pub require_data: bool,
}

impl Cli {
    /// CLI引数で環境変数由来の設定を上書きする
    pub fn apply(&self, mut config: StoreConfig) -> StoreConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.require_data {
            config.write_policy = WritePolicy::RequireData;
        }
        config
    }
}
