//! ロギング初期化
//!
//! 標準出力への人間向けログと、任意でJSON Lines形式のファイルログを出力する

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::get_env_with_fallback;
use crate::error::{CommonError, CommonResult};

const DEFAULT_LOG_LEVEL: &str = "info";

/// ログレベル指定（`SEALED_RECORD_LOG_LEVEL`、旧: `RUST_LOG`）
pub fn log_level() -> String {
    get_env_with_fallback("SEALED_RECORD_LOG_LEVEL", "RUST_LOG")
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string())
}

/// ファイルログの出力先（`SEALED_RECORD_LOG_DIR` 未設定時はファイル出力しない）
pub fn log_dir() -> Option<PathBuf> {
    std::env::var_os("SEALED_RECORD_LOG_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn build_filter(directives: &str) -> CommonResult<EnvFilter> {
    EnvFilter::try_new(directives)
        .map_err(|e| CommonError::Config(format!("Invalid log filter '{}': {}", directives, e)))
}

/// グローバルsubscriberを初期化
///
/// 返されたガードはプロセス終了まで保持すること（drop時にファイルログをflushする）。
pub fn init(app_name: &str) -> CommonResult<Option<WorkerGuard>> {
    let filter = build_filter(&log_level())?;

    let (file_layer, guard) = match log_dir() {
        Some(dir) => {
            std::fs::create_dir_all(&dir).map_err(|e| {
                CommonError::Config(format!(
                    "Failed to create log directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
            let appender = tracing_appender::rolling::daily(&dir, format!("{}.jsonl", app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .with(file_layer)
        .try_init()
        .map_err(|e| CommonError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(guard)
}
