//! 対話コマンド
//!
//! 1行1コマンドの入力を解釈し、エージェント操作を実行して結果を文字列で返す

use sealed_record_common::error::AgentResult;

use crate::agent::{SigningAgent, VerifyOutcome};
use crate::client::RecordTransport;
use crate::storage::LocalStorage;

/// ヘルプ文
pub const HELP: &str = "\
Commands:
  show            Show the working data
  set <text>      Edit the working data (not sent)
  push [text]     Sign and send <text>, or the working data
  verify          Fetch the record and check its signature
  restore         Restore the working data from the local backup
  help            Show this help
  quit            Exit";

/// 対話コマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 作業中のデータを表示
    Show,
    /// 作業中のデータを編集
    Set(String),
    /// 署名して送信
    Push(Option<String>),
    /// 検証
    Verify,
    /// バックアップから復元
    Restore,
    /// ヘルプ
    Help,
    /// 終了
    Quit,
}

/// 入力行をコマンドに変換（空行は `None`）
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "show" => Command::Show,
        "set" => Command::Set(rest.to_string()),
        "push" | "update" => {
            Command::Push(Some(rest.to_string()).filter(|text| !text.is_empty()))
        }
        "verify" => Command::Verify,
        "restore" => Command::Restore,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {} (type 'help')", other)),
    };
    Ok(Some(command))
}

/// コマンドを実行し、利用者に表示するメッセージを返す
pub async fn execute<T, S>(agent: &mut SigningAgent<T, S>, command: Command) -> AgentResult<String>
where
    T: RecordTransport,
    S: LocalStorage,
{
    let message = match command {
        Command::Show => format!("Saved data: {}", agent.data()),
        Command::Set(text) => {
            agent.set_data(text);
            format!("Working data: {}", agent.data())
        }
        Command::Push(text) => {
            let receipt = agent.push(text.as_deref()).await?;
            format!("Data updated: {} ({})", agent.data(), receipt.signature)
        }
        Command::Verify => match agent.verify().await? {
            VerifyOutcome::Valid => "Data is valid.".to_string(),
            VerifyOutcome::Tampered { restored: Some(_) } => format!(
                "Data has been tampered with! Restoring backup...\nBackup restored from storage: {}",
                agent.data()
            ),
            VerifyOutcome::Tampered { restored: None } => {
                "Data has been tampered with! No complete backup to restore.".to_string()
            }
            VerifyOutcome::Unverifiable => {
                "Signature does not match and no backup exists; data cannot be verified."
                    .to_string()
            }
        },
        Command::Restore => match agent.recover_backup()? {
            Some(data) => format!("Backup restored from storage: {}", data),
            None => "No backup available.".to_string(),
        },
        Command::Help => HELP.to_string(),
        Command::Quit => String::new(),
    };
    Ok(message)
}
