//! Sealed Record Agent Entry Point

use clap::Parser;
use sealed_record_agent::{
    cli::Cli,
    client::HttpStoreClient,
    repl::{self, Command},
    storage::{resolve_data_dir, FileStorage},
    SigningAgent,
};
use sealed_record_common::{config::AgentConfig, error::AgentResult, logging};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init("sealed-record-agent") {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let config = cli.apply(AgentConfig::from_env());
    if let Err(err) = run(config).await {
        error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

async fn run(config: AgentConfig) -> AgentResult<()> {
    info!("Sealed Record Agent v{}", env!("CARGO_PKG_VERSION"));

    let storage = FileStorage::open(resolve_data_dir(&config)?)?;
    info!("Local storage: {}", storage.path().display());
    let transport = HttpStoreClient::from_config(&config)?;
    info!("Record store: {}", transport.base_url());

    // 鍵生成に失敗した場合はここで終了する
    let mut agent = SigningAgent::initialize(transport, storage)?.with_config(&config);

    match agent.bootstrap().await {
        Ok(receipt) => println!("Saved data: {} ({})", receipt.data, receipt.signature),
        Err(err) => eprintln!("Initial push failed: {}", err),
    }
    println!("{}", repl::HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                error!("Failed to read input: {}", err);
                break;
            }
        };

        let command = match repl::parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match repl::execute(&mut agent, command).await {
            Ok(message) => println!("{}", message),
            Err(err) => println!("Error: {}", err),
        }
    }

    Ok(())
}
