//! Sealed Record Store Entry Point

use clap::Parser;
use sealed_record_common::{config::StoreConfig, logging};
use sealed_record_store::{api, cli::Cli, record::RecordStore, AppState};
use tracing::{error, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init("sealed-record-store") {
        Ok(guard) => guard,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    let config = cli.apply(StoreConfig::from_env());
    if let Err(err) = run_server(config).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run_server(config: StoreConfig) -> std::io::Result<()> {
    info!("Sealed Record Store v{}", env!("CARGO_PKG_VERSION"));

    let store = RecordStore::from_config(&config);
    info!(write_policy = ?store.write_policy(), "Record store initialized");

    let state = AppState { store };
    let app = api::create_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Server running on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
