mod game_service;
mod game_store;
mod server_config;
mod snapshot;
mod web_server;

use std::sync::Arc;

use clap::Parser;
use common::{log, logger};

use game_store::GameStore;
use server_config::{ServerConfig, load_server_config};
use snapshot::{FileSnapshotStore, SnapshotStore};
use web_server::run_web_server;

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    #[arg(long)]
    config: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let mut config = match &args.config {
        Some(path) => load_server_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(port) = args.port {
        config.override_port(port)?;
    }

    let snapshot_store: Option<Arc<dyn SnapshotStore>> = config
        .games_file
        .as_ref()
        .map(|path| Arc::new(FileSnapshotStore::new(path.clone())) as Arc<dyn SnapshotStore>);

    let store = GameStore::with_snapshot_store(snapshot_store);
    let restored = store.restore().await?;
    if restored > 0 {
        log!("Restored {} game(s) from {}", restored, config.games_file.as_deref().unwrap_or(""));
    }

    run_web_server(store.clone(), &config.listen_addr).await;

    store.persist().await;
    log!("Server shut down gracefully");

    Ok(())
}
