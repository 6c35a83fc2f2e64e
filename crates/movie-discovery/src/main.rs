//! # Movie Discovery
//!
//! Terminal front end for the search view. Each stdin line either replaces the search box
//! contents or, when it starts with `:`, runs a command (see [`terminal::HELP`]). Every
//! published snapshot is rendered to stdout; logs go to stderr.
//!
//! ```bash
//! TMDB_API_KEY=... RUST_LOG=info movie-discovery '?query=batman&page=2'
//! ```

use movie_discovery::clients::{ActorClient, DiscoveryClient};
use movie_discovery::config::AppConfig;
use movie_discovery::gateway::UreqTransport;
use movie_discovery::lifecycle::DiscoverySystem;
use movie_discovery::model::ViewSnapshot;
use movie_discovery::terminal::{self, Command};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{error, info, warn};
use view_actor::tracing::setup_tracing;

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenv::dotenv().ok();
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    let initial_url = std::env::args().nth(1).unwrap_or_default();

    info!(base_url = %config.gateway.base_url, "Starting movie discovery");
    let system = DiscoverySystem::from_config(&config, Arc::new(UreqTransport::new()), &initial_url);

    let renderer = tokio::spawn(render_snapshots(system.client.subscribe()));
    println!("{}", terminal::HELP);

    let result = read_commands(&system.client).await;

    renderer.abort();
    system.shutdown().await?;
    info!("Application completed successfully");
    result
}

async fn read_commands(client: &DiscoveryClient) -> Result<(), String> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.map_err(|e| e.to_string())? {
        let outcome = match Command::parse(&line) {
            Command::Type(text) => client.input(&text).await,
            Command::Next => client.next_page().await,
            Command::Prev => client.previous_page().await,
            Command::Back => client.back().await,
            Command::Forward => client.forward().await,
            Command::Open(url) => client.open(&url).await,
            Command::Quit => break,
            Command::Unknown(line) => {
                println!("unknown command {line:?}\n{}", terminal::HELP);
                continue;
            }
        };

        if let Err(e) = outcome {
            warn!(error = %e, "Command failed");
            println!("{e}");
        }
    }
    Ok(())
}

async fn render_snapshots(mut snapshots: watch::Receiver<ViewSnapshot>) {
    loop {
        let snapshot = snapshots.borrow_and_update().clone();
        println!("{}", terminal::render(&snapshot));
        if snapshots.changed().await.is_err() {
            break;
        }
    }
}
