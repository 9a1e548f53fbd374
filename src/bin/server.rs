use log::{error, info, warn};
use std::net::SocketAddr;
use std::time::Duration;

use rusty_realm::config::ServerConfig;
use rusty_realm::core::server::{create_game_server, SharedGameServer};
use rusty_realm::handlers::routes;

#[tokio::main]
async fn main() {
    // Initialize env before logging so RUST_LOG from .env is honored
    let dotenv_result = dotenvy::dotenv();

    // Initialize logging
    env_logger::init();

    match dotenv_result {
        Ok(path) => info!("Environment variables loaded from {}", path.display()),
        Err(e) => warn!("Failed to load .env file: {}", e),
    };

    // Load config from env
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Configuration: host={}, port={}, max_message_size={}",
        config.host, config.port, config.max_message_size
    );

    let server = create_game_server();
    let routes = routes(server.clone(), config.max_message_size);

    // Build the server address
    let addr: SocketAddr = match config.bind_address().parse() {
        Ok(addr) => addr,
        Err(e) => {
            error!("Failed to parse server address: {}", e);
            std::process::exit(1);
        }
    };

    let shutdown = shutdown_signal(server, config.shutdown_grace);
    let (bound, serving) = match warp::serve(routes).try_bind_with_graceful_shutdown(addr, shutdown) {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Game server running on ws://{}", bound);
    serving.await;
    info!("Server closed");
}

// Resolves once Ctrl-C has been received and connected players were told to leave
async fn shutdown_signal(server: SharedGameServer, grace: Duration) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    info!("Shutting down server...");
    match server.disconnect_all() {
        Ok(count) => info!("Notified {} players of shutdown", count),
        Err(e) => error!("Failed to notify players of shutdown: {}", e),
    }

    // Give the forwarding tasks a chance to flush the close frames
    tokio::time::sleep(grace).await;
}
