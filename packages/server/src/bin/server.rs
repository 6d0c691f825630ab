//! Multi-room WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-server
//! cargo run --bin kaiwa-server -- --host 0.0.0.0 --port 4000 --client-url http://localhost:3000
//! ```

use std::sync::Arc;

use clap::Parser;
use kaiwa_server::{
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryChatRepository},
    ui::{AppState, Server},
};
use kaiwa_shared::{
    logger::setup_logger,
    time::{SystemClock, to_rfc3339},
};

#[derive(Parser, Debug)]
#[command(name = "kaiwa-server")]
#[command(about = "Multi-room WebSocket chat server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "PORT", default_value = "4000")]
    port: u16,

    /// Origin of the web client allowed by CORS
    #[arg(long, env = "CLIENT_URL", default_value = "http://localhost:3000")]
    client_url: String,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, env = "LOG_LEVEL", default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. MessagePusher
    // 3. UseCases (AppState)
    // 4. Server

    // 1. Create Repository (in-memory presence and room registries)
    let repository = Arc::new(InMemoryChatRepository::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let app_state = Arc::new(AppState::new(
        repository,
        message_pusher,
        Arc::new(SystemClock),
    ));
    tracing::info!(
        "Server started at {}",
        to_rfc3339(&app_state.get_server_status_usecase.execute().started)
    );

    // 4. Create and run the server
    let server = Server::new(app_state, args.client_url);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
