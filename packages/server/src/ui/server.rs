//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    http::{HeaderValue, Method, header::InvalidHeaderValue},
    routing::get,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{
    handler::{
        get_room_users, get_rooms, get_status, get_users, health_check, websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid CORS origin '{origin}': {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: InvalidHeaderValue,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state, "http://localhost:3000".to_string());
/// server.run("127.0.0.1".to_string(), 4000).await?;
/// ```
pub struct Server {
    app_state: Arc<AppState>,
    /// CORS で許可するクライアントのオリジン
    client_url: String,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `app_state` - Use cases and the event sequencer shared by every handler
    /// * `client_url` - The single origin allowed by CORS
    pub fn new(app_state: Arc<AppState>, client_url: String) -> Self {
        Self {
            app_state,
            client_url,
        }
    }

    /// Build the axum router with every endpoint and layer attached
    pub fn router(&self) -> Result<Router, ServerError> {
        let origin = self.client_url.parse::<HeaderValue>().map_err(|source| {
            ServerError::InvalidOrigin {
                origin: self.client_url.clone(),
                source,
            }
        })?;
        let cors_layer = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST]);
        tracing::info!("CORS configured for origin: {}", self.client_url);

        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/status", get(get_status))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room_name}", get(get_room_users))
            .route("/api/users", get(get_users))
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer)
            .with_state(self.app_state.clone());

        Ok(app)
    }

    /// Run the WebSocket chat server until Ctrl+C or SIGTERM
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 4000)
    ///
    /// # Errors
    ///
    /// Returns an error if the CORS origin is invalid, if the server fails to bind
    /// to the specified address or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), ServerError> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router()?;

        tracing::info!(
            "WebSocket chat server listening on {}",
            listener.local_addr()?
        );

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
