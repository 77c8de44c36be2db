//! Live-reload HTTP server.
//!
//! - `GET /live-reload` upgrades to a WebSocket session that receives
//!   `{"command":"reload"}` messages. Non-upgradable requests get 501.
//! - `GET /listening` is called by the app once it accepts connections.

use super::orchestrator::OrchestratorHandle;
use super::state::DevContext;
use crate::error::{CliError, Result};
use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

/// State shared by the request handlers.
#[derive(Debug, Clone)]
pub struct ServerState {
    pub context: Arc<DevContext>,
    pub orchestrator: OrchestratorHandle,
}

/// Live-reload server with its listener already bound.
pub struct DevServer {
    listener: TcpListener,
    state: ServerState,
}

impl DevServer {
    /// Bind the configured address. There is no fallback port: the app is
    /// told where to find the server, so the address must be the configured one.
    ///
    /// # Errors
    ///
    /// Returns error if server cannot bind to configured address
    pub async fn bind(addr: SocketAddr, state: ServerState) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::Server(format!("Failed to bind to {}: {}", addr, e)))?;
        Ok(Self { listener, state })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve until the task is dropped.
    pub async fn run(self) -> Result<()> {
        serve(self.listener, self.state).await
    }
}

/// Serve the live-reload routes on an already bound listener.
pub async fn serve(listener: TcpListener, state: ServerState) -> Result<()> {
    axum::serve(listener, router(state))
        .await
        .map_err(|e| CliError::Server(format!("Server error: {}", e)))
}

pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/live-reload", get(handle_live_reload))
        .route("/listening", get(handle_listening))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

async fn handle_live_reload(
    State(state): State<ServerState>,
    upgrade: std::result::Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    match upgrade {
        Ok(ws) => ws
            .on_upgrade(move |socket| run_session(socket, state.context))
            .into_response(),
        Err(rejection) => {
            tracing::debug!(%rejection, "live-reload request is not upgradable");
            (StatusCode::NOT_IMPLEMENTED, "WebSocket upgrade required").into_response()
        }
    }
}

async fn handle_listening(State(state): State<ServerState>) -> StatusCode {
    if !state.orchestrator.ready().await {
        tracing::warn!("readiness signal after shutdown");
    }
    StatusCode::OK
}

/// Forward broadcast messages to one socket until either side closes.
async fn run_session(mut socket: WebSocket, context: Arc<DevContext>) {
    let (id, mut rx) = context.register_session();

    loop {
        tokio::select! {
            outgoing = rx.recv() => match outgoing {
                Some(text) => {
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Err(err)) => {
                    tracing::debug!(id, error = %err, "live-reload session error");
                    break;
                }
                Some(Ok(_)) => {}
            },
        }
    }

    context.unregister_session(id);
}
