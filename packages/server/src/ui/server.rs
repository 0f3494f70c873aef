//! Server execution logic.

use std::{future::Future, net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use thiserror::Error;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

use super::{
    handler::{
        connection::open_session,
        http::{get_participants, health_check},
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Pause after a failed accept so a persistent failure does not spin
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Consecutive listener failures after which the listener is considered broken
const MAX_CONSECUTIVE_ACCEPT_ERRORS: u32 = 50;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Line-based chat server, bound and ready to accept
///
/// # Example
///
/// ```ignore
/// let state = Arc::new(AppState::new(registry, transcript));
/// let server = Server::bind(&ServerConfig::default(), state).await?;
/// server.run().await?;
/// ```
pub struct Server {
    listener: TcpListener,
    http_listener: Option<TcpListener>,
    state: Arc<AppState>,
}

impl Server {
    /// Bind the chat listener, and the status API when `config.http_port` is set
    pub async fn bind(config: &ServerConfig, state: Arc<AppState>) -> Result<Self, ServerError> {
        let listener = bind_listener(config.chat_addr()).await?;
        let http_listener = match config.http_addr() {
            Some(addr) => Some(bind_listener(addr).await?),
            None => None,
        };

        Ok(Self {
            listener,
            http_listener,
            state,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn http_local_addr(&self) -> Option<Result<SocketAddr, ServerError>> {
        self.http_listener
            .as_ref()
            .map(|listener| listener.local_addr().map_err(ServerError::from))
    }

    /// Run until Ctrl+C
    pub async fn run(self) -> Result<(), ServerError> {
        self.run_until(shutdown_signal()).await
    }

    /// Run until `shutdown` resolves
    pub async fn run_until<F>(self, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let Self {
            listener,
            http_listener,
            state,
        } = self;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let http_task = match http_listener {
            Some(http_listener) => {
                tracing::info!(
                    "Status API listening on http://{}",
                    http_listener.local_addr()?
                );
                Some(tokio::spawn(serve_status_api(
                    http_listener,
                    state.clone(),
                    shutdown_rx,
                )))
            }
            None => None,
        };
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        let accepted = tokio::select! {
            result = accept_loop(&listener, state) => result,
            _ = shutdown => {
                tracing::info!("Stopping accept loop");
                Ok(())
            }
        };

        let _ = shutdown_tx.send(true);
        if let Some(http_task) = http_task {
            match http_task.await {
                Ok(result) => result?,
                Err(e) => tracing::error!("Status API task failed: {}", e),
            }
        }

        accepted?;
        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn bind_listener(addr: String) -> Result<TcpListener, ServerError> {
    TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Accepts connections until the listener fails persistently; each one gets
/// the join sequence and its own task.
async fn accept_loop(listener: &TcpListener, state: Arc<AppState>) -> Result<(), ServerError> {
    let mut failures = AcceptFailures::default();
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                failures.reset();
                tracing::debug!("New connection from {}", peer_addr);
                open_session(stream, peer_addr, state.clone()).await;
            }
            Err(e) => {
                failures.record(e)?;
                tokio::time::sleep(ACCEPT_ERROR_BACKOFF).await;
            }
        }
    }
}

/// Tracks accept failures of the listener itself.
///
/// Errors that concern only the connection being accepted are skipped; any
/// other error counts, and a run of them is fatal.
#[derive(Debug, Default)]
struct AcceptFailures {
    consecutive: u32,
}

impl AcceptFailures {
    fn reset(&mut self) {
        self.consecutive = 0;
    }

    fn record(&mut self, error: std::io::Error) -> Result<(), std::io::Error> {
        if is_connection_error(&error) {
            tracing::warn!("Failed to accept connection: {}", error);
            return Ok(());
        }

        self.consecutive += 1;
        if self.consecutive >= MAX_CONSECUTIVE_ACCEPT_ERRORS {
            tracing::error!(
                "Listener failed {} times in a row, giving up: {}",
                self.consecutive,
                error
            );
            return Err(error);
        }
        tracing::error!("Failed to accept connection: {}", error);
        Ok(())
    }
}

fn is_connection_error(error: &std::io::Error) -> bool {
    use std::io::ErrorKind;

    matches!(
        error.kind(),
        ErrorKind::ConnectionAborted
            | ErrorKind::ConnectionReset
            | ErrorKind::ConnectionRefused
            | ErrorKind::Interrupted
            | ErrorKind::WouldBlock
    )
}

pub(crate) fn status_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/participants", get(get_participants))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn serve_status_api(
    listener: TcpListener,
    state: Arc<AppState>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), ServerError> {
    axum::serve(listener, status_router(state))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;
    Ok(())
}
