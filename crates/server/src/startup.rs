use std::{future::Future, sync::Arc};

use axum::Router;
use configs::ServerConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::auth::{InMemoryUserRepository, UserRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// State backed by a fresh process-lifetime user store.
pub fn build_state() -> ServerState {
    let repo: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    ServerState::new(repo)
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn run(cfg: ServerConfig) -> Result<(), StartupError> {
    let addr = cfg.bind_addr();
    let listener = TcpListener::bind(addr.as_str())
        .await
        .map_err(|source| StartupError::Bind { addr: addr.clone(), source })?;
    serve(listener, build_state(), shutdown_signal()).await
}

/// Serve on an already bound listener; used by `run` and by tests on port 0.
pub async fn serve<F>(listener: TcpListener, state: ServerState, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local = listener.local_addr()?;
    info!(addr = %local, "listening");
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!(event = "shutdown_signal", "received Ctrl+C, shutting down"),
        Err(e) => {
            warn!(error = %e, "cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
