//! HTTP server entry point.

use std::future::Future;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::router::{build_router, AppState};

/// Validate the configuration and bind the listener.
pub async fn bind(config: &GatewayConfig) -> Result<TcpListener, GatewayError> {
    config.validate()?;
    let listener = TcpListener::bind(config.http_addr()).await?;
    Ok(listener)
}

/// Serve until `shutdown` resolves; in-flight requests drain first.
pub async fn serve<F>(
    listener: TcpListener,
    state: AppState,
    request_timeout: Duration,
    shutdown: F,
) -> Result<(), GatewayError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, timeout_secs = request_timeout.as_secs(), "HTTP gateway listening");

    axum::serve(listener, build_router(state, request_timeout))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("HTTP gateway stopped");
    Ok(())
}
