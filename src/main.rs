use click_analytics::{router, AppState, Config};
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let state = AppState::new(config.auto_click_interval);
    let app = router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(
        auto_click_interval_ms = config.auto_click_interval.as_millis() as u64,
        "listening on http://{addr}"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    state.shutdown().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
