use anyhow::Context;
use boundary_rs::{AppState, RequestPipeline, ServiceConfig, init_tracing};
use clap::Parser;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    init_tracing(config.log_format).context("failed to initialize logging")?;

    let state = AppState::from_config(&config).context("invalid CORS configuration")?;
    let addr = config.bind_addr();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        port = %state.diagnostics().port_label(),
        "starting boundary service"
    );
    tracing::info!(
        origins = ?state.policy().origins().iter().collect::<Vec<_>>(),
        credentials = ?state.policy().credentials(),
        body_limit = state.body_limit(),
        "origin policy loaded"
    );

    let app = RequestPipeline::new(state).into_router();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "listening");
    tracing::info!("health check: http://{addr}/health");
    tracing::info!("version info: http://{addr}/version");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
