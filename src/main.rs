use anyhow::Context;
use tokio::net::TcpListener;

use routed_chat_proxy::logger::init_tracing;
use routed_chat_proxy::{AppState, Config, build_app};

#[tokio::main]
async fn main() -> anyhow::Result<()> {

    dotenvy::dotenv().ok();

    let config = Config::from_env().context("invalid configuration")?;
    init_tracing(config.log_format)?;

    if config.routing_api_key.is_none() {
        tracing::warn!("NOTDIAMOND_API_KEY is not set, every request will use the fallback model");
    }
    if config.fallback_api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set, fallback calls will be unauthenticated");
    }

    let state = AppState::from_config(&config).context("failed to build http client")?;

    tracing::info!(
        default_model = %state.router.default_model(),
        timeout_secs = config.timeout.as_secs(),
        "router ready"
    );

    let app = build_app(state);

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.listen_addr))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("server stopped");
    Ok(())

}

/// Resolves on Ctrl+C or SIGTERM
async fn shutdown_signal() {

    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");

}
