use l2_swap_mcp::build_app;
use l2_swap_mcp::config::Config;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "debug,alloy=info,rmcp=info".into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::debug!("debug logging enabled");

    let config_path =
        std::env::var("L2_SWAP_CONFIG").unwrap_or_else(|_| "config/default.yaml".to_string());
    let config = Config::from_yaml(&config_path).await;

    let cancellation_token = CancellationToken::new();
    let addr = config.server_uri();

    let app = build_app(cancellation_token.clone(), config).expect("failed to build app");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind TCP listener");

    tracing::info!("listening on {addr}, MCP SSE endpoint at /swap/sse");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancellation_token))
        .await
        .expect("failed to start server")
}

async fn shutdown_signal(cancellation_token: CancellationToken) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, cancelling tasks...");
    cancellation_token.cancel();
}
