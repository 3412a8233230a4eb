use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use rmcp::transport::SseServer;
use rmcp::transport::sse_server::SseServerConfig;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::middleware::trace::http_trace_layer;
use crate::service::{SwapL2Service, SwapQuoteBuilder};

/// Path prefix the MCP SSE endpoints are mounted under
pub const MCP_MOUNT_PATH: &str = "/swap";

pub fn build_app(cancellation_token: CancellationToken, config: Config) -> anyhow::Result<Router> {
    let addr = config.server_uri().parse()?;

    // Registry and RPC providers are built once and shared by every session
    let builder = Arc::new(SwapQuoteBuilder::from_config(&config)?);

    let sse_config = SseServerConfig {
        bind: addr,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: cancellation_token,
        sse_keep_alive: Some(Duration::from_secs(15)),
    };

    let (sse_server, sse_router) = SseServer::new(sse_config);

    sse_server.with_service(move || SwapL2Service::new(builder.clone()));

    let app = Router::new()
        .route("/health", get(|| async move { StatusCode::OK }))
        .nest(MCP_MOUNT_PATH, sse_router)
        .layer(http_trace_layer());

    Ok(app)
}
