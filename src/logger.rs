use std::time::Instant;

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use crate::config::LogFormat;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Install the global subscriber. `RUST_LOG` overrides the `info` default.
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(format: LogFormat) -> anyhow::Result<()> {

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))

}

/// Log every request and its response on one line each, tagged with a request id.
pub async fn log_requests(mut request: Request, next: Next) -> Response {

    let started = Instant::now();

    // keep a caller-supplied id so logs can be joined across hops
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let method = request.method().clone();
    let path = request.uri().path().to_string();

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        request.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    tracing::info!(
        request_id = %request_id,
        %method,
        %path,
        timestamp = %Utc::now().format("%Y-%m-%d %H:%M:%S"),
        "request received"
    );

    let mut response = next.run(request).await;

    let status = response.status();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if status.is_server_error() {
        tracing::warn!(request_id = %request_id, %method, %path, status = status.as_u16(), latency_ms, "request failed");
    } else {
        tracing::info!(request_id = %request_id, %method, %path, status = status.as_u16(), latency_ms, "response sent");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response

}
