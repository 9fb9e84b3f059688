//! HTTP server for the questionnaire endpoint.
//!
//! Each connection is served on its own task and carries exactly one
//! request. Handler state is shared read-only apart from metrics counters.

pub mod handlers;
pub mod http;

pub use handlers::SubmissionHandler;
pub use http::{ApiResponse, Request};

use crate::config::Config;
use crate::error::{ServerError, ServerResult};
use crate::metrics::RequestTimer;
use anyhow::{Context, Result};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

pub const SUBMIT_PATH: &str = "/api/submit";
pub const METRICS_PATH: &str = "/api/metrics";
pub const HEALTH_PATH: &str = "/health";

/// Oversized bodies up to this many bytes are drained before the 413 is sent.
const MAX_DRAIN_BYTES: usize = 1024 * 1024;

/// Per-connection limits taken from the configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionLimits {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
}

impl From<&Config> for ConnectionLimits {
    fn from(config: &Config) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
            request_timeout: config.request_timeout_duration(),
        }
    }
}

/// Dispatch a parsed request.
pub fn route(request: &Request, handler: &SubmissionHandler) -> ApiResponse {
    match (request.method.as_str(), request.path.as_str()) {
        ("POST", SUBMIT_PATH) => {
            debug!(
                content_type = request.header("content-type").unwrap_or("-"),
                body_bytes = request.body.len(),
                "Submission received"
            );
            handler.handle(&request.body)
        }
        ("GET", METRICS_PATH) => ApiResponse::json(200, json!(handler.metrics().summary())),
        ("GET", HEALTH_PATH) => ApiResponse::json(200, json!({ "status": "ok" })),
        (_, SUBMIT_PATH | METRICS_PATH | HEALTH_PATH) => {
            ApiResponse::error(405, "Method not allowed")
        }
        _ => ApiResponse::error(404, "Not found"),
    }
}

/// Bind to `config.bind_addr` and serve until Ctrl-C.
pub async fn run_server(config: Config, handler: SubmissionHandler) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!(addr = %listener.local_addr()?, "Listening for submissions");

    tokio::select! {
        () = serve(listener, Arc::new(handler), ConnectionLimits::from(&config)) => {}
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for shutdown signal")?;
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Accept connections on an already bound listener forever.
pub async fn serve(listener: TcpListener, handler: Arc<SubmissionHandler>, limits: ConnectionLimits) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                warn!(error = %err, "Failed to accept connection");
                tokio::time::sleep(Duration::from_millis(100)).await;
                continue;
            }
        };

        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(stream, &handler, limits).await {
                debug!(peer = %peer, error = %err, "Connection closed without response");
            }
        });
    }
}

async fn handle_connection(
    stream: TcpStream,
    handler: &SubmissionHandler,
    limits: ConnectionLimits,
) -> ServerResult<()> {
    let timer = RequestTimer::new(handler.metrics().clone());
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    let read = tokio::time::timeout(
        limits.request_timeout,
        http::read_request(&mut reader, limits.max_body_bytes),
    )
    .await
    .map_err(|_| ServerError::Timeout)?;

    let (response, method, path) = match read {
        Ok(request) => {
            let response = route(&request, handler);
            (response, request.method, request.path)
        }
        Err(err) => {
            let Some(response) = ApiResponse::from_server_error(&err) else {
                return Err(err);
            };
            warn!(error = %err, status = response.status, "Rejected request");
            if let ServerError::BodyTooLarge { size, .. } = err {
                drain(&mut reader, size, limits.request_timeout).await;
            }
            (response, String::from("-"), String::from("-"))
        }
    };

    http::write_response(&mut write_half, &response).await?;
    write_half.shutdown().await?;

    let elapsed = timer.complete();
    info!(
        method = %method,
        path = %path,
        status = response.status,
        elapsed_ms = elapsed.as_millis() as u64,
        "Request served"
    );
    Ok(())
}

/// Discard up to `size` bytes of an unread body.
async fn drain<R>(reader: &mut R, size: usize, timeout: Duration)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let limit = size.min(MAX_DRAIN_BYTES) as u64;
    let mut body = reader.take(limit);
    let _ = tokio::time::timeout(timeout, tokio::io::copy(&mut body, &mut tokio::io::sink())).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metrics;
    use crate::verdict::{FixedVerdict, Verdict};

    fn handler() -> SubmissionHandler {
        SubmissionHandler::new(Arc::new(FixedVerdict(Verdict::Yes)), Metrics::new())
    }

    fn request(method: &str, path: &str, body: &[u8]) -> Request {
        Request {
            method: method.to_string(),
            path: path.to_string(),
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    #[test]
    fn test_route_unknown_path() {
        let response = route(&request("GET", "/nope", b""), &handler());
        assert_eq!(response.status, 404);
    }

    #[test]
    fn test_route_wrong_method() {
        let response = route(&request("GET", SUBMIT_PATH, b""), &handler());
        assert_eq!(response.status, 405);

        let response = route(&request("POST", HEALTH_PATH, b""), &handler());
        assert_eq!(response.status, 405);
    }

    #[test]
    fn test_route_health_and_metrics() {
        let handler = handler();
        let response = route(&request("GET", HEALTH_PATH, b""), &handler);
        assert_eq!(response.body, json!({ "status": "ok" }));

        route(&request("POST", SUBMIT_PATH, b"oops"), &handler);
        let response = route(&request("GET", METRICS_PATH, b""), &handler);
        assert_eq!(response.status, 200);
        assert_eq!(response.body["submissions_malformed_total"], 1);
    }

    #[test]
    fn test_route_submit_empty_body_is_invalid_json() {
        let response = route(&request("POST", SUBMIT_PATH, b""), &handler());
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({ "error": "Invalid JSON" }));
    }

    #[test]
    fn test_limits_from_config() {
        let limits = ConnectionLimits::from(&Config::default());
        assert_eq!(limits.max_body_bytes, 65536);
        assert_eq!(limits.request_timeout, Duration::from_secs(10));
    }
}
