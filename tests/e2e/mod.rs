//! End-to-end test utilities.
//!
//! Starts the real HTTP server on an ephemeral port in a background thread
//! and talks to it with `ureq`.

#![allow(dead_code)]

use serde_json::Value;
use solar_check::server::{serve, ConnectionLimits};
use solar_check::{Config, Metrics, SubmissionHandler, VerdictPolicy};
use std::sync::Arc;

pub mod fixtures;

/// A server bound to `127.0.0.1:0` for the lifetime of the test process.
pub struct TestServer {
    pub base_url: String,
    pub metrics: Metrics,
}

impl TestServer {
    /// Start a server with default limits.
    pub fn start(policy: Arc<dyn VerdictPolicy>) -> Self {
        Self::start_with_limits(policy, ConnectionLimits::from(&Config::default()))
    }

    /// Start a server with custom limits.
    pub fn start_with_limits(policy: Arc<dyn VerdictPolicy>, limits: ConnectionLimits) -> Self {
        let listener =
            std::net::TcpListener::bind("127.0.0.1:0").expect("failed to bind test listener");
        listener
            .set_nonblocking(true)
            .expect("failed to make listener non-blocking");
        let addr = listener.local_addr().expect("listener has no address");

        let metrics = Metrics::new();
        let handler = Arc::new(SubmissionHandler::new(policy, metrics.clone()));

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener)
                    .expect("failed to adopt test listener");
                serve(listener, handler, limits).await;
            });
        });

        Self {
            base_url: format!("http://{}", addr),
            metrics,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST a raw body to `path` and return status and JSON body.
    pub fn post_raw(&self, path: &str, body: &str) -> (u16, Value) {
        let result = ureq::post(&self.url(path))
            .set("Content-Type", "application/json")
            .send_string(body);
        Self::into_parts(result)
    }

    /// POST a JSON value to `/api/submit`.
    pub fn submit(&self, payload: &Value) -> (u16, Value) {
        self.post_raw("/api/submit", &payload.to_string())
    }

    /// GET `path` and return status and JSON body.
    pub fn get(&self, path: &str) -> (u16, Value) {
        Self::into_parts(ureq::get(&self.url(path)).call())
    }

    fn into_parts(result: Result<ureq::Response, ureq::Error>) -> (u16, Value) {
        match result {
            Ok(response) => {
                let status = response.status();
                (status, response.into_json().expect("response is not JSON"))
            }
            Err(ureq::Error::Status(status, response)) => {
                (status, response.into_json().expect("response is not JSON"))
            }
            Err(err) => panic!("request failed: {}", err),
        }
    }
}
