//! End-to-end tests for the HTTP submission endpoint.

mod e2e;

use e2e::fixtures::{payload_with, valid_payload};
use e2e::TestServer;
use serde_json::json;
use solar_check::server::ConnectionLimits;
use solar_check::{FixedVerdict, RandomVerdict, Verdict};
use std::io::{Read, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_valid_submission_returns_verdict() {
    let server = TestServer::start(Arc::new(RandomVerdict::new()));

    for _ in 0..20 {
        let (status, body) = server.submit(&valid_payload());
        assert_eq!(status, 200);
        let verdict = body["verdict"].as_str().unwrap();
        assert!(verdict == "yes" || verdict == "no", "unexpected verdict {}", verdict);
        assert_eq!(body.as_object().unwrap().len(), 1);
    }

    let summary = server.metrics.summary();
    assert_eq!(summary.submissions_accepted_total, 20);
    assert_eq!(summary.verdicts_yes_total + summary.verdicts_no_total, 20);
}

#[test]
fn test_fixed_verdict_is_returned() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::No)));
    let (status, body) = server.submit(&valid_payload());
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "verdict": "no" }));
}

#[test]
fn test_validation_failure_response_shape() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));
    let payload = payload_with("orientations", json!(["Keine Angabe", "Süd"]));

    let (status, body) = server.submit(&payload);
    assert_eq!(status, 400);
    assert_eq!(
        body,
        json!({
            "errors": {
                "fieldErrors": {
                    "orientations": ["\"Keine Angabe\" darf nicht mit anderen Optionen kombiniert werden"]
                },
                "formErrors": []
            }
        })
    );
}

#[test]
fn test_contact_error_response() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));
    let payload = payload_with("contact", json!({ "email": "not-an-email" }));

    let (status, body) = server.submit(&payload);
    assert_eq!(status, 400);
    assert_eq!(
        body["errors"]["fieldErrors"]["contact.email"],
        json!(["Ungültige E-Mail"])
    );
}

#[test]
fn test_invalid_json_response_shape() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));

    let (status, body) = server.post_raw("/api/submit", "{\"propertyType\": ");
    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Invalid JSON" }));
    assert!(body.get("errors").is_none());
    assert_eq!(server.metrics.summary().submissions_malformed_total, 1);
}

#[test]
fn test_json_array_body_is_schema_failure() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));

    let (status, body) = server.post_raw("/api/submit", "[]");
    assert_eq!(status, 400);
    assert_eq!(
        body["errors"]["formErrors"],
        json!(["Expected object, received array"])
    );
}

#[test]
fn test_unknown_route_and_wrong_method() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));

    let (status, body) = server.get("/api/unknown");
    assert_eq!(status, 404);
    assert_eq!(body, json!({ "error": "Not found" }));

    let (status, body) = server.get("/api/submit");
    assert_eq!(status, 405);
    assert_eq!(body, json!({ "error": "Method not allowed" }));
}

#[test]
fn test_health_and_metrics() {
    let server = TestServer::start(Arc::new(FixedVerdict(Verdict::Yes)));

    let (status, body) = server.get("/health");
    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok" }));

    server.submit(&valid_payload());
    let (status, body) = server.get("/api/metrics");
    assert_eq!(status, 200);
    assert_eq!(body["submissions_accepted_total"], 1);
    assert_eq!(body["verdicts_yes_total"], 1);
}

#[test]
fn test_oversized_body_rejected() {
    let server = TestServer::start_with_limits(
        Arc::new(FixedVerdict(Verdict::Yes)),
        ConnectionLimits {
            max_body_bytes: 64,
            request_timeout: Duration::from_secs(5),
        },
    );

    let (status, body) = server.submit(&valid_payload());
    assert_eq!(status, 413);
    assert_eq!(body, json!({ "error": "Payload too large" }));
}

#[test]
fn test_stalled_request_is_dropped() {
    let server = TestServer::start_with_limits(
        Arc::new(FixedVerdict(Verdict::Yes)),
        ConnectionLimits {
            max_body_bytes: 1024,
            request_timeout: Duration::from_millis(200),
        },
    );

    let addr = server.base_url.trim_start_matches("http://");
    let mut stream = TcpStream::connect(addr).unwrap();
    stream
        .set_read_timeout(Some(Duration::from_secs(5)))
        .unwrap();
    stream.write_all(b"POST /api/submit HTTP/1.1\r\n").unwrap();

    let mut received = Vec::new();
    let _ = stream.read_to_end(&mut received);
    assert!(received.is_empty(), "no response expected for a stalled request");
}
