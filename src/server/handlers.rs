//! Submission handling.
//!
//! Turns a raw request body into one of three responses: a verdict, the
//! collected validation errors, or the "Invalid JSON" failure.

use super::http::ApiResponse;
use crate::config::Config;
use crate::metrics::Metrics;
use crate::validation::{parse_payload, validate};
use crate::verdict::{FixedVerdict, RandomVerdict, VerdictPolicy};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

/// Handles questionnaire submissions.
#[derive(Clone)]
pub struct SubmissionHandler {
    policy: Arc<dyn VerdictPolicy>,
    metrics: Metrics,
}

impl SubmissionHandler {
    pub fn new(policy: Arc<dyn VerdictPolicy>, metrics: Metrics) -> Self {
        Self { policy, metrics }
    }

    /// Build a handler using the verdict policy selected by `config`.
    pub fn from_config(config: &Config, metrics: Metrics) -> Self {
        let policy: Arc<dyn VerdictPolicy> = match config.fixed_verdict {
            Some(verdict) => {
                info!(verdict = %verdict, "Using fixed verdict policy");
                Arc::new(FixedVerdict(verdict))
            }
            None => Arc::new(RandomVerdict::new()),
        };
        Self::new(policy, metrics)
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Process one submission body.
    pub fn handle(&self, body: &[u8]) -> ApiResponse {
        let raw = match parse_payload(body) {
            Ok(raw) => raw,
            Err(err) => {
                self.metrics.record_malformed();
                warn!(error = %err, body_bytes = body.len(), "Submission body is not JSON");
                return ApiResponse::error(400, "Invalid JSON");
            }
        };

        match validate(&raw) {
            Ok(input) => {
                let verdict = self.policy.decide(&input);
                self.metrics.record_accepted(verdict);
                info!(verdict = %verdict, "Submission accepted");
                ApiResponse::json(200, json!({ "verdict": verdict }))
            }
            Err(errors) => {
                self.metrics.record_rejected();
                info!(
                    error_count = errors.len(),
                    messages = ?errors.messages(),
                    "Submission failed validation"
                );
                ApiResponse::json(400, json!({ "errors": errors }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Verdict;

    fn handler(verdict: Verdict) -> SubmissionHandler {
        SubmissionHandler::new(Arc::new(FixedVerdict(verdict)), Metrics::new())
    }

    const VALID: &str = r#"{
        "propertyType": "Gewerbeimmobilie",
        "orientations": ["Keine Angabe"],
        "roofAge": "5–15 Jahre",
        "annualConsumption": "Über 5.000 kWh",
        "interestedInOtherSolutions": "Nein"
    }"#;

    #[test]
    fn test_valid_submission_gets_verdict() {
        let handler = handler(Verdict::Yes);
        let response = handler.handle(VALID.as_bytes());

        assert_eq!(response.status, 200);
        assert_eq!(response.body, json!({ "verdict": "yes" }));
        assert_eq!(handler.metrics().summary().verdicts_yes_total, 1);
    }

    #[test]
    fn test_invalid_json_shape() {
        let handler = handler(Verdict::No);
        let response = handler.handle(b"{not json");

        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({ "error": "Invalid JSON" }));
        assert_eq!(handler.metrics().summary().submissions_malformed_total, 1);
    }

    #[test]
    fn test_validation_failure_shape() {
        let handler = handler(Verdict::No);
        let response = handler.handle(br#"{"propertyType": "Villa"}"#);

        assert_eq!(response.status, 400);
        let errors = &response.body["errors"];
        assert!(errors["formErrors"].as_array().unwrap().is_empty());
        assert_eq!(errors["fieldErrors"]["roofAge"], json!(["Required"]));
        assert!(errors["fieldErrors"]["propertyType"][0]
            .as_str()
            .unwrap()
            .ends_with("received 'Villa'"));
        assert!(response.body.get("error").is_none());
        assert_eq!(handler.metrics().summary().submissions_rejected_total, 1);
    }

    #[test]
    fn test_from_config_uses_fixed_verdict() {
        let config = Config {
            fixed_verdict: Some(Verdict::No),
            ..Config::default()
        };
        let handler = SubmissionHandler::from_config(&config, Metrics::new());
        let response = handler.handle(VALID.as_bytes());
        assert_eq!(response.body, json!({ "verdict": "no" }));
    }
}
