//! Solar Check - validation and verdict service for a solar quick-check questionnaire.
//!
//! A client submits five required answers and optional contact details as
//! JSON. The service validates them against a closed schema and answers with
//! a yes/no verdict, or with every schema violation it found.
//!
//! # Architecture
//!
//! - **domain**: Option sets and contact value objects
//! - **models**: The validated `SurveyInput`
//! - **validation**: Payload parsing and schema validation
//! - **verdict**: The `VerdictPolicy` seam and its placeholder policies
//! - **server**: Submission handler, routing and a minimal HTTP/1.1 listener
//! - **metrics**: Request and outcome counters
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling

pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod validation;
pub mod verdict;

pub use config::Config;
pub use error::{ConfigError, PayloadError, ServerError};
pub use metrics::{Metrics, MetricsSummary, RequestTimer};
pub use models::{Contact, SurveyInput};
pub use server::{ApiResponse, SubmissionHandler};
pub use validation::{parse_payload, validate, ValidationErrors};
pub use verdict::{FixedVerdict, RandomVerdict, Verdict, VerdictPolicy};
