use intake::{AnswerSet, SubmitError, SubmitReceipt, Submitter};
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::IntakeConfig;

/// Error type for building an `HttpSubmitter`.
#[derive(Debug, thiserror::Error)]
pub enum HttpSubmitError {
    #[error("Invalid submission endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Body the endpoint may answer with. Every key is optional.
#[derive(Debug, Default, Deserialize)]
struct SubmitResponse {
    success: Option<bool>,
    message: Option<String>,
    error: Option<String>,
}

/// Posts the answer set as JSON to a fixed endpoint.
///
/// One request per `submit` call. No retry, no backoff.
#[derive(Debug, Clone)]
pub struct HttpSubmitter {
    client: Client,
    endpoint: Url,
}

impl HttpSubmitter {
    /// Create a submitter for the given endpoint URL.
    pub fn new(endpoint: &str) -> Result<Self, HttpSubmitError> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = Client::builder().build()?;
        Ok(Self { client, endpoint })
    }

    /// Create a submitter for the endpoint of a configuration.
    pub fn from_config(config: &IntakeConfig) -> Result<Self, HttpSubmitError> {
        Self::new(&config.endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, HttpSubmitError> {
    let invalid = |reason: String| HttpSubmitError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(invalid(format!("unsupported scheme '{other}'"))),
    }
}

impl Submitter for HttpSubmitter {
    fn submit(&self, answers: &AnswerSet) -> Result<SubmitReceipt, SubmitError> {
        debug!(endpoint = %self.endpoint, answers = answers.len(), "posting intake answers");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(answers)
            .send()
            .map_err(|e| {
                warn!(error = %e, "submission request failed");
                SubmitError::transport(e)
            })?;

        let status = response.status();
        let body = response.text().map_err(SubmitError::transport)?;
        info!(status = status.as_u16(), "submission endpoint responded");

        interpret_response(status, &body)
    }
}

/// Map a status and body to the submission result.
///
/// A success status succeeds unless the body says `success: false` or is not
/// JSON at all. Any other status is a rejection carrying the body's `error`.
fn interpret_response(status: StatusCode, body: &str) -> Result<SubmitReceipt, SubmitError> {
    let body = body.trim();
    let parsed = if body.is_empty() {
        Some(SubmitResponse::default())
    } else {
        serde_json::from_str::<SubmitResponse>(body).ok()
    };

    if !status.is_success() {
        return Err(SubmitError::Rejected {
            status: status.as_u16(),
            message: parsed.and_then(|r| r.error),
        });
    }

    match parsed {
        Some(SubmitResponse {
            success: Some(false),
            message,
            error,
        }) => Err(SubmitError::Refused {
            message: error.or(message),
        }),
        Some(response) => Ok(SubmitReceipt {
            status: status.as_u16(),
            message: response.message,
        }),
        None => Err(SubmitError::MalformedResponse(format!(
            "expected a JSON body, got {} bytes",
            body.len()
        ))),
    }
}
