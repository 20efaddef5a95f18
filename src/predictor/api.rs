//! HTTP API client for `POST /predict` and `GET /health`.

use serde::{Deserialize, Serialize};

use crate::config::ApiSettings;
use crate::http_client;
use crate::material::{InvalidInput, MaterialProperties};

const MAX_RESPONSE_BYTES: usize = 64 * 1024;
/// Shown when a non-2xx response carries no usable `error` field.
pub const PREDICTION_FAILED_MESSAGE: &str = "Prediction failed.";
/// Shown when a failure produced no message of its own.
pub const REQUEST_FAILED_MESSAGE: &str = "Request failed.";

/// Verdict returned by the prediction service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Whether the material is suitable for selection.
    pub usable: bool,
    /// Probability of the positive class in `0..=1`, when the model provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Raw class label (`0` or `1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<i64>,
}

/// Reachability of the prediction service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HealthStatus {
    /// `/health` answered `{"status": "ok"}`.
    Ok,
    /// The service answered, but not with an ok status.
    Degraded(String),
}

/// Reasons a prediction or health request produced no verdict.
#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    /// A form value could not be converted; nothing was sent.
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),
    /// The service rejected the request with an `error` message.
    #[error("{0}")]
    Rejected(String),
    /// Non-2xx response without a readable `error` field.
    #[error("Prediction failed.")]
    Status {
        /// HTTP status returned by the service.
        code: u16,
    },
    /// Connection, DNS, TLS or timeout failure.
    #[error("{0}")]
    Transport(String),
    /// The response body was not the expected JSON.
    #[error("{0}")]
    InvalidResponse(String),
}

impl PredictionError {
    /// Text shown to the user for this failure, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            REQUEST_FAILED_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Blocking client bound to one service base URL.
#[derive(Clone, Debug)]
pub struct PredictorClient {
    base_url: String,
    agent: ureq::Agent,
}

impl PredictorClient {
    /// Build a client from validated API settings.
    pub fn new(settings: &ApiSettings) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            agent: http_client::agent(settings.timeouts()),
        }
    }

    /// Base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send one prediction request and decode the verdict.
    pub fn predict(
        &self,
        properties: &MaterialProperties,
    ) -> Result<PredictionResult, PredictionError> {
        let url = format!("{}/predict", self.base_url);
        tracing::debug!(%url, ?properties, "Sending prediction request");
        let request = self
            .agent
            .post(&url)
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");

        let response = match request.send_json(properties) {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                let body = read_body_limited(response).unwrap_or_default();
                let err = map_status_error(code, &body);
                tracing::warn!(code, "Prediction request rejected: {err}");
                return Err(err);
            }
            Err(ureq::Error::Transport(err)) => {
                tracing::warn!("Prediction request failed: {err}");
                return Err(PredictionError::Transport(err.to_string()));
            }
        };

        let body = read_body_limited(response).map_err(PredictionError::InvalidResponse)?;
        let result = parse_prediction_response(&body)?;
        tracing::info!(
            usable = result.usable,
            probability = ?result.probability,
            "Prediction received"
        );
        Ok(result)
    }

    /// Probe `GET /health`.
    pub fn check_health(&self) -> Result<HealthStatus, PredictionError> {
        let url = format!("{}/health", self.base_url);
        let response = match self.agent.get(&url).set("Accept", "application/json").call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                return Ok(HealthStatus::Degraded(format!("HTTP {code}")));
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(PredictionError::Transport(err.to_string()));
            }
        };
        let body = read_body_limited(response).map_err(PredictionError::InvalidResponse)?;
        Ok(parse_health_response(&body))
    }
}

fn map_status_error(code: u16, body: &str) -> PredictionError {
    match extract_error_message(body) {
        Some(message) => PredictionError::Rejected(message),
        None => PredictionError::Status { code },
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let value = serde_json::from_str::<serde_json::Value>(body.trim()).ok()?;
    let message = value.get("error")?.as_str()?.trim();
    (!message.is_empty()).then(|| message.to_string())
}

fn parse_prediction_response(body: &str) -> Result<PredictionResult, PredictionError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(PredictionError::InvalidResponse(
            "Empty response body".to_string(),
        ));
    }
    serde_json::from_str(trimmed).map_err(|err| {
        PredictionError::InvalidResponse(format!("Invalid prediction response: {err}"))
    })
}

fn parse_health_response(body: &str) -> HealthStatus {
    let status = serde_json::from_str::<serde_json::Value>(body.trim())
        .ok()
        .and_then(|value| value.get("status")?.as_str().map(str::to_string));
    match status.as_deref() {
        Some("ok") => HealthStatus::Ok,
        Some(other) => HealthStatus::Degraded(other.to_string()),
        None => HealthStatus::Degraded("unexpected health response".to_string()),
    }
}

fn read_body_limited(response: ureq::Response) -> Result<String, String> {
    http_client::read_response_text(response, MAX_RESPONSE_BYTES).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{FormInputs, MaterialField};

    #[test]
    fn parses_success_with_probability() {
        let parsed =
            parse_prediction_response(r#"{"prediction": 1, "usable": true, "probability": 0.87}"#)
                .unwrap();
        assert!(parsed.usable);
        assert_eq!(parsed.probability, Some(0.87));
        assert_eq!(parsed.prediction, Some(1));
    }

    #[test]
    fn probability_is_optional() {
        let parsed = parse_prediction_response(r#"{"usable": false}"#).unwrap();
        assert!(!parsed.usable);
        assert_eq!(parsed.probability, None);
    }

    #[test]
    fn rejects_body_without_verdict() {
        let err = parse_prediction_response(r#"{"probability": 0.5}"#).unwrap_err();
        assert!(matches!(err, PredictionError::InvalidResponse(_)));
        assert!(err.user_message().contains("usable"));
    }

    #[test]
    fn rejects_empty_body() {
        let err = parse_prediction_response("  ").unwrap_err();
        assert_eq!(err.to_string(), "Empty response body");
    }

    #[test]
    fn status_error_prefers_server_message() {
        let err = map_status_error(400, r#"{"error": "Sy must be positive"}"#);
        assert_eq!(err.user_message(), "Sy must be positive");
    }

    #[test]
    fn status_error_falls_back_to_generic_message() {
        for body in ["", "<html>oops</html>", r#"{"error": ""}"#, r#"{"error": 5}"#] {
            let err = map_status_error(500, body);
            assert!(matches!(err, PredictionError::Status { code: 500 }));
            assert_eq!(err.user_message(), PREDICTION_FAILED_MESSAGE);
        }
    }

    #[test]
    fn empty_messages_fall_back_to_request_failed() {
        let err = PredictionError::Transport(String::new());
        assert_eq!(err.user_message(), REQUEST_FAILED_MESSAGE);
    }

    #[test]
    fn invalid_input_message_passes_through() {
        let mut inputs = FormInputs::default();
        inputs.set_field(MaterialField::ElasticModulus, "x");
        let err: PredictionError = inputs.to_properties().unwrap_err().into();
        assert_eq!(err.user_message(), "Elastic Modulus (E) must be a number.");
    }

    #[test]
    fn health_response_variants() {
        assert_eq!(parse_health_response(r#"{"status": "ok"}"#), HealthStatus::Ok);
        assert_eq!(
            parse_health_response(r#"{"status": "loading"}"#),
            HealthStatus::Degraded("loading".to_string())
        );
        assert!(matches!(
            parse_health_response("nope"),
            HealthStatus::Degraded(_)
        ));
    }
}
