use reqwest::{
    Client,
    StatusCode,
    Url,
};
use serde::Deserialize;
use tracing::{
    debug,
    info,
};

use super::{
    PredictionResult,
    Probability,
};
use crate::{
    config::Config,
    core::{
        http::{
            http_client,
            post_json,
        },
        PredictError,
    },
    schema::PatientRecord,
};

#[derive(Debug, Deserialize)]
struct PredictionResponse {
    prediction: u8,
    probability: Probability,
}

#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    endpoint: Url,
}

impl PredictionClient {
    pub fn new(config: &Config) -> Result<Self, PredictError> {
        let client = http_client(config.timeout())?;
        Ok(Self { client, endpoint: config.endpoint.clone() })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn predict(&self, record: &PatientRecord) -> Result<PredictionResult, PredictError> {
        let payload = record.to_payload()?;
        info!(endpoint = %self.endpoint, schema = %record.schema(), "Requesting prediction");
        debug!(%payload, "Prediction payload");

        let (status, body) = post_json(&self.client, self.endpoint.clone(), &payload).await?;
        debug!(%status, %body, "Prediction response");

        interpret_response(status, &body)
    }
}

/// Maps a completed HTTP exchange to a result or a failure.
///
/// An `error` field fails the call whatever the status. A non-2xx status fails it even
/// without one, in which case the message falls back to the generic text.
pub fn interpret_response(
    status: StatusCode,
    body: &str,
) -> Result<PredictionResult, PredictError> {
    let parsed = serde_json::from_str::<serde_json::Value>(body);

    let server_message = parsed.as_ref().ok().and_then(error_message);

    if !status.is_success() || server_message.is_some() {
        return Err(PredictError::Server {
            status: status.as_u16(),
            message: server_message.flatten(),
        });
    }

    let value = parsed.map_err(|e| {
        PredictError::MalformedResponse(format!("response body is not JSON ({})", e))
    })?;

    if !value.is_object() {
        return Err(PredictError::MalformedResponse(format!(
            "expected a JSON object, got {}",
            value
        )));
    }

    let response: PredictionResponse = serde_json::from_value(value)
        .map_err(|e| PredictError::MalformedResponse(e.to_string()))?;

    PredictionResult::new(response.prediction, response.probability)
}

/// `None` when there is no `error` field; `Some(None)` when it is present but carries no
/// usable text.
fn error_message(value: &serde_json::Value) -> Option<Option<String>> {
    let error = value.as_object()?.get("error")?;

    let message = match error {
        serde_json::Value::Null => return None,
        serde_json::Value::String(text) => text.trim().to_string(),
        other => other.to_string(),
    };

    Some(if message.is_empty() { None } else { Some(message) })
}
