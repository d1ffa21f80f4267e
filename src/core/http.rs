use std::time::Duration;

use reqwest::{
    header::ACCEPT,
    Client,
    StatusCode,
    Url,
};
use serde::Serialize;

use crate::core::PredictError;

pub const USER_AGENT: &str = concat!("heartcheck/", env!("CARGO_PKG_VERSION"), " (+reqwest)");

pub fn http_client(timeout: Duration) -> Result<Client, PredictError> {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PredictError::Config(format!("HTTP client build failed: {e}")))
}

/// POSTs `body` as JSON and returns the status together with the raw body text.
///
/// Status interpretation is left to the caller; only failures to complete the
/// exchange are errors here.
pub async fn post_json<T: Serialize + ?Sized>(
    client: &Client,
    url: Url,
    body: &T,
) -> Result<(StatusCode, String), PredictError> {
    let response = client.post(url).header(ACCEPT, "application/json").json(body).send().await?;

    let status = response.status();
    let text = response.text().await?;

    Ok((status, text))
}
