//! Startup configuration: defaults, then `config.json` in the app data dir, then
//! environment overrides. Resolved once and handed to the client and the UI.

use std::time::Duration;

use reqwest::Url;
use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    info,
    warn,
};

use crate::{
    core::PredictError,
    persistence::{
        data_file_exists,
        load_json_or_default,
        save_json,
    },
    schema::Schema,
};

pub const CONFIG_FILE: &str = "config.json";
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/api/predict";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENDPOINT_VAR: &str = "HEARTCHECK_ENDPOINT";
pub const SCHEMA_VAR: &str = "HEARTCHECK_SCHEMA";
pub const TIMEOUT_VAR: &str = "HEARTCHECK_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub endpoint: Url,
    pub schema: Schema,
    pub timeout_secs: u64,
}

/// On-disk shape of `config.json`. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub schema: Option<Schema>,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            schema: Schema::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl From<&Config> for ConfigFile {
    fn from(config: &Config) -> Self {
        Self {
            endpoint: Some(config.endpoint.to_string()),
            schema: Some(config.schema),
            timeout_secs: Some(config.timeout_secs),
        }
    }
}

impl Config {
    /// Reads the config file (writing one with defaults on first run) and applies
    /// environment overrides.
    pub fn resolve() -> Result<Self, PredictError> {
        if !data_file_exists(CONFIG_FILE) {
            if let Err(e) = save_json(&ConfigFile::from(&Config::default()), CONFIG_FILE) {
                warn!("Could not write default {}: {}", CONFIG_FILE, e);
            }
        }

        let file = load_json_or_default::<ConfigFile>(CONFIG_FILE);
        let config = Self::from_sources(file, |key| {
            std::env::var(key).ok().filter(|value| !value.trim().is_empty())
        })?;

        info!(
            endpoint = %config.endpoint,
            schema = %config.schema,
            timeout_secs = config.timeout_secs,
            "Configuration resolved"
        );
        Ok(config)
    }

    pub fn from_sources(
        file: ConfigFile,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, PredictError> {
        let mut config = Config::default();

        if let Some(endpoint) = file.endpoint {
            config.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(schema) = file.schema {
            config.schema = schema;
        }
        if let Some(timeout_secs) = file.timeout_secs {
            config.timeout_secs = timeout_secs;
        }

        if let Some(endpoint) = env(ENDPOINT_VAR) {
            config.endpoint = parse_endpoint(&endpoint)?;
        }
        if let Some(schema) = env(SCHEMA_VAR) {
            config.schema =
                schema.parse().map_err(|e| PredictError::Config(format!("{}: {}", SCHEMA_VAR, e)))?;
        }
        if let Some(timeout) = env(TIMEOUT_VAR) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                PredictError::Config(format!("{}: '{}' is not a number of seconds", TIMEOUT_VAR, timeout))
            })?;
        }

        if config.timeout_secs == 0 {
            return Err(PredictError::Config("timeout must be at least one second".to_string()));
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

pub fn parse_endpoint(raw: &str) -> Result<Url, PredictError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| PredictError::Config(format!("invalid endpoint '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(PredictError::Config(format!(
            "endpoint '{}' must use http or https, not {}",
            raw, other
        ))),
    }
}
