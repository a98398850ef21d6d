//! Blocking client for the Replicate predictions API.
//!
//! Uses the synchronous `Prefer: wait` mode so each submission returns the
//! finished prediction in one round trip; no polling loop. Timeouts and
//! retries are left to the caller.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::remote::domain::swap_service::SwapService;
use crate::shared::constants::{REMOTE_API_URL, REMOTE_MODEL_VERSION, REMOTE_TOKEN_ENV};

#[derive(Error, Debug)]
pub enum RemoteClientError {
    #[error("missing {0} in the environment")]
    MissingToken(&'static str),
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

pub struct ReplicateSwapClient {
    http: reqwest::blocking::Client,
    token: String,
    api_url: String,
    model_version: String,
}

impl ReplicateSwapClient {
    /// Build a client from `REPLICATE_API_TOKEN`. A missing credential is
    /// a fatal construction error, per the engine contract.
    pub fn from_env() -> Result<Self, RemoteClientError> {
        let token = std::env::var(REMOTE_TOKEN_ENV)
            .map_err(|_| RemoteClientError::MissingToken(REMOTE_TOKEN_ENV))?;
        Self::new(token, REMOTE_API_URL.to_string(), REMOTE_MODEL_VERSION.to_string())
    }

    pub fn new(
        token: String,
        api_url: String,
        model_version: String,
    ) -> Result<Self, RemoteClientError> {
        // Long blocking waits are expected in Prefer: wait mode
        let http = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()
            .map_err(RemoteClientError::Client)?;
        Ok(Self {
            http,
            token,
            api_url,
            model_version,
        })
    }
}

impl SwapService for ReplicateSwapClient {
    fn submit(
        &self,
        source: &[u8],
        target: &[u8],
    ) -> Result<Vec<String>, Box<dyn std::error::Error>> {
        let body = json!({
            "version": self.model_version,
            "input": {
                "swap_image": data_uri(source),
                "target_image": data_uri(target),
            }
        });

        let response = self
            .http
            .post(&self.api_url)
            .header("Authorization", format!("Token {}", self.token))
            .header("Prefer", "wait")
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Swap service returned HTTP {status}").into());
        }

        let prediction: PredictionResponse = response.json()?;
        if let Some(err) = prediction.error {
            return Err(format!("Swap service error: {err}").into());
        }
        Ok(prediction.urls())
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(format!("Result download returned HTTP {status}").into());
        }
        Ok(response.bytes()?.to_vec())
    }
}

fn data_uri(bytes: &[u8]) -> String {
    format!("data:application/octet-stream;base64,{}", BASE64.encode(bytes))
}

/// Shape of a finished prediction. `output` is a single URL or a list,
/// depending on the model; both are normalized to a vector.
#[derive(Debug, Deserialize)]
struct PredictionResponse {
    #[serde(default)]
    output: Option<OutputField>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OutputField {
    One(String),
    Many(Vec<String>),
}

impl PredictionResponse {
    fn urls(self) -> Vec<String> {
        match self.output {
            Some(OutputField::One(url)) => vec![url],
            Some(OutputField::Many(urls)) => urls,
            None => Vec::new(),
        }
    }
}
