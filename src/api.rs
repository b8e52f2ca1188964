//! Client for the admissions admin REST API.
//!
//! The forms only ever need two calls: read a record and save a record.
//! `AdminApi` is the seam; `HttpAdminApi` is the reqwest implementation.
//! Calls are instrumented and log paths, statuses and latencies. Bodies are
//! logged only when `debug_payloads` is on, and always truncated.
//!
//! NOTE: We never log the bearer token.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::config::ApiSettings;
use crate::util::trunc_for_log;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("admin API request failed: {0}")]
  Client(#[from] reqwest::Error),

  #[error("admin API HTTP {status}: {body}")]
  Status { status: StatusCode, body: String },

  #[error("admin API returned invalid JSON: {0}")]
  Decode(#[from] serde_json::Error),
}

/// Generic `get(path)` / `post(path, body)` access to the admin API.
#[async_trait]
pub trait AdminApi: Send + Sync {
  async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError>;

  async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}

/// `{ success, data? }` returned by record reads.
#[derive(Debug, Default, Deserialize)]
pub struct LoadEnvelope {
  #[serde(default)]
  pub success: bool,
  #[serde(default)]
  pub data: Option<Value>,
}

impl LoadEnvelope {
  /// The stored record, if the read succeeded and returned an object.
  pub fn into_record(self) -> Option<Map<String, Value>> {
    match (self.success, self.data) {
      (true, Some(Value::Object(map))) => Some(map),
      _ => None,
    }
  }
}

/// `{ success, message?, error? }` returned by record saves.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SaveEnvelope {
  pub success: bool,
  pub message: Option<String>,
  pub error: Option<String>,
}

impl SaveEnvelope {
  /// Each key is read on its own, so a malformed `message` never hides
  /// `success: true`. Anything that is not a JSON object is a failure.
  pub fn from_response(raw: &Value) -> Self {
    let text = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
    Self {
      success: raw.get("success").and_then(Value::as_bool).unwrap_or(false),
      message: text("message"),
      error: text("error"),
    }
  }
}

#[derive(Clone)]
pub struct HttpAdminApi {
  client: reqwest::Client,
  pub base_url: String,
  token: Option<String>,
  debug_payloads: bool,
}

impl HttpAdminApi {
  pub fn new(settings: &ApiSettings, debug_payloads: bool) -> Result<Self, ApiError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = settings.timeout_secs {
      builder = builder.timeout(Duration::from_secs(secs));
    }
    let client = builder.build()?;
    Ok(Self {
      client,
      base_url: settings.base_url.trim_end_matches('/').to_string(),
      token: settings.token.clone(),
      debug_payloads,
    })
  }

  fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
    let url = format!("{}{}", self.base_url, path);
    let req = self.client.request(method, url)
      .header(USER_AGENT, "admissions-forms/0.1")
      .header(CONTENT_TYPE, "application/json");
    match &self.token {
      Some(t) => req.header(AUTHORIZATION, format!("Bearer {}", t)),
      None => req,
    }
  }

  /// Read the body as JSON. A non-2xx response that still carries a JSON
  /// envelope is returned as-is so its `message` can reach the examiner.
  async fn read_json(&self, res: reqwest::Response) -> Result<Value, ApiError> {
    let status = res.status();
    let body = res.text().await?;
    if self.debug_payloads {
      debug!(target: "admissions_forms", %status, body = %trunc_for_log(&body, 2000), "Admin API response body");
    }
    match serde_json::from_str::<Value>(&body) {
      Ok(v) => {
        if !status.is_success() {
          warn!(target: "admissions_forms", %status, "Admin API error status with JSON body");
        }
        Ok(v)
      }
      Err(e) if status.is_success() => Err(ApiError::Decode(e)),
      Err(_) => Err(ApiError::Status { status, body: trunc_for_log(&body, 200) }),
    }
  }
}

#[async_trait]
impl AdminApi for HttpAdminApi {
  #[instrument(level = "info", skip(self, query), fields(%path))]
  async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
    let start = Instant::now();
    let res = self.request(reqwest::Method::GET, path).query(query).send().await?;
    info!(target: "admissions_forms", status = %res.status(), elapsed = ?start.elapsed(), "Admin API GET");
    self.read_json(res).await
  }

  #[instrument(level = "info", skip(self, body), fields(%path))]
  async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
    if self.debug_payloads {
      debug!(target: "admissions_forms", body = %trunc_for_log(&body.to_string(), 2000), "Admin API request body");
    }
    let start = Instant::now();
    let res = self.request(reqwest::Method::POST, path).json(body).send().await?;
    info!(target: "admissions_forms", status = %res.status(), elapsed = ?start.elapsed(), "Admin API POST");
    self.read_json(res).await
  }
}
