//! In-memory `AdminApi` for tests. Records every call and answers with
//! canned envelopes.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use tokio::sync::Notify;

use crate::api::{AdminApi, ApiError};

pub struct FakeAdminApi {
  load: Option<Value>,
  save: Option<Value>,
  save_gate: Option<Arc<Notify>>,
  gets: Mutex<Vec<String>>,
  posts: Mutex<Vec<(String, Value)>>,
}

impl FakeAdminApi {
  /// Reads find no record; saves succeed.
  pub fn new() -> Self {
    Self {
      load: Some(json!({ "success": true })),
      save: Some(json!({ "success": true })),
      save_gate: None,
      gets: Mutex::new(Vec::new()),
      posts: Mutex::new(Vec::new()),
    }
  }

  pub fn with_load(mut self, response: Value) -> Self {
    self.load = Some(response);
    self
  }

  pub fn with_load_error(mut self) -> Self {
    self.load = None;
    self
  }

  pub fn with_save(mut self, response: Value) -> Self {
    self.save = Some(response);
    self
  }

  pub fn with_save_error(mut self) -> Self {
    self.save = None;
    self
  }

  /// Saves are recorded, then held until `gate` is notified.
  pub fn with_save_gate(mut self, gate: Arc<Notify>) -> Self {
    self.save_gate = Some(gate);
    self
  }

  pub fn gets(&self) -> Vec<String> {
    self.gets.lock().unwrap().clone()
  }

  pub fn posts(&self) -> Vec<(String, Value)> {
    self.posts.lock().unwrap().clone()
  }

  fn unavailable() -> ApiError {
    ApiError::Status { status: StatusCode::SERVICE_UNAVAILABLE, body: "unavailable".into() }
  }
}

#[async_trait]
impl AdminApi for FakeAdminApi {
  async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Value, ApiError> {
    let query: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
    self.gets.lock().unwrap().push(format!("{path}?{}", query.join("&")));
    self.load.clone().ok_or_else(Self::unavailable)
  }

  async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
    self.posts.lock().unwrap().push((path.to_string(), body.clone()));
    if let Some(gate) = &self.save_gate {
      gate.notified().await;
    }
    self.save.clone().ok_or_else(Self::unavailable)
  }
}
