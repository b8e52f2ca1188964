//! Service settings: admin API location, user-facing failure messages,
//! session expiry, and the payload debug switch. Read from an optional TOML file
//! (FORMS_CONFIG_PATH), then overridden by environment variables.
//!
//! Example TOML:
//! ```toml
//! debug_payloads = true
//!
//! [api]
//! base_url = "https://admissions.example.org"
//! timeout_secs = 30
//!
//! [messages]
//! save_failed = "Could not save the form. Please try again."
//!
//! [sessions]
//! idle_timeout_secs = 3600
//! ```

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct Settings {
  #[serde(default)]
  pub api: ApiSettings,
  #[serde(default)]
  pub messages: Messages,
  #[serde(default)]
  pub sessions: SessionSettings,
  /// Log upstream request/response bodies at debug level.
  #[serde(default)]
  pub debug_payloads: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
  pub base_url: String,
  /// Bearer token forwarded to the admin API. Never logged.
  pub token: Option<String>,
  /// No timeout unless set.
  pub timeout_secs: Option<u64>,
}

impl Default for ApiSettings {
  fn default() -> Self {
    Self { base_url: "http://127.0.0.1:8080".into(), token: None, timeout_secs: None }
  }
}

/// Messages shown when a save fails without a server-supplied message.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
  pub save_failed: String,
  pub network_error: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      save_failed: "Failed to save the form. Please try again.".into(),
      network_error: "Could not reach the server. Your answers are kept; please try again.".into(),
    }
  }
}

/// Form sessions left untouched this long are dropped by the sweeper.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
  pub idle_timeout_secs: u64,
  pub sweep_interval_secs: u64,
}

impl Default for SessionSettings {
  fn default() -> Self {
    Self { idle_timeout_secs: 4 * 60 * 60, sweep_interval_secs: 60 }
  }
}

/// Settings from FORMS_CONFIG_PATH (if any) with env overrides applied.
pub fn load_settings_from_env() -> Settings {
  let mut settings = std::env::var("FORMS_CONFIG_PATH")
    .ok()
    .and_then(|path| load_settings_file(&path))
    .unwrap_or_default();

  if let Ok(url) = std::env::var("ADMIN_API_BASE_URL") {
    settings.api.base_url = url;
  }
  if let Ok(token) = std::env::var("ADMIN_API_TOKEN") {
    settings.api.token = Some(token);
  }
  settings
}

/// On any parsing/IO error, logs and returns None.
fn load_settings_file(path: &str) -> Option<Settings> {
  match std::fs::read_to_string(path) {
    Ok(s) => match parse_settings(&s) {
      Ok(cfg) => {
        info!(target: "admissions_forms", %path, "Loaded forms config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "admissions_forms", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "admissions_forms", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}

fn parse_settings(s: &str) -> Result<Settings, toml::de::Error> {
  toml::from_str::<Settings>(s)
}
