//! Application state: form sessions, the admin API client, the form
//! registry, and settings.
//!
//! Each mounted form page owns one session. Sessions live in memory only;
//! nothing here coordinates examiners editing the same application, so the
//! last save upstream wins. Pages that go away without closing their session
//! are swept once idle for `sessions.idle_timeout_secs`.

use std::{collections::HashMap, sync::Arc, time::Duration};

use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
    time,
};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::api::{AdminApi, ApiError, HttpAdminApi};
use crate::config::{load_settings_from_env, Settings};
use crate::form_state::FormState;
use crate::forms::{registry, FormRegistry};

pub type SessionHandle = Arc<Mutex<FormState>>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<RwLock<HashMap<String, SessionHandle>>>,
    pub api: Arc<dyn AdminApi>,
    pub forms: &'static FormRegistry,
    pub settings: Settings,
}

impl AppState {
    /// Build state from env: load settings, init the admin API client.
    #[instrument(level = "info", skip_all)]
    pub fn from_env() -> Result<Self, ApiError> {
        let settings = load_settings_from_env();
        let api = HttpAdminApi::new(&settings.api, settings.debug_payloads)?;
        info!(
            target: "admissions_forms",
            base_url = %api.base_url,
            authenticated = settings.api.token.is_some(),
            timeout_secs = ?settings.api.timeout_secs,
            "Admin API client ready"
        );
        for f in registry().iter() {
            info!(target: "forms", form = %f.id, fields = f.fields.len(), "Form registered");
        }
        Ok(Self::with_api(Arc::new(api), settings))
    }

    pub fn with_api(api: Arc<dyn AdminApi>, settings: Settings) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            api,
            forms: registry(),
            settings,
        }
    }

    /// Store a new session and return its id.
    #[instrument(level = "debug", skip(self, state), fields(form = %state.form().id))]
    pub async fn insert_session(&self, state: FormState) -> (String, SessionHandle) {
        let id = Uuid::new_v4().to_string();
        let handle = Arc::new(Mutex::new(state));
        self.sessions.write().await.insert(id.clone(), handle.clone());
        (id, handle)
    }

    /// Look up a session and mark it as used.
    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn get_session(&self, id: &str) -> Option<SessionHandle> {
        let handle = self.sessions.read().await.get(id).cloned()?;
        handle.lock().await.touch();
        Some(handle)
    }

    #[instrument(level = "debug", skip(self), fields(%id))]
    pub async fn remove_session(&self, id: &str) -> Option<SessionHandle> {
        self.sessions.write().await.remove(id)
    }

    /// Drop sessions untouched for `idle`. A session that is locked or has a
    /// save in flight is kept. Returns how many were dropped.
    pub async fn evict_idle_sessions(&self, idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(fs) => !fs.is_idle(idle),
            Err(_) => true,
        });
        before - sessions.len()
    }

    /// Periodically evict idle sessions, per `settings.sessions`.
    pub fn spawn_session_sweeper(&self) -> JoinHandle<()> {
        let state = self.clone();
        let idle = Duration::from_secs(self.settings.sessions.idle_timeout_secs);
        let every = Duration::from_secs(self.settings.sessions.sweep_interval_secs.max(1));
        tokio::spawn(async move {
            let mut interval = time::interval(every);
            loop {
                interval.tick().await;
                let evicted = state.evict_idle_sessions(idle).await;
                if evicted > 0 {
                    info!(target: "forms", evicted, "Idle form sessions evicted");
                } else {
                    debug!(target: "forms", "No idle form sessions");
                }
            }
        })
    }
}
