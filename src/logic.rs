//! Page-controller operations behind the HTTP handlers.
//!
//! This includes:
//!   - opening a form session (page mount: load record, start state)
//!   - setting fields, reloading, and closing a session
//!   - validate-then-submit, with at most one save in flight per session
//!   - score band lookup for the interview forms

use std::collections::BTreeMap;

use tracing::{error, info, instrument, warn};

use crate::domain::{ApplicationId, FieldValue};
use crate::error::ServiceError;
use crate::form_state::FormState;
use crate::loader::load_record;
use crate::protocol::{to_out, ScoreBandOut, SessionOut, SubmitOut};
use crate::schema::FormSpec;
use crate::state::{AppState, SessionHandle};
use crate::submitter::{submit_record, SubmitOutcome};

fn find_form(state: &AppState, form_id: &str) -> Result<&'static FormSpec, ServiceError> {
  state.forms.get(form_id).ok_or_else(|| ServiceError::UnknownForm(form_id.to_string()))
}

async fn find_session(state: &AppState, session_id: &str) -> Result<SessionHandle, ServiceError> {
  state
    .get_session(session_id)
    .await
    .ok_or_else(|| ServiceError::UnknownSession(session_id.to_string()))
}

/// Mount a form page for an application: load any saved record and open a
/// session holding it.
#[instrument(level = "info", skip(state), fields(%form_id, %application_id))]
pub async fn open_session(state: &AppState, form_id: &str, application_id: &str) -> Result<SessionOut, ServiceError> {
  let form = find_form(state, form_id)?;
  let application_id = ApplicationId::parse(application_id).ok_or(ServiceError::MissingApplicationId)?;

  let record = load_record(state.api.as_ref(), form, &application_id).await;
  let mut fs = FormState::new(form, application_id);
  fs.reset(record);

  let (id, handle) = state.insert_session(fs).await;
  let fs = handle.lock().await;
  info!(target: "forms", session = %id, form = %form.id, application_id = %fs.application_id(), "Form session opened");
  Ok(to_out(&id, &fs))
}

#[instrument(level = "debug", skip(state), fields(%session_id))]
pub async fn session_snapshot(state: &AppState, session_id: &str) -> Result<SessionOut, ServiceError> {
  let handle = find_session(state, session_id).await?;
  let fs = handle.lock().await;
  Ok(to_out(session_id, &fs))
}

/// Set a batch of fields. An unknown or wrongly typed field rejects the
/// whole batch and leaves the session unchanged.
#[instrument(level = "info", skip(state, fields), fields(%session_id, count = fields.len()))]
pub async fn update_fields(
  state: &AppState,
  session_id: &str,
  fields: BTreeMap<String, FieldValue>,
) -> Result<SessionOut, ServiceError> {
  let handle = find_session(state, session_id).await?;
  let mut fs = handle.lock().await;
  fs.set_fields(fields)?;
  Ok(to_out(session_id, &fs))
}

/// Reload the saved record, replacing every value and error.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn reload_session(state: &AppState, session_id: &str) -> Result<SessionOut, ServiceError> {
  let handle = find_session(state, session_id).await?;
  let (form, application_id) = {
    let fs = handle.lock().await;
    (fs.form(), fs.application_id().clone())
  };
  let record = load_record(state.api.as_ref(), form, &application_id).await;
  let mut fs = handle.lock().await;
  fs.reset(record);
  Ok(to_out(session_id, &fs))
}

/// Validate, then save upstream. The session lock is released while the
/// save is in flight; a second submit in that window is refused without
/// touching the network. Values are kept whatever the outcome.
///
/// The save runs in its own task. A dropped request neither cancels it nor
/// leaves the session marked as submitting.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn submit_session(state: &AppState, session_id: &str) -> Result<SubmitOut, ServiceError> {
  let handle = find_session(state, session_id).await?;
  let (form, application_id, body) = {
    let mut fs = handle.lock().await;
    let body = fs.begin_submit().map_err(|blocked| {
      warn!(target: "forms", session = %session_id, ?blocked, "Submit blocked");
      ServiceError::from(blocked)
    })?;
    (fs.form(), fs.application_id().clone(), body)
  };

  let api = state.api.clone();
  let messages = state.settings.messages.clone();
  let session = handle.clone();
  let save = tokio::spawn(async move {
    let outcome = submit_record(api.as_ref(), form, &application_id, &body, &messages).await;
    session.lock().await.finish_submit();
    outcome
  });

  let outcome = match save.await {
    Ok(outcome) => outcome,
    Err(e) => {
      error!(target: "forms", session = %session_id, error = %e, "Save task failed");
      handle.lock().await.finish_submit();
      return Err(ServiceError::SaveFailed(state.settings.messages.save_failed.clone()));
    }
  };

  match outcome {
    SubmitOutcome::Saved { redirect, message } => Ok(SubmitOut { ok: true, redirect, message }),
    SubmitOutcome::Failed { message } => Err(ServiceError::SaveFailed(message)),
  }
}

/// Leave the page. An in-flight save still completes upstream.
#[instrument(level = "info", skip(state), fields(%session_id))]
pub async fn close_session(state: &AppState, session_id: &str) -> Result<(), ServiceError> {
  if state.remove_session(session_id).await.is_none() {
    return Err(ServiceError::UnknownSession(session_id.to_string()));
  }
  info!(target: "forms", session = %session_id, "Form session closed");
  Ok(())
}

#[instrument(level = "debug", skip(state), fields(%form_id, %total))]
pub fn score_band(state: &AppState, form_id: &str, total: &str) -> Result<ScoreBandOut, ServiceError> {
  let form = find_form(state, form_id)?;
  let band = form.score_scale.and_then(|scale| scale.lookup(total));
  Ok(ScoreBandOut { form: form.id.clone(), total: total.to_string(), band })
}
