//! Record submission: turn validated form values into the admin API's wire
//! shape and save them.
//!
//! Wire shape: `{ "applicationId": <id>, <field>: <value>, ... }` with every
//! declared field present and checkbox groups joined into comma strings.
//! There is no retry; a failed save is reported and the caller keeps its
//! form values so the examiner can resubmit.

use serde_json::{Map, Value};
use tracing::{error, info, instrument, warn};

use crate::api::{AdminApi, SaveEnvelope};
use crate::codec::join_choices;
use crate::config::Messages;
use crate::domain::{ApplicationId, FieldValue, Record};
use crate::schema::{FieldErrors, FormSpec};

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
  /// Saved; the page moves on to `redirect`.
  Saved { redirect: String, message: Option<String> },
  /// Not saved; `message` is shown to the examiner.
  Failed { message: String },
}

/// Build the wire body for `record`. Fails only when a checkbox value
/// cannot be comma-encoded.
pub fn encode_record(form: &FormSpec, record: &Record, application_id: &ApplicationId) -> Result<Value, FieldErrors> {
  let mut body = Map::new();
  let mut errors = FieldErrors::new();
  body.insert("applicationId".into(), Value::String(application_id.as_str().to_string()));

  for field in &form.fields {
    let value = record.get(&field.name).cloned().unwrap_or_else(|| field.kind.default_value());
    let wire = match value {
      FieldValue::Text(s) => Value::String(s),
      FieldValue::Flag(b) => Value::Bool(b),
      FieldValue::Choices(items) => match join_choices(&items) {
        Ok(joined) => Value::String(joined),
        Err(e) => {
          errors.insert(field.name.clone(), e.to_string());
          continue;
        }
      },
    };
    body.insert(field.name.clone(), wire);
  }

  if errors.is_empty() { Ok(Value::Object(body)) } else { Err(errors) }
}

/// POST an encoded body to the form's resource.
#[instrument(level = "info", skip(api, form, body, messages), fields(form = %form.id, %application_id))]
pub async fn submit_record(
  api: &dyn AdminApi,
  form: &FormSpec,
  application_id: &ApplicationId,
  body: &Value,
  messages: &Messages,
) -> SubmitOutcome {
  let raw = match api.post(&form.resource, body).await {
    Ok(v) => v,
    Err(e) => {
      error!(target: "forms", form = %form.id, %application_id, error = %e, "Record save failed (transport)");
      return SubmitOutcome::Failed { message: messages.network_error.clone() };
    }
  };

  let envelope = SaveEnvelope::from_response(&raw);
  if envelope.success {
    info!(target: "forms", form = %form.id, %application_id, "Record saved");
    SubmitOutcome::Saved { redirect: application_id.overview_path(), message: envelope.message }
  } else {
    let message = envelope
      .message
      .or(envelope.error)
      .filter(|m| !m.trim().is_empty())
      .unwrap_or_else(|| messages.save_failed.clone());
    warn!(target: "forms", form = %form.id, %application_id, %message, "Record save rejected by server");
    SubmitOutcome::Failed { message }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::forms::registry;
  use crate::testing::FakeAdminApi;
  use serde_json::json;

  fn app() -> ApplicationId {
    ApplicationId::parse("app-3").unwrap()
  }

  #[test]
  fn encode_joins_groups_and_includes_every_field() {
    let form = registry().get("peer-dynamic-observation").unwrap();
    let mut record = form.defaults();
    record.set("rolesObserved", FieldValue::Choices(vec!["Leader".into(), "Mediator".into()]));
    record.set("interpersonalStrong", FieldValue::Flag(true));

    let body = encode_record(form, &record, &app()).unwrap();
    let obj = body.as_object().unwrap();
    assert_eq!(obj.len(), form.fields.len() + 1);
    assert_eq!(obj["applicationId"], json!("app-3"));
    assert_eq!(obj["rolesObserved"], json!("Leader,Mediator"));
    assert_eq!(obj["interpersonalStrong"], json!(true));
    assert_eq!(obj["overallImpression"], json!(""));
  }

  #[test]
  fn encode_reports_undelimitable_values_on_their_field() {
    let form = registry().get("peer-dynamic-observation").unwrap();
    let mut record = form.defaults();
    record.set("rolesObserved", FieldValue::Choices(vec!["Leader, sometimes".into()]));
    let errors = encode_record(form, &record, &app()).unwrap_err();
    assert!(errors.contains_key("rolesObserved"));
  }

  #[tokio::test]
  async fn success_redirects_to_application_overview() {
    let form = registry().get("ks2-interview-questions").unwrap();
    let api = FakeAdminApi::new().with_save(json!({"success": true, "message": "Saved"}));
    let body = encode_record(form, &form.defaults(), &app()).unwrap();
    let outcome = submit_record(&api, form, &app(), &body, &Messages::default()).await;
    assert_eq!(
      outcome,
      SubmitOutcome::Saved { redirect: "/admin/applications/app-3".into(), message: Some("Saved".into()) }
    );
    let posts = api.posts();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].0, "/api/admin/ks2-interview-questions");
    assert_eq!(posts[0].1, body);
  }

  #[tokio::test]
  async fn server_failure_message_is_shown_verbatim_else_fallback() {
    let form = registry().get("ks2-interview-questions").unwrap();
    let body = encode_record(form, &form.defaults(), &app()).unwrap();
    let messages = Messages::default();

    let api = FakeAdminApi::new().with_save(json!({"success": false, "message": "Application is closed"}));
    assert_eq!(
      submit_record(&api, form, &app(), &body, &messages).await,
      SubmitOutcome::Failed { message: "Application is closed".into() }
    );

    let api = FakeAdminApi::new().with_save(json!({"success": false, "error": "Validation failed"}));
    assert_eq!(
      submit_record(&api, form, &app(), &body, &messages).await,
      SubmitOutcome::Failed { message: "Validation failed".into() }
    );

    let api = FakeAdminApi::new().with_save(json!({"success": false}));
    assert_eq!(
      submit_record(&api, form, &app(), &body, &messages).await,
      SubmitOutcome::Failed { message: messages.save_failed.clone() }
    );

    let api = FakeAdminApi::new().with_save(json!("garbage"));
    assert_eq!(
      submit_record(&api, form, &app(), &body, &messages).await,
      SubmitOutcome::Failed { message: messages.save_failed.clone() }
    );
  }

  #[tokio::test]
  async fn success_with_a_non_text_message_still_redirects() {
    let form = registry().get("ks2-interview-questions").unwrap();
    let body = encode_record(form, &form.defaults(), &app()).unwrap();
    let api = FakeAdminApi::new().with_save(json!({"success": true, "message": 123}));
    assert_eq!(
      submit_record(&api, form, &app(), &body, &Messages::default()).await,
      SubmitOutcome::Saved { redirect: "/admin/applications/app-3".into(), message: None }
    );
  }

  #[tokio::test]
  async fn transport_failure_uses_network_message() {
    let form = registry().get("ks2-interview-questions").unwrap();
    let body = encode_record(form, &form.defaults(), &app()).unwrap();
    let api = FakeAdminApi::new().with_save_error();
    let messages = Messages::default();
    assert_eq!(
      submit_record(&api, form, &app(), &body, &messages).await,
      SubmitOutcome::Failed { message: messages.network_error.clone() }
    );
  }
}
