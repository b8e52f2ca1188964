//! Record loading: fetch a previously saved record for an application and
//! shape it into form values.
//!
//! A missing record or a failed read is not an error for the examiner; the
//! form simply starts at its defaults.

use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use crate::api::{AdminApi, LoadEnvelope};
use crate::codec::split_choices;
use crate::domain::{ApplicationId, FieldValue, Record};
use crate::schema::{FieldKind, FormSpec};

/// Load the stored record for `application_id`, or the form's defaults.
#[instrument(level = "info", skip(api, form), fields(form = %form.id, %application_id))]
pub async fn load_record(api: &dyn AdminApi, form: &FormSpec, application_id: &ApplicationId) -> Record {
  let raw = match api.get(&form.resource, &[("applicationId", application_id.as_str())]).await {
    Ok(v) => v,
    Err(e) => {
      warn!(target: "forms", form = %form.id, %application_id, error = %e, "Record load failed; starting from defaults");
      return form.defaults();
    }
  };

  let envelope = match serde_json::from_value::<LoadEnvelope>(raw) {
    Ok(env) => env,
    Err(e) => {
      warn!(target: "forms", form = %form.id, error = %e, "Unexpected load response shape; starting from defaults");
      return form.defaults();
    }
  };

  match envelope.into_record() {
    Some(data) => {
      info!(target: "forms", form = %form.id, %application_id, "Existing record loaded");
      record_from_raw(form, &data)
    }
    None => {
      debug!(target: "forms", form = %form.id, %application_id, "No saved record; starting from defaults");
      form.defaults()
    }
  }
}

/// Map a raw stored record onto the form's fields. Fields the record lacks,
/// or holds in an unusable shape, take their defaults; unknown keys are ignored.
pub fn record_from_raw(form: &FormSpec, raw: &Map<String, Value>) -> Record {
  let mut record = Record::new();
  for field in &form.fields {
    let value = raw
      .get(&field.name)
      .and_then(|v| {
        let coerced = coerce(&field.kind, v);
        if coerced.is_none() && !v.is_null() {
          debug!(target: "forms", form = %form.id, field = %field.name, "Ignoring stored value of unexpected shape");
        }
        coerced
      })
      .unwrap_or_else(|| field.kind.default_value());
    record.set(field.name.clone(), value);
  }
  record
}

fn coerce(kind: &FieldKind, raw: &Value) -> Option<FieldValue> {
  match kind {
    FieldKind::Text | FieldKind::Score => match raw {
      Value::String(s) => Some(FieldValue::Text(s.clone())),
      Value::Number(n) => Some(FieldValue::Text(n.to_string())),
      _ => None,
    },
    FieldKind::Flag => match raw {
      Value::Bool(b) => Some(FieldValue::Flag(*b)),
      Value::String(s) if s.eq_ignore_ascii_case("true") => Some(FieldValue::Flag(true)),
      Value::String(s) if s.eq_ignore_ascii_case("false") || s.is_empty() => Some(FieldValue::Flag(false)),
      Value::Number(n) => n.as_i64().map(|n| FieldValue::Flag(n != 0)),
      _ => None,
    },
    FieldKind::Choices { .. } => match raw {
      Value::String(s) => Some(FieldValue::Choices(split_choices(s))),
      Value::Array(items) => Some(FieldValue::Choices(
        items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
      )),
      _ => None,
    },
  }
}
