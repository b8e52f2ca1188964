//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{FieldValue, Record};
use crate::form_state::FormState;
use crate::schema::{FieldErrors, FormSpec};
use crate::scoring::ScoreBand;

//
// Forms
//

#[derive(Serialize)]
pub struct FormSummaryOut {
    pub id: String,
    pub title: String,
    pub fields: usize,
}

pub fn to_summary(f: &FormSpec) -> FormSummaryOut {
    FormSummaryOut {
        id: f.id.clone(),
        title: f.title.clone(),
        fields: f.fields.len(),
    }
}

//
// Sessions (one per mounted form page)
//

#[derive(Deserialize)]
pub struct OpenSessionIn {
    #[serde(rename = "applicationId")]
    pub application_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub session_id: String,
    pub form: String,
    pub application_id: String,
    pub values: Record,
    pub errors: FieldErrors,
    pub submitting: bool,
    /// Band for the typed total on KS1/KS2 forms; display only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_band: Option<&'static ScoreBand>,
}

/// Snapshot a session for the renderer.
pub fn to_out(session_id: &str, s: &FormState) -> SessionOut {
    let form = s.form();
    let score_band = match (&form.total_field, form.score_scale) {
        (Some(field), Some(scale)) => scale.lookup(s.values().text(field)),
        _ => None,
    };
    SessionOut {
        session_id: session_id.to_string(),
        form: form.id.clone(),
        application_id: s.application_id().to_string(),
        values: s.values().clone(),
        errors: s.errors().clone(),
        submitting: s.is_submitting(),
        score_band,
    }
}

#[derive(Deserialize)]
pub struct UpdateFieldsIn {
    pub fields: BTreeMap<String, FieldValue>,
}

#[derive(Debug, Serialize)]
pub struct SubmitOut {
    pub ok: bool,
    /// Where the page navigates next.
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

//
// Score bands
//

#[derive(Debug, Deserialize)]
pub struct ScoreBandQuery {
    pub form: String,
    #[serde(default)]
    pub total: String,
}

#[derive(Serialize)]
pub struct ScoreBandOut {
    pub form: String,
    pub total: String,
    pub band: Option<&'static ScoreBand>,
}

//
// Misc
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}
