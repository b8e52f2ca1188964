//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::error::ServiceError;
use crate::logic::*;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state))]
pub async fn http_list_forms(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let forms: Vec<FormSummaryOut> = state.forms.iter().map(to_summary).collect();
  Json(forms)
}

#[instrument(level = "info", skip(state), fields(%form))]
pub async fn http_get_form(
  State(state): State<Arc<AppState>>,
  Path(form): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
  let spec = state.forms.get(&form).ok_or(ServiceError::UnknownForm(form))?;
  Ok(Json(spec))
}

#[instrument(level = "info", skip(state, body), fields(%form, application_id = %body.application_id))]
pub async fn http_open_session(
  State(state): State<Arc<AppState>>,
  Path(form): Path<String>,
  Json(body): Json<OpenSessionIn>,
) -> Result<impl IntoResponse, ServiceError> {
  let out = open_session(&state, &form, &body.application_id).await?;
  info!(target: "forms", session = %out.session_id, %form, "HTTP form session opened");
  Ok((StatusCode::CREATED, Json(out)))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
  Ok(Json(session_snapshot(&state, &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%id, count = body.fields.len()))]
pub async fn http_update_fields(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<UpdateFieldsIn>,
) -> Result<impl IntoResponse, ServiceError> {
  Ok(Json(update_fields(&state, &id, body.fields).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_reload_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
  Ok(Json(reload_session(&state, &id).await?))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_submit_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
  let out = submit_session(&state, &id).await?;
  info!(target: "forms", session = %id, redirect = %out.redirect, "HTTP submit saved");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state), fields(%id))]
pub async fn http_close_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<impl IntoResponse, ServiceError> {
  close_session(&state, &id).await?;
  Ok(StatusCode::NO_CONTENT)
}

#[instrument(level = "info", skip(state), fields(form = %q.form, total = %q.total))]
pub async fn http_score_band(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ScoreBandQuery>,
) -> Result<impl IntoResponse, ServiceError> {
  Ok(Json(score_band(&state, &q.form, &q.total)?))
}
