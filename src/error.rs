use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;
use tracing::debug;

use crate::form_state::{FieldError, SubmitBlocked};
use crate::protocol::ErrorOut;
use crate::schema::FieldErrors;

/// Failures of the page-controller operations, as the renderer sees them.
#[derive(Debug, Error)]
pub enum ServiceError {
  #[error("unknown form: {0}")]
  UnknownForm(String),

  #[error("unknown session: {0}")]
  UnknownSession(String),

  #[error("applicationId must not be empty")]
  MissingApplicationId,

  #[error(transparent)]
  Field(#[from] FieldError),

  #[error("the form has validation errors")]
  Invalid(FieldErrors),

  #[error("a submit is already in progress")]
  SubmitInFlight,

  /// Upstream save failed; carries the message for the examiner.
  #[error("{0}")]
  SaveFailed(String),
}

impl From<SubmitBlocked> for ServiceError {
  fn from(b: SubmitBlocked) -> Self {
    match b {
      SubmitBlocked::InFlight => ServiceError::SubmitInFlight,
      SubmitBlocked::Invalid(errors) => ServiceError::Invalid(errors),
    }
  }
}

impl ServiceError {
  pub fn status(&self) -> StatusCode {
    match self {
      ServiceError::UnknownForm(_) | ServiceError::UnknownSession(_) => StatusCode::NOT_FOUND,
      ServiceError::MissingApplicationId | ServiceError::Field(_) => StatusCode::BAD_REQUEST,
      ServiceError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ServiceError::SubmitInFlight => StatusCode::CONFLICT,
      ServiceError::SaveFailed(_) => StatusCode::BAD_GATEWAY,
    }
  }
}

impl IntoResponse for ServiceError {
  fn into_response(self) -> Response {
    let status = self.status();
    debug!(target: "admissions_forms", %status, error = %self, "Request failed");
    let message = self.to_string();
    let errors = match self {
      ServiceError::Invalid(errors) => Some(errors),
      _ => None,
    };
    (status, Json(ErrorOut { message, errors })).into_response()
  }
}
