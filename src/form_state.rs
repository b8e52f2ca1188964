//! Live state of one form page: current values, inline errors, and whether
//! a submit is in flight.
//!
//! Setting fields clears only those fields' errors; nothing is revalidated
//! until the next submit. `begin_submit` / `finish_submit` bracket the
//! upstream save so a page never has two saves in flight.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::{ApplicationId, FieldValue, Record};
use crate::schema::{FieldErrors, FormSpec};
use crate::submitter::encode_record;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldError {
  #[error("unknown field: {0}")]
  Unknown(String),
  #[error("field {field} expects a {expected} value, got {got}")]
  WrongKind { field: String, expected: &'static str, got: &'static str },
}

/// Why a submit did not start.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitBlocked {
  InFlight,
  Invalid(FieldErrors),
}

#[derive(Debug)]
pub struct FormState {
  form: &'static FormSpec,
  application_id: ApplicationId,
  values: Record,
  errors: FieldErrors,
  submitting: bool,
  touched: Instant,
}

impl FormState {
  pub fn new(form: &'static FormSpec, application_id: ApplicationId) -> Self {
    Self {
      values: form.defaults(),
      form,
      application_id,
      errors: FieldErrors::new(),
      submitting: false,
      touched: Instant::now(),
    }
  }

  pub fn form(&self) -> &'static FormSpec { self.form }
  pub fn application_id(&self) -> &ApplicationId { &self.application_id }
  pub fn values(&self) -> &Record { &self.values }
  pub fn errors(&self) -> &FieldErrors { &self.errors }
  pub fn is_submitting(&self) -> bool { self.submitting }

  pub fn touch(&mut self) {
    self.touched = Instant::now();
  }

  /// Untouched for at least `idle` and no save in flight.
  pub fn is_idle(&self, idle: Duration) -> bool {
    !self.submitting && self.touched.elapsed() >= idle
  }

  /// Replace every value with `record` and drop all errors.
  pub fn reset(&mut self, record: Record) {
    self.values = record;
    self.errors.clear();
  }

  fn check_field(&self, name: &str, value: &FieldValue) -> Result<(), FieldError> {
    let spec = self.form.field(name).ok_or_else(|| FieldError::Unknown(name.to_string()))?;
    if !spec.kind.accepts(value) {
      return Err(FieldError::WrongKind {
        field: name.to_string(),
        expected: spec.kind.name(),
        got: value.kind_name(),
      });
    }
    Ok(())
  }

  /// Set every field in `fields`, or none of them when any is unknown or
  /// of the wrong kind.
  pub fn set_fields(&mut self, fields: BTreeMap<String, FieldValue>) -> Result<(), FieldError> {
    for (name, value) in &fields {
      self.check_field(name, value)?;
    }
    for (name, value) in fields {
      self.errors.remove(&name);
      self.values.set(name, value);
    }
    Ok(())
  }

  /// Validate and encode the current values, then mark the page as
  /// submitting. Validation errors replace the error map.
  pub fn begin_submit(&mut self) -> Result<serde_json::Value, SubmitBlocked> {
    if self.submitting {
      return Err(SubmitBlocked::InFlight);
    }
    let body = self
      .form
      .validate(&self.values)
      .and_then(|()| encode_record(self.form, &self.values, &self.application_id));
    match body {
      Ok(body) => {
        self.errors.clear();
        self.submitting = true;
        Ok(body)
      }
      Err(errors) => {
        self.errors = errors.clone();
        Err(SubmitBlocked::Invalid(errors))
      }
    }
  }

  pub fn finish_submit(&mut self) {
    self.submitting = false;
  }
}
