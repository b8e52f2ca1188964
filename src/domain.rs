//! Domain models: field values, assessment records, and application ids.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single bound field value, as the renderer holds it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
  /// Checkbox.
  Flag(bool),
  /// Free text or a selected score ("1".."5").
  Text(String),
  /// Checkbox group; joined with commas only at the network boundary.
  Choices(Vec<String>),
}

impl FieldValue {
  pub fn as_text(&self) -> Option<&str> {
    match self { FieldValue::Text(s) => Some(s), _ => None }
  }

  pub fn as_flag(&self) -> Option<bool> {
    match self { FieldValue::Flag(b) => Some(*b), _ => None }
  }

  pub fn as_choices(&self) -> Option<&[String]> {
    match self { FieldValue::Choices(v) => Some(v), _ => None }
  }

  /// Short name used in error messages.
  pub fn kind_name(&self) -> &'static str {
    match self {
      FieldValue::Flag(_) => "boolean",
      FieldValue::Text(_) => "text",
      FieldValue::Choices(_) => "list",
    }
  }
}

/// One form's answers for one application, keyed by field name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
  values: BTreeMap<String, FieldValue>,
}

impl Record {
  pub fn new() -> Self { Self::default() }

  pub fn get(&self, name: &str) -> Option<&FieldValue> { self.values.get(name) }

  pub fn set(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
    self.values.insert(name.into(), value)
  }

  /// Text value of `name`, or "" when absent or not text.
  pub fn text(&self, name: &str) -> &str {
    self.get(name).and_then(FieldValue::as_text).unwrap_or("")
  }

  pub fn flag(&self, name: &str) -> bool {
    self.get(name).and_then(FieldValue::as_flag).unwrap_or(false)
  }

  #[cfg(test)]
  pub fn choices(&self, name: &str) -> &[String] {
    self.get(name).and_then(FieldValue::as_choices).unwrap_or(&[])
  }

  #[cfg(test)]
  pub fn len(&self) -> usize { self.values.len() }
}

/// Opaque identifier of a child's admission case, taken from the route.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplicationId(String);

impl ApplicationId {
  /// Accepts any identifier that is not blank, kept exactly as given.
  pub fn parse(raw: &str) -> Option<Self> {
    if raw.trim().is_empty() { None } else { Some(Self(raw.to_string())) }
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// Stage overview page the examiner lands on after a successful save.
  pub fn overview_path(&self) -> String {
    format!("/admin/applications/{}", self.0)
  }
}

impl fmt::Display for ApplicationId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
