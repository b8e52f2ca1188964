//! Form specifications: the field table each assessment form is built from,
//! plus the client-side validation rules run before anything is submitted.
//!
//! A `FormSpec` is plain configuration. The same table drives defaults on
//! load, kind checks when a field is set, validation on submit, and the
//! wire encoding in `submitter`.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{FieldValue, Record};
use crate::scoring::ScoreScale;

/// The only values a score select may hold.
pub const SCORE_OPTIONS: [&str; 5] = ["1", "2", "3", "4", "5"];

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_SELECT_ONE: &str = "Select at least one option";
pub const MSG_SCORE_RANGE: &str = "Score must be between 1 and 5";
pub const MSG_EVIDENCE: &str = "Select Moderate or Strong evidence";

/// Field name -> first validation message for that field.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
  Required,
  Optional,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
  Text,
  Score,
  Flag,
  Choices { options: Vec<String> },
}

impl FieldKind {
  pub fn default_value(&self) -> FieldValue {
    match self {
      FieldKind::Text | FieldKind::Score => FieldValue::Text(String::new()),
      FieldKind::Flag => FieldValue::Flag(false),
      FieldKind::Choices { .. } => FieldValue::Choices(Vec::new()),
    }
  }

  /// Whether `value` has the shape this kind binds to.
  pub fn accepts(&self, value: &FieldValue) -> bool {
    matches!(
      (self, value),
      (FieldKind::Text | FieldKind::Score, FieldValue::Text(_))
        | (FieldKind::Flag, FieldValue::Flag(_))
        | (FieldKind::Choices { .. }, FieldValue::Choices(_))
    )
  }

  pub fn name(&self) -> &'static str {
    match self {
      FieldKind::Text => "text",
      FieldKind::Score => "score",
      FieldKind::Flag => "boolean",
      FieldKind::Choices { .. } => "list",
    }
  }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSpec {
  pub name: String,
  pub label: String,
  #[serde(flatten)]
  pub kind: FieldKind,
  pub required: bool,
  /// Rating/notes pair or evidence row this field belongs to.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub group: Option<String>,
}

/// Whole-record rules checked after the per-field ones.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Refinement {
  /// At least one of `fields` must be checked; the error lands on `attach_to`.
  AtLeastOne {
    fields: Vec<String>,
    #[serde(rename = "attachTo")]
    attach_to: String,
    message: String,
  },
}

impl Refinement {
  fn check(&self, record: &Record, errors: &mut FieldErrors) {
    match self {
      Refinement::AtLeastOne { fields, attach_to, message } => {
        if !fields.iter().any(|f| record.flag(f)) {
          errors.entry(attach_to.clone()).or_insert_with(|| message.clone());
        }
      }
    }
  }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSpec {
  pub id: String,
  pub title: String,
  /// Upstream resource path, e.g. `/api/admin/ks1-interview-questions`.
  pub resource: String,
  pub fields: Vec<FieldSpec>,
  pub refinements: Vec<Refinement>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub score_scale: Option<&'static ScoreScale>,
  /// Field holding the examiner's typed total, looked up against `score_scale`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub total_field: Option<String>,
}

impl FormSpec {
  pub fn new(id: &str, title: &str) -> Self {
    Self {
      id: id.to_string(),
      title: title.to_string(),
      resource: format!("/api/admin/{id}"),
      fields: Vec::new(),
      refinements: Vec::new(),
      score_scale: None,
      total_field: None,
    }
  }

  fn push(mut self, name: String, label: &str, kind: FieldKind, presence: Presence, group: Option<&str>) -> Self {
    debug_assert!(self.field(&name).is_none(), "duplicate field {name}");
    self.fields.push(FieldSpec {
      name,
      label: label.to_string(),
      kind,
      required: presence == Presence::Required,
      group: group.map(str::to_string),
    });
    self
  }

  pub fn text(self, name: &str, label: &str, presence: Presence) -> Self {
    self.push(name.to_string(), label, FieldKind::Text, presence, None)
  }

  pub fn flag(self, name: &str, label: &str) -> Self {
    self.push(name.to_string(), label, FieldKind::Flag, Presence::Optional, None)
  }

  pub fn choices(self, name: &str, label: &str, options: &[&str], presence: Presence) -> Self {
    let kind = FieldKind::Choices { options: options.iter().map(|s| s.to_string()).collect() };
    self.push(name.to_string(), label, kind, presence, None)
  }

  /// Rating + notes pair: `<key>Score` and `<key>Notes`.
  /// Only the rating follows `presence`; notes are always optional.
  pub fn group(self, key: &str, label: &str, presence: Presence) -> Self {
    self
      .push(format!("{key}Score"), label, FieldKind::Score, presence, Some(key))
      .push(format!("{key}Notes"), &format!("{label} notes"), FieldKind::Text, Presence::Optional, Some(key))
  }

  /// Evidence row `<key>Moderate` / `<key>Strong` / `<key>Notes`,
  /// requiring at least one of the two flags.
  pub fn evidence_row(self, key: &str, label: &str) -> Self {
    let mut spec = self.evidence_row_unchecked(key, label);
    spec.refinements.push(Refinement::AtLeastOne {
      fields: vec![format!("{key}Moderate"), format!("{key}Strong")],
      attach_to: format!("{key}Moderate"),
      message: MSG_EVIDENCE.to_string(),
    });
    spec
  }

  /// Evidence row without the at-least-one rule.
  pub fn evidence_row_unchecked(self, key: &str, label: &str) -> Self {
    self
      .push(format!("{key}Moderate"), &format!("{label}: moderate evidence"), FieldKind::Flag, Presence::Optional, Some(key))
      .push(format!("{key}Strong"), &format!("{label}: strong evidence"), FieldKind::Flag, Presence::Optional, Some(key))
      .push(format!("{key}Notes"), &format!("{label}: evidence notes"), FieldKind::Text, Presence::Optional, Some(key))
  }

  pub fn scored_by(mut self, total_field: &str, scale: &'static ScoreScale) -> Self {
    self.total_field = Some(total_field.to_string());
    self.score_scale = Some(scale);
    self
  }

  pub fn field(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|f| f.name == name)
  }

  /// A record holding every field at its default ("" / false / []).
  pub fn defaults(&self) -> Record {
    let mut record = Record::new();
    for f in &self.fields {
      record.set(f.name.clone(), f.kind.default_value());
    }
    record
  }

  /// Validate a candidate record. Per-field rules run first; a refinement
  /// never replaces an error already reported for its field.
  pub fn validate(&self, record: &Record) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for f in &self.fields {
      if let Some(msg) = check_field(f, record.get(&f.name)) {
        errors.insert(f.name.clone(), msg);
      }
    }
    for r in &self.refinements {
      r.check(record, &mut errors);
    }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
  }
}

fn check_field(field: &FieldSpec, value: Option<&FieldValue>) -> Option<String> {
  if let Some(v) = value {
    if !field.kind.accepts(v) {
      return Some(format!("Expected a {} value", field.kind.name()));
    }
  }
  match &field.kind {
    FieldKind::Text => {
      let text = value.and_then(FieldValue::as_text).unwrap_or("");
      (field.required && text.is_empty()).then(|| MSG_REQUIRED.to_string())
    }
    FieldKind::Score => {
      let text = value.and_then(FieldValue::as_text).unwrap_or("");
      if text.is_empty() {
        field.required.then(|| MSG_REQUIRED.to_string())
      } else if !SCORE_OPTIONS.contains(&text) {
        Some(MSG_SCORE_RANGE.to_string())
      } else {
        None
      }
    }
    FieldKind::Flag => None,
    FieldKind::Choices { options } => {
      let selected = value.and_then(FieldValue::as_choices).unwrap_or(&[]);
      if field.required && selected.is_empty() {
        return Some(MSG_SELECT_ONE.to_string());
      }
      selected
        .iter()
        .find(|s| !options.contains(*s))
        .map(|s| format!("Unknown option: {s}"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> FormSpec {
    FormSpec::new("sample", "Sample")
      .text("fullName", "Full name", Presence::Required)
      .text("comments", "Comments", Presence::Optional)
      .group("zoneA", "Zone A", Presence::Required)
      .choices("zoneAObservations", "Zone A observations", &["focused", "distracted"], Presence::Required)
      .flag("consent", "Consent")
      .evidence_row("linguistic", "Linguistic")
  }

  fn valid(spec: &FormSpec) -> Record {
    let mut r = spec.defaults();
    r.set("fullName", FieldValue::Text("Aisha".into()));
    r.set("zoneAScore", FieldValue::Text("4".into()));
    r.set("zoneAObservations", FieldValue::Choices(vec!["focused".into()]));
    r.set("linguisticStrong", FieldValue::Flag(true));
    r
  }

  #[test]
  fn defaults_cover_every_field() {
    let spec = sample();
    let d = spec.defaults();
    assert_eq!(d.len(), spec.fields.len());
    assert_eq!(d.get("comments"), Some(&FieldValue::Text(String::new())));
    assert_eq!(d.get("consent"), Some(&FieldValue::Flag(false)));
    assert_eq!(d.get("zoneAObservations"), Some(&FieldValue::Choices(vec![])));
  }

  #[test]
  fn group_builds_rating_and_notes_pair() {
    let spec = sample();
    let score = spec.field("zoneAScore").unwrap();
    let notes = spec.field("zoneANotes").unwrap();
    assert!(score.required);
    assert!(!notes.required);
    assert_eq!(score.group.as_deref(), Some("zoneA"));
    assert_eq!(notes.group.as_deref(), Some("zoneA"));
  }

  #[test]
  fn valid_record_passes() {
    let spec = sample();
    assert_eq!(spec.validate(&valid(&spec)), Ok(()));
  }

  #[test]
  fn each_required_field_is_gated_on_its_own_name() {
    let spec = sample();
    for name in ["fullName", "zoneAScore"] {
      let mut r = valid(&spec);
      r.set(name, FieldValue::Text(String::new()));
      let errors = spec.validate(&r).unwrap_err();
      assert_eq!(errors.len(), 1, "{name}: {errors:?}");
      assert_eq!(errors.get(name).map(String::as_str), Some(MSG_REQUIRED));
    }
  }

  #[test]
  fn required_checkbox_group_needs_a_selection() {
    let spec = sample();
    let mut r = valid(&spec);
    r.set("zoneAObservations", FieldValue::Choices(vec![]));
    let errors = spec.validate(&r).unwrap_err();
    assert_eq!(errors.get("zoneAObservations").map(String::as_str), Some(MSG_SELECT_ONE));
  }

  #[test]
  fn unknown_checkbox_option_is_rejected() {
    let spec = sample();
    let mut r = valid(&spec);
    r.set("zoneAObservations", FieldValue::Choices(vec!["focused".into(), "sleepy".into()]));
    let errors = spec.validate(&r).unwrap_err();
    assert_eq!(errors.get("zoneAObservations").map(String::as_str), Some("Unknown option: sleepy"));
  }

  #[test]
  fn scores_outside_one_to_five_are_rejected() {
    let spec = sample();
    for bad in ["0", "6", "3.5", " 3"] {
      let mut r = valid(&spec);
      r.set("zoneAScore", FieldValue::Text(bad.into()));
      let errors = spec.validate(&r).unwrap_err();
      assert_eq!(errors.get("zoneAScore").map(String::as_str), Some(MSG_SCORE_RANGE), "{bad}");
    }
  }

  #[test]
  fn evidence_row_error_attaches_to_moderate() {
    let spec = sample();
    let mut r = valid(&spec);
    r.set("linguisticStrong", FieldValue::Flag(false));
    let errors = spec.validate(&r).unwrap_err();
    assert_eq!(errors.get("linguisticModerate").map(String::as_str), Some(MSG_EVIDENCE));
    assert!(!errors.contains_key("linguisticStrong"));

    r.set("linguisticModerate", FieldValue::Flag(true));
    assert_eq!(spec.validate(&r), Ok(()));
  }

  #[test]
  fn wrong_kind_is_reported_on_the_field() {
    let spec = sample();
    let mut r = valid(&spec);
    r.set("fullName", FieldValue::Flag(true));
    let errors = spec.validate(&r).unwrap_err();
    assert_eq!(errors.get("fullName").map(String::as_str), Some("Expected a text value"));
  }

  #[test]
  fn unchecked_evidence_rows_add_no_refinement() {
    let spec = FormSpec::new("x", "X").evidence_row_unchecked("musical", "Musical");
    assert!(spec.refinements.is_empty());
    assert_eq!(spec.validate(&spec.defaults()), Ok(()));
  }
}
