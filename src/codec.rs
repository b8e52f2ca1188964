//! Checkbox-group encoding at the network boundary.
//!
//! The admin backend stores checkbox groups as flat text: selected options
//! joined with a bare comma, no escaping. Decoding splits on the same
//! delimiter and drops empty segments, so `""` is the empty selection.
//! An option that itself contains a comma cannot survive that round trip;
//! `join_choices` refuses it instead of writing corrupted data.

use thiserror::Error;

pub const DELIMITER: char = ',';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
  #[error("option {value:?} contains the ',' delimiter")]
  DelimiterInValue { value: String },
}

/// Join a checkbox selection into its wire form.
pub fn join_choices(values: &[String]) -> Result<String, CodecError> {
  if let Some(bad) = values.iter().find(|v| v.contains(DELIMITER)) {
    return Err(CodecError::DelimiterInValue { value: bad.clone() });
  }
  Ok(values.join(","))
}

/// Split a stored checkbox selection back into its options.
pub fn split_choices(raw: &str) -> Vec<String> {
  raw
    .split(DELIMITER)
    .filter(|s| !s.is_empty())
    .map(str::to_string)
    .collect()
}
