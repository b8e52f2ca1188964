//! Guided Observations Procedure: four activity zones rated with observed
//! behaviours, then evidence for each intelligence type.

use crate::schema::{FormSpec, Presence::*};

const ZONES: [(&str, &str); 4] = [
  ("zoneA", "Zone A: construction"),
  ("zoneB", "Zone B: reading corner"),
  ("zoneC", "Zone C: creative arts"),
  ("zoneD", "Zone D: outdoor play"),
];

const ZONE_BEHAVIOURS: [&str; 8] = [
  "Focused",
  "Easily distracted",
  "Works independently",
  "Seeks adult help",
  "Collaborates with peers",
  "Plays alongside peers",
  "Persists with challenge",
  "Moves between activities",
];

const INTELLIGENCES: [(&str, &str); 8] = [
  ("linguistic", "Linguistic"),
  ("logicalMathematical", "Logical-mathematical"),
  ("spatial", "Spatial"),
  ("bodilyKinesthetic", "Bodily-kinesthetic"),
  ("musical", "Musical"),
  ("interpersonal", "Interpersonal"),
  ("intrapersonal", "Intrapersonal"),
  ("naturalistic", "Naturalistic"),
];

pub fn spec() -> FormSpec {
  let mut form = FormSpec::new("guided-observations", "Guided Observations Procedure")
    .text("observerName", "Observer", Required)
    .text("observationDate", "Observation date", Required);
  for (key, label) in ZONES {
    form = form
      .group(key, label, Required)
      .choices(&format!("{key}Observations"), &format!("{label}: observed behaviours"), &ZONE_BEHAVIOURS, Required);
  }
  for (key, label) in INTELLIGENCES {
    form = form.evidence_row(key, label);
  }
  form
    .text("overallSummary", "Overall summary", Required)
    .text("recommendations", "Recommendations", Optional)
}
