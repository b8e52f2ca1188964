//! Parent-Child Dynamic Observation.

use crate::schema::{FormSpec, Presence::*};

const SEPARATION: [&str; 5] = [
  "Separates easily",
  "Brief hesitation",
  "Needs reassurance",
  "Distressed at separation",
  "Did not separate",
];

const PARENT_BEHAVIOURS: [&str; 7] = [
  "Encourages independence",
  "Answers for the child",
  "Corrects the child frequently",
  "Praises effort",
  "Sets clear boundaries",
  "Intervenes in play",
  "Stays in the background",
];

const CHILD_BEHAVIOURS: [&str; 6] = [
  "Checks in with parent",
  "Seeks approval",
  "Ignores parent",
  "Shares discoveries",
  "Follows parent's lead",
  "Leads the activity",
];

pub fn spec() -> FormSpec {
  FormSpec::new("parent-child-dynamic-observation", "Parent-Child Dynamic Observation")
    .text("observerName", "Observer", Required)
    .text("observationDate", "Observation date", Required)
    .text("parentPresent", "Parent or carer present", Required)
    .choices("separationResponse", "Response to separation", &SEPARATION, Required)
    .group("communication", "Quality of communication", Required)
    .group("independence", "Child's independence", Required)
    .group("warmth", "Warmth and responsiveness", Required)
    .group("boundaries", "Boundary setting", Optional)
    .choices("parentBehaviours", "Parent behaviours observed", &PARENT_BEHAVIOURS, Required)
    .choices("childBehaviours", "Child behaviours observed", &CHILD_BEHAVIOURS, Required)
    .flag("parentalInterferenceFlagged", "Parent interfered with tasks")
    .text("parentalInterferenceNotes", "Interference notes", Optional)
    .text("overallImpression", "Overall impression", Required)
}
