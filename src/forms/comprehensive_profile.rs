//! Comprehensive Profile Sheet: background, developmental ratings and an
//! overall recommendation for the child.

use crate::schema::{FormSpec, Presence::*};

const STRENGTHS: [&str; 8] = [
  "Verbal expression",
  "Early literacy",
  "Number sense",
  "Creativity",
  "Physical coordination",
  "Social confidence",
  "Emotional regulation",
  "Curiosity",
];

const CONCERNS: [&str; 7] = [
  "Speech and language",
  "Attention",
  "Fine motor",
  "Gross motor",
  "Separation anxiety",
  "Peer relationships",
  "None noted",
];

const RECOMMENDATIONS: [&str; 4] = [
  "Recommend admission",
  "Recommend admission with support",
  "Further assessment",
  "Not recommended at this time",
];

pub fn spec() -> FormSpec {
  FormSpec::new("comprehensive-profile-sheet", "Comprehensive Profile Sheet")
    .text("fullName", "Child's full name", Required)
    .text("dateOfBirth", "Date of birth", Required)
    .text("currentSchool", "Current school or nursery", Optional)
    .text("yearGroup", "Entry year group", Required)
    .text("homeLanguages", "Languages spoken at home", Optional)
    .text("familyBackground", "Family background", Optional)
    .text("medicalNotes", "Medical or learning needs", Optional)
    .group("academic", "Academic readiness", Required)
    .group("social", "Social development", Required)
    .group("emotional", "Emotional development", Required)
    .group("physical", "Physical development", Required)
    .group("communication", "Communication", Required)
    .choices("strengths", "Observed strengths", &STRENGTHS, Required)
    .choices("areasOfConcern", "Areas of concern", &CONCERNS, Required)
    .flag("senSupportRequired", "Additional learning support required")
    .text("senSupportNotes", "Support notes", Optional)
    .choices("recommendation", "Recommendation", &RECOMMENDATIONS, Required)
    .text("summary", "Examiner summary", Required)
}
