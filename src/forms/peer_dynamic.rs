//! Peer Dynamic Observation: group play ratings, roles taken, and social
//! evidence rows.

use crate::schema::{FormSpec, Presence::*};

const ROLES: [&str; 6] = [
  "Leader",
  "Follower",
  "Mediator",
  "Observer",
  "Solitary player",
  "Disruptor",
];

pub fn spec() -> FormSpec {
  FormSpec::new("peer-dynamic-observation", "Peer Dynamic Observation")
    .text("observerName", "Observer", Required)
    .text("observationDate", "Observation date", Required)
    .text("groupSize", "Number of children in the group", Optional)
    .group("cooperation", "Cooperation", Required)
    .group("turnTaking", "Turn taking", Required)
    .group("conflictResolution", "Conflict resolution", Required)
    .group("communication", "Communication with peers", Required)
    .group("empathy", "Empathy", Optional)
    .choices("rolesObserved", "Roles taken during play", &ROLES, Required)
    .evidence_row("interpersonal", "Interpersonal")
    .evidence_row("intrapersonal", "Intrapersonal")
    .evidence_row_unchecked("leadership", "Leadership")
    .text("overallImpression", "Overall impression", Required)
}
