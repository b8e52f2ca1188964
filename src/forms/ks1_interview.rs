//! KS1 interview: fourteen scored questions, a typed total, and a flag for
//! parental interference during the interview.

use crate::schema::{FormSpec, Presence::*};
use crate::scoring::KS1_SCALE;

const QUESTIONS: [&str; 14] = [
  "Tell me your name and how old you are.",
  "What do you like to do when you are at home?",
  "What is your favourite story and why?",
  "Can you count these blocks for me?",
  "Which group has more? How do you know?",
  "What do you think will happen next in this picture?",
  "Tell me about a friend you like to play with.",
  "What do you do when you feel sad or cross?",
  "Can you copy this pattern with the beads?",
  "What sound does this word start with?",
  "Tell me about something new you learned.",
  "What would you do if a friend took your toy?",
  "Can you follow these two instructions in order?",
  "What would you like to learn at your new school?",
];

pub fn spec() -> FormSpec {
  let mut form = FormSpec::new("ks1-interview-questions", "KS1 Interview Questions")
    .text("fullName", "Child's full name", Required)
    .text("age", "Age", Required)
    .text("examinerName", "Examiner", Optional)
    .text("interviewDate", "Interview date", Optional);
  for (i, question) in QUESTIONS.iter().enumerate() {
    form = form.group(&format!("q{}", i + 1), question, Required);
  }
  form
    .text("totalScore", "Total score", Optional)
    .text("scoreInterpretation", "Examiner's interpretation", Optional)
    .flag("parentalInterferenceFlagged", "Parent interfered during the interview")
    .text("parentalInterferenceNotes", "Interference notes", Optional)
    .text("additionalNotes", "Additional notes", Optional)
    .scored_by("totalScore", &KS1_SCALE)
}
