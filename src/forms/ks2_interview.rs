//! KS2 interview: twelve scored questions with a typed total.

use crate::schema::{FormSpec, Presence::*};
use crate::scoring::KS2_SCALE;

const QUESTIONS: [&str; 12] = [
  "Introduce yourself and tell me about your current school.",
  "Which subject do you enjoy most, and why?",
  "Describe a time you found something difficult and kept trying.",
  "How would you solve this word problem? Talk me through it.",
  "What is a book you have read recently? What did you think of it?",
  "How do you organise your homework?",
  "Tell me about a time you worked in a team.",
  "What would you do if you disagreed with a classmate?",
  "What makes a good friend?",
  "If you could change one thing about your school, what would it be?",
  "What do you hope to achieve next year?",
  "Is there anything you would like to ask us?",
];

pub fn spec() -> FormSpec {
  let mut form = FormSpec::new("ks2-interview-questions", "KS2 Interview Questions")
    .text("fullName", "Child's full name", Required)
    .text("age", "Age", Required)
    .text("yearGroup", "Current year group", Optional)
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
    .scored_by("totalScore", &KS2_SCALE)
}
