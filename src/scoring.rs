//! Score interpretation bands for the KS1/KS2 interviews.
//!
//! Display only: the examiner sees the band for the total they typed and
//! writes their own interpretation. Nothing here is validated or saved.

use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBand {
  /// Inclusive lower bound of the band.
  pub min: u32,
  pub label: &'static str,
  pub description: &'static str,
  pub recommended_action: &'static str,
}

/// Bands ordered from highest `min` to lowest; the last band starts at 0.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreScale {
  pub max_total: u32,
  pub bands: &'static [ScoreBand],
}

impl ScoreScale {
  /// Band for a free-text total. Non-numeric input, or a total outside
  /// `0..=max_total`, has no band.
  pub fn lookup(&self, total: &str) -> Option<&'static ScoreBand> {
    let total: f64 = total.trim().parse().ok()?;
    if !total.is_finite() || total < 0.0 || total > f64::from(self.max_total) {
      return None;
    }
    self.bands.iter().find(|b| total >= f64::from(b.min))
  }
}

pub static KS1_SCALE: ScoreScale = ScoreScale {
  max_total: 70,
  bands: &[
    ScoreBand {
      min: 56,
      label: "Strong Fit",
      description: "Confident, articulate responses across most areas; ready for the programme.",
      recommended_action: "Proceed to offer.",
    },
    ScoreBand {
      min: 42,
      label: "Good Fit",
      description: "Secure in most areas with a few developing skills.",
      recommended_action: "Proceed; note areas for early support.",
    },
    ScoreBand {
      min: 28,
      label: "Developing Fit",
      description: "Several areas still developing; benefits from structured support.",
      recommended_action: "Discuss at panel; consider a follow-up observation.",
    },
    ScoreBand {
      min: 0,
      label: "Emerging Development",
      description: "Most skills are emerging; significant support would be needed.",
      recommended_action: "Refer for further assessment before a decision.",
    },
  ],
};

pub static KS2_SCALE: ScoreScale = ScoreScale {
  max_total: 60,
  bands: &[
    ScoreBand {
      min: 45,
      label: "Strong Fit",
      description: "Independent, reflective answers with clear reasoning.",
      recommended_action: "Proceed to offer.",
    },
    ScoreBand {
      min: 35,
      label: "Good Fit",
      description: "Sound reasoning in most answers with minor gaps.",
      recommended_action: "Proceed; note areas for early support.",
    },
    ScoreBand {
      min: 25,
      label: "Developing Fit",
      description: "Reasoning is inconsistent; relies on prompting.",
      recommended_action: "Discuss at panel; consider a follow-up observation.",
    },
    ScoreBand {
      min: 0,
      label: "Emerging Development",
      description: "Answers are mostly brief or prompted; skills are emerging.",
      recommended_action: "Refer for further assessment before a decision.",
    },
  ],
};
