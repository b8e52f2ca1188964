//! Registry of the assessment forms examiners fill in per application.
//!
//! Each submodule returns one `FormSpec`; the registry is built once and
//! shared by every session for the life of the process.

use std::sync::OnceLock;

use crate::schema::FormSpec;

mod comprehensive_profile;
mod guided_observations;
mod ks1_interview;
mod ks2_interview;
mod parent_child_dynamic;
mod peer_dynamic;

pub struct FormRegistry {
  forms: Vec<FormSpec>,
}

impl FormRegistry {
  fn build() -> Self {
    Self {
      forms: vec![
        comprehensive_profile::spec(),
        guided_observations::spec(),
        ks1_interview::spec(),
        ks2_interview::spec(),
        parent_child_dynamic::spec(),
        peer_dynamic::spec(),
      ],
    }
  }

  pub fn get(&self, id: &str) -> Option<&FormSpec> {
    self.forms.iter().find(|f| f.id == id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &FormSpec> {
    self.forms.iter()
  }
}

/// The process-wide form registry.
pub fn registry() -> &'static FormRegistry {
  static REGISTRY: OnceLock<FormRegistry> = OnceLock::new();
  REGISTRY.get_or_init(FormRegistry::build)
}
