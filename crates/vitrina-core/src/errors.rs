// crates/vitrina-core/src/errors.rs
use crate::catalogue::EntryRef;
use crate::checks::Rule;
use thiserror::Error;

/// Único tipo de error de validación.
///
/// Solo se lanza en modo fail-fast; en modo collect las violaciones se
/// acumulan en el `CheckOutcome` y este error no aparece nunca. El mensaje
/// nombra la regla violada y la entrada ofensora (por `id` o por posición).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{rule} violated by entry {entry}: {detail}")]
pub struct ValidationError {
  rule: Rule,
  entry: EntryRef,
  detail: String,
}

impl ValidationError {
  pub fn new(rule: Rule, entry: EntryRef, detail: impl Into<String>) -> Self {
    Self { rule, entry, detail: detail.into() }
  }

  pub fn rule(&self) -> Rule {
    self.rule
  }

  pub fn entry(&self) -> &EntryRef {
    &self.entry
  }

  pub fn detail(&self) -> &str {
    &self.detail
  }
}
