use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// El conjunto cerrado de slugs de artista reconocidos.
///
/// Se inyecta en el validador como dato de configuración, nunca como
/// constante dentro de la regla: el mismo motor sirve para otros catálogos
/// con otros rosters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster(BTreeSet<String>);

impl Roster {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, slug: &str) -> bool {
    self.0.contains(slug)
  }

  pub fn insert(&mut self, slug: impl Into<String>) -> bool {
    self.0.insert(slug.into())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.0.iter().map(String::as_str)
  }
}

impl<S: Into<String>> FromIterator<S> for Roster {
  fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
    Roster(iter.into_iter().map(Into::into).collect())
  }
}

impl<S: Into<String>> Extend<S> for Roster {
  fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
    self.0.extend(iter.into_iter().map(Into::into));
  }
}
