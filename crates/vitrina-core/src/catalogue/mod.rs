pub mod pack_type;

pub use pack_type::PackType;

use serde::Deserialize;
use serde_yaml::{Sequence, Value};
use std::fmt;

/// Una entrada del catálogo tal como llega del YAML, **sin tipar**.
///
/// Se conserva el valor crudo a propósito: si deserializáramos directo a un
/// struct estricto, una entrada malformada reventaría en el parseo y las
/// reglas de validación nunca llegarían a verla. Aquí la presencia y el tipo
/// de cada campo son, justamente, lo que se valida.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct CatalogueEntry {
  raw: Value,
}

impl CatalogueEntry {
  pub fn new(raw: Value) -> Self {
    Self { raw }
  }

  /// Acceso al valor YAML completo de la entrada.
  pub fn raw(&self) -> &Value {
    &self.raw
  }

  /// Busca un campo por clave. Una entrada que no es un mapping no tiene campos.
  pub fn field(&self, key: &str) -> Option<&Value> {
    self.raw.get(key)
  }

  pub fn has_field(&self, key: &str) -> bool {
    self.field(key).is_some()
  }

  /// `id` de la entrada, solo si el campo existe *y* es una cadena.
  pub fn id(&self) -> Option<&str> {
    self.field("id").and_then(Value::as_str)
  }

  pub fn name(&self) -> Option<&str> {
    self.field("name").and_then(Value::as_str)
  }

  /// El campo `type` (tipo de pack), sin interpretar todavía.
  pub fn pack_type(&self) -> Option<&str> {
    self.field("type").and_then(Value::as_str)
  }

  pub fn artists(&self) -> Option<&Sequence> {
    self.field("artists").and_then(Value::as_sequence)
  }

  /// El campo `playlist` crudo, si está presente.
  pub fn playlist(&self) -> Option<&Value> {
    self.field("playlist")
  }

  /// Referencia de playlist *efectiva*: presente, "truthy" y de tipo cadena.
  pub fn playlist_ref(&self) -> Option<&str> {
    self.playlist().filter(|v| truthy(v)).and_then(Value::as_str)
  }

  /// Identificador para diagnósticos: el `id` si existe como cadena,
  /// o la posición dentro del catálogo en su defecto.
  pub fn entry_ref(&self, index: usize) -> EntryRef {
    match self.id() {
      Some(id) => EntryRef::Id(id.to_owned()),
      None => EntryRef::Index(index),
    }
  }
}

/// Regla de "truthiness" que hereda el catálogo de su origen:
/// null, `false`, `0`, la cadena vacía y las colecciones vacías cuentan
/// como ausentes; todo lo demás, como presentes.
pub fn truthy(value: &Value) -> bool {
  match value {
    Value::Null => false,
    Value::Bool(b) => *b,
    Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
    Value::String(s) => !s.is_empty(),
    Value::Sequence(seq) => !seq.is_empty(),
    Value::Mapping(map) => !map.is_empty(),
    Value::Tagged(tagged) => truthy(&tagged.value),
  }
}

/// Cómo se nombra una entrada en los diagnósticos.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryRef {
  /// El `id` declarado por la entrada.
  Id(String),
  /// Posición dentro del catálogo, cuando el `id` falta o no es una cadena.
  Index(usize),
}

impl fmt::Display for EntryRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EntryRef::Id(id) => write!(f, "{id}"),
      EntryRef::Index(index) => write!(f, "index {index}"),
    }
  }
}

/// La secuencia ordenada de entradas bajo validación.
///
/// Se carga una sola vez por ejecución y no se muta nunca: el validador solo
/// la observa.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
  entries: Vec<CatalogueEntry>,
}

impl Catalogue {
  pub fn new(entries: Vec<CatalogueEntry>) -> Self {
    Self { entries }
  }

  pub fn entries(&self) -> &[CatalogueEntry] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> std::slice::Iter<'_, CatalogueEntry> {
    self.entries.iter()
  }
}

impl From<Vec<CatalogueEntry>> for Catalogue {
  fn from(entries: Vec<CatalogueEntry>) -> Self {
    Catalogue::new(entries)
  }
}

impl<'a> IntoIterator for &'a Catalogue {
  type Item = &'a CatalogueEntry;
  type IntoIter = std::slice::Iter<'a, CatalogueEntry>;

  fn into_iter(self) -> Self::IntoIter {
    self.entries.iter()
  }
}
