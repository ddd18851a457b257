use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Representa el tipo de pack de un lanzamiento del catálogo.
///
/// A diferencia de una clasificación abierta, aquí la enumeración es
/// **cerrada**: el catálogo solo admite estos tres valores, escritos en
/// minúsculas y sin variantes. Cualquier otra cosa (`EP`, `Album`, `mix`…)
/// es un error de datos, no un tipo nuevo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackType {
  /// Un álbum de un solo artista o dúo.
  Album,
  /// Recopilación de pistas de varios artistas.
  Compilation,
  /// Lanzamiento de una sola pista o pocas pistas.
  Single,
}

impl PackType {
  /// Los tokens exactamente aceptados, en el orden de la enumeración.
  pub const TOKENS: [&'static str; 3] = ["album", "compilation", "single"];
}

/// Error al parsear un tipo de pack desconocido.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pack type: {0:?}")]
pub struct UnknownPackType(pub String);

impl FromStr for PackType {
  type Err = UnknownPackType;

  /// Convierte una cadena en un `PackType`.
  ///
  /// La comparación es exacta y sensible a mayúsculas: **parsear sí falla**
  /// para cualquier valor fuera de la enumeración.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "album" => Ok(PackType::Album),
      "compilation" => Ok(PackType::Compilation),
      "single" => Ok(PackType::Single),
      _ => Err(UnknownPackType(s.to_owned())),
    }
  }
}

impl fmt::Display for PackType {
  /// Imprime el token canónico en minúsculas, tal como aparece en el YAML.
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PackType::Album => write!(f, "album"),
      PackType::Compilation => write!(f, "compilation"),
      PackType::Single => write!(f, "single"),
    }
  }
}
