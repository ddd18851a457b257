use serde::Deserialize;
use vitrina_core::{FailureMode, Roster};

/// Sección `[validator]` del archivo de configuración.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
  /// Disciplina de reporte: `collect` (por defecto) o `fail-fast`.
  pub mode: FailureMode,
}

/// Sección `[roster]`: el conjunto cerrado de artistas reconocidos.
///
/// Los grupos son informativos (reflejan la historia del sello); para el
/// validador solo cuenta la unión de los cuatro. Los valores por defecto son
/// el roster observado en el catálogo, de modo que sin archivo de
/// configuración el binario funciona tal cual.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
  /// Miembros fundadores.
  pub founding: Vec<String>,
  /// Miembros que se unieron después.
  pub joined: Vec<String>,
  /// Colaboradores externos que aparecen en el catálogo sin ser miembros.
  pub guests: Vec<String>,
  /// Comodines, como `various-artists` para las recopilaciones.
  pub extra: Vec<String>,
}

impl RosterConfig {
  /// Aplana los cuatro grupos en el `Roster` que consume el validador.
  pub fn roster(&self) -> Roster {
    self
      .founding
      .iter()
      .chain(&self.joined)
      .chain(&self.guests)
      .chain(&self.extra)
      .cloned()
      .collect()
  }
}

impl Default for RosterConfig {
  fn default() -> Self {
    fn owned(slice: &[&str]) -> Vec<String> {
      slice.iter().map(|s| (*s).to_owned()).collect()
    }

    RosterConfig {
      founding: owned(&[
        "alt-iii",
        "avs-king",
        "duo",
        "dynamic-duo",
        "nemo-orange",
        "skupers",
        "yathosho",
      ]),
      joined: owned(&[
        "amphirion",
        "danaughty1",
        "effekthasch",
        "frames-of-reality",
        "grandchild",
        "hboy",
        "javs",
        "les-noobiens",
        "micro-d",
        "onionring",
        "pan-am",
        "pure-krypton",
        "synth-c",
        "vanish",
        "zamuz",
      ]),
      guests: owned(&[
        "anotherversion",
        "drew",
        "finnish-flash",
        "littlebuddy",
        "tonic",
        "unconed",
        "unripe-lemon",
      ]),
      extra: owned(&["various-artists"]),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_roster_flattens_all_groups() {
    let config = RosterConfig::default();
    let roster = config.roster();

    assert_eq!(
      roster.len(),
      config.founding.len() + config.joined.len() + config.guests.len() + config.extra.len()
    );
    assert!(roster.contains("alt-iii"));
    assert!(roster.contains("zamuz"));
    assert!(roster.contains("unripe-lemon"));
    assert!(roster.contains("various-artists"));
    assert!(!roster.contains("unknown-person"));
  }

  #[test]
  fn test_validator_config_defaults_to_collect() {
    assert_eq!(ValidatorConfig::default().mode, FailureMode::Collect);
  }
}
