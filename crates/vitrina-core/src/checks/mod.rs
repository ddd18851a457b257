use crate::catalogue::{Catalogue, CatalogueEntry, EntryRef, PackType, truthy};
use crate::errors::ValidationError;
use crate::report::ValidationReport;
use crate::roster::Roster;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

/// Patrón de los códigos de lanzamiento: clase de letra A–E, tres dígitos
/// y un sufijo de variante opcional (`VA001`, `VC120-1`, …).
static PACK_ID: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^V[A-E]\d{3}(-\d)?$").expect("invalid pack id pattern"));

/// Las seis reglas del catálogo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
  UniqueIds,
  IdPattern,
  PackType,
  RequiredFields,
  UniquePlaylists,
  ArtistRoster,
}

impl Rule {
  /// Todas las reglas, en el orden en que las ejecuta [`CatalogueValidator::run`].
  pub const ALL: [Rule; 6] = [
    Rule::UniqueIds,
    Rule::IdPattern,
    Rule::PackType,
    Rule::RequiredFields,
    Rule::UniquePlaylists,
    Rule::ArtistRoster,
  ];
}

impl fmt::Display for Rule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Rule::UniqueIds => "unique ids",
      Rule::IdPattern => "id pattern",
      Rule::PackType => "pack type",
      Rule::RequiredFields => "required fields",
      Rule::UniquePlaylists => "unique playlists",
      Rule::ArtistRoster => "artist roster",
    };
    write!(f, "{name}")
  }
}

/// Disciplina de reporte de fallos.
///
/// Las dos variantes históricas del sistema: registrar cada violación y
/// seguir, o abortar en la primera. Es un parámetro del validador, no dos
/// implementaciones distintas de las reglas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureMode {
  /// Acumula todas las violaciones en el `CheckOutcome`.
  #[default]
  Collect,
  /// Lanza `ValidationError` en la primera violación y aborta la ejecución.
  FailFast,
}

/// Una entrada que incumple una regla, con su línea de diagnóstico.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
  pub entry: EntryRef,
  pub detail: String,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.detail, self.entry)
  }
}

/// Veredicto de una regla sobre el catálogo completo.
///
/// `valid` y `violations` particionan el universo de la regla: cada entrada
/// examinada cae exactamente en uno de los dos lados. Para casi todas las
/// reglas el universo es el catálogo entero; `unique_playlists` solo examina
/// las entradas con playlist efectiva.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
  pub rule: Rule,
  /// Número de entradas examinadas por la regla.
  pub universe: usize,
  /// Posiciones (dentro del catálogo) de las entradas aceptadas.
  pub valid: Vec<usize>,
  pub violations: Vec<Violation>,
}

impl CheckOutcome {
  fn new(rule: Rule) -> Self {
    Self { rule, universe: 0, valid: Vec::new(), violations: Vec::new() }
  }

  pub fn passed(&self) -> bool {
    self.violations.is_empty()
  }

  fn accept(&mut self, index: usize) {
    self.universe += 1;
    self.valid.push(index);
  }

  fn reject(
    &mut self,
    mode: FailureMode,
    entry: EntryRef,
    detail: String,
  ) -> Result<(), ValidationError> {
    match mode {
      FailureMode::Collect => {
        self.universe += 1;
        self.violations.push(Violation { entry, detail });
        Ok(())
      }
      FailureMode::FailFast => Err(ValidationError::new(self.rule, entry, detail)),
    }
  }
}

/// El validador del catálogo: seis reglas puras sobre la misma colección
/// inmutable.
///
/// Cada regla lee el catálogo completo y produce su propio `CheckOutcome`;
/// no comparten estado entre sí (los acumuladores de "visto hasta ahora" son
/// locales a cada invocación), así que pueden ejecutarse en cualquier orden
/// con resultados idénticos.
#[derive(Debug, Clone)]
pub struct CatalogueValidator {
  roster: Roster,
  mode: FailureMode,
}

impl CatalogueValidator {
  pub fn new(roster: Roster) -> Self {
    Self { roster, mode: FailureMode::default() }
  }

  pub fn with_mode(roster: Roster, mode: FailureMode) -> Self {
    Self { roster, mode }
  }

  pub fn roster(&self) -> &Roster {
    &self.roster
  }

  pub fn mode(&self) -> FailureMode {
    self.mode
  }

  /// Ejecuta las seis reglas en orden fijo y agrega los veredictos.
  pub fn run(&self, catalogue: &Catalogue) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(catalogue.len());
    report.push(self.unique_ids(catalogue)?);
    report.push(self.id_pattern(catalogue)?);
    report.push(self.pack_type(catalogue)?);
    report.push(self.required_fields(catalogue)?);
    report.push(self.unique_playlists(catalogue)?);
    report.push(self.artist_roster(catalogue)?);
    Ok(report)
  }

  /// Todos los `id` deben ser distintos entre sí.
  ///
  /// La primera aparición de un `id` gana; cada aparición *posterior* es la
  /// violación. Un `id` ausente o no-cadena cuenta como una misma clave
  /// "sin id", de modo que dos entradas sin `id` también colisionan.
  pub fn unique_ids(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::UniqueIds);
    let mut seen: Vec<Option<&str>> = Vec::new();

    for (index, entry) in catalogue.iter().enumerate() {
      let key = entry.id();
      if seen.contains(&key) {
        outcome.reject(self.mode, entry.entry_ref(index), "duplicate id".to_owned())?;
      } else {
        seen.push(key);
        outcome.accept(index);
      }
    }

    Ok(outcome)
  }

  /// Todos los `id` deben encajar exactamente en `^V[A-E]\d{3}(-\d)?$`.
  pub fn id_pattern(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::IdPattern);

    for (index, entry) in catalogue.iter().enumerate() {
      match entry.id() {
        Some(id) if PACK_ID.is_match(id) => outcome.accept(index),
        Some(id) => {
          outcome.reject(self.mode, entry.entry_ref(index), format!("malformed id {id:?}"))?;
        }
        None => {
          outcome.reject(
            self.mode,
            entry.entry_ref(index),
            "missing or non-string id".to_owned(),
          )?;
        }
      }
    }

    Ok(outcome)
  }

  /// El campo `type` debe ser exactamente uno de la enumeración cerrada.
  pub fn pack_type(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::PackType);

    for (index, entry) in catalogue.iter().enumerate() {
      match entry.pack_type() {
        Some(t) if t.parse::<PackType>().is_ok() => outcome.accept(index),
        Some(t) => {
          outcome.reject(
            self.mode,
            entry.entry_ref(index),
            format!("invalid pack type {t:?}"),
          )?;
        }
        None => {
          outcome.reject(
            self.mode,
            entry.entry_ref(index),
            "missing or non-string pack type".to_owned(),
          )?;
        }
      }
    }

    Ok(outcome)
  }

  /// Presencia y tipo de los cuatro campos obligatorios.
  ///
  /// Se revisan en orden fijo id → name → type → artists y se reporta solo
  /// el primer campo que falla; la entrada queda fuera del conjunto válido
  /// igualmente.
  pub fn required_fields(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::RequiredFields);

    for (index, entry) in catalogue.iter().enumerate() {
      match required_fields_violation(entry) {
        None => outcome.accept(index),
        Some(detail) => outcome.reject(self.mode, entry.entry_ref(index), detail)?,
      }
    }

    Ok(outcome)
  }

  /// Entre las entradas con playlist efectiva, el valor debe ser único.
  ///
  /// Mismo algoritmo de duplicados que `unique_ids`, aplicado al valor de
  /// `playlist`. Las entradas sin playlist quedan fuera del universo de esta
  /// regla: no son ni válidas ni violaciones.
  pub fn unique_playlists(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::UniquePlaylists);
    let mut seen: Vec<&Value> = Vec::new();

    for (index, entry) in catalogue.iter().enumerate() {
      let Some(playlist) = entry.playlist().filter(|v| truthy(v)) else {
        continue;
      };

      if seen.contains(&playlist) {
        let detail = match playlist.as_str() {
          Some(s) => format!("duplicate playlist {s:?}"),
          None => "duplicate playlist".to_owned(),
        };
        outcome.reject(self.mode, entry.entry_ref(index), detail)?;
      } else {
        seen.push(playlist);
        outcome.accept(index);
      }
    }

    Ok(outcome)
  }

  /// Cada cadena de `artists` debe pertenecer al roster configurado.
  pub fn artist_roster(&self, catalogue: &Catalogue) -> Result<CheckOutcome, ValidationError> {
    let mut outcome = CheckOutcome::new(Rule::ArtistRoster);

    for (index, entry) in catalogue.iter().enumerate() {
      match artist_roster_violation(&self.roster, entry) {
        None => outcome.accept(index),
        Some(detail) => outcome.reject(self.mode, entry.entry_ref(index), detail)?,
      }
    }

    Ok(outcome)
  }
}

fn required_fields_violation(entry: &CatalogueEntry) -> Option<String> {
  for key in ["id", "name", "type"] {
    match entry.field(key) {
      None => return Some(format!("missing key {key:?}")),
      Some(value) if value.as_str().is_none() => {
        return Some(format!("invalid type for {key:?}"));
      }
      Some(_) => {}
    }
  }

  match entry.field("artists") {
    None => Some("missing key \"artists\"".to_owned()),
    Some(value) if value.as_sequence().is_none() => Some("invalid type for \"artists\"".to_owned()),
    Some(_) => None,
  }
}

fn artist_roster_violation(roster: &Roster, entry: &CatalogueEntry) -> Option<String> {
  let artists = entry.artists()?;

  for artist in artists {
    match artist.as_str() {
      Some(slug) if roster.contains(slug) => {}
      Some(slug) => return Some(format!("unknown artist {slug:?}")),
      None => return Some("non-string artist entry".to_owned()),
    }
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;

  fn catalogue(yaml: &str) -> Catalogue {
    serde_yaml::from_str(yaml).unwrap()
  }

  fn roster() -> Roster {
    ["nemo-orange", "skupers", "duo", "various-artists"].into_iter().collect()
  }

  fn validator() -> CatalogueValidator {
    CatalogueValidator::new(roster())
  }

  fn sample() -> Catalogue {
    catalogue(
      "- {id: VA001, name: First, type: compilation, artists: [various-artists], playlist: PL001}\n\
       - {id: VB002, name: Second, type: album, artists: [nemo-orange]}\n\
       - {id: VC003-1, name: Third, type: single, artists: [duo, skupers], playlist: PL002}\n",
    )
  }

  #[test]
  fn test_clean_catalogue_passes_every_rule() {
    let report = validator().run(&sample()).unwrap();

    assert!(report.passed());
    assert_eq!(report.outcomes().len(), Rule::ALL.len());
    for outcome in report.outcomes() {
      assert!(outcome.passed());
    }
  }

  #[test]
  fn test_unique_ids_flags_later_occurrence() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: []}\n\
       - {id: VA001, name: B, type: album, artists: []}\n",
    );
    let outcome = validator().unique_ids(&c).unwrap();

    assert_eq!(outcome.valid, vec![0]);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].entry, EntryRef::Id("VA001".to_owned()));
    assert_eq!(outcome.violations[0].to_string(), "duplicate id: VA001");
  }

  #[test]
  fn test_unique_ids_collides_entries_without_id() {
    let c = catalogue(
      "- {name: A, type: album, artists: []}\n\
       - {name: B, type: album, artists: []}\n",
    );
    let outcome = validator().unique_ids(&c).unwrap();

    assert_eq!(outcome.valid, vec![0]);
    assert_eq!(outcome.violations[0].entry, EntryRef::Index(1));
  }

  #[test]
  fn test_id_pattern_accepts_classes_and_variants() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: []}\n\
       - {id: VE999, name: B, type: album, artists: []}\n\
       - {id: VC120-1, name: C, type: album, artists: []}\n",
    );
    let outcome = validator().id_pattern(&c).unwrap();

    assert!(outcome.passed());
    assert_eq!(outcome.valid, vec![0, 1, 2]);
  }

  #[test]
  fn test_id_pattern_rejects_malformed_ids() {
    let c = catalogue(
      "- {id: XZ999, name: A, type: album, artists: []}\n\
       - {id: VF001, name: B, type: album, artists: []}\n\
       - {id: va001, name: C, type: album, artists: []}\n\
       - {id: VA0012, name: D, type: album, artists: []}\n\
       - {id: VA001-12, name: E, type: album, artists: []}\n\
       - {name: F, type: album, artists: []}\n",
    );
    let outcome = validator().id_pattern(&c).unwrap();

    assert!(outcome.valid.is_empty());
    assert_eq!(outcome.violations.len(), 6);
    assert_eq!(outcome.violations[0].to_string(), "malformed id \"XZ999\": XZ999");
    assert_eq!(outcome.violations[5].entry, EntryRef::Index(5));
  }

  #[test]
  fn test_pack_type_rejects_outside_enumeration() {
    let c = catalogue(
      "- {id: VA001, name: A, type: EP, artists: []}\n\
       - {id: VA002, name: B, type: Album, artists: []}\n\
       - {id: VA003, name: C, type: single, artists: []}\n\
       - {id: VA004, name: D, artists: []}\n",
    );
    let outcome = validator().pack_type(&c).unwrap();

    assert_eq!(outcome.valid, vec![2]);
    assert_eq!(outcome.violations.len(), 3);
    assert_eq!(outcome.violations[0].detail, "invalid pack type \"EP\"");
    assert_eq!(outcome.violations[2].detail, "missing or non-string pack type");
  }

  #[test]
  fn test_required_fields_reports_first_missing_key() {
    let c = catalogue("- {type: album, artists: []}\n");
    let outcome = validator().required_fields(&c).unwrap();

    // falta id y name; se reporta el primero del orden fijo
    assert_eq!(outcome.violations[0].detail, "missing key \"id\"");
    assert_eq!(outcome.violations[0].entry, EntryRef::Index(0));
  }

  #[test]
  fn test_required_fields_missing_artists() {
    let c = catalogue("- {id: VA001, name: A, type: album}\n");
    let outcome = validator().required_fields(&c).unwrap();

    assert_eq!(outcome.violations[0].to_string(), "missing key \"artists\": VA001");
  }

  #[test]
  fn test_required_fields_wrong_kinds() {
    let c = catalogue(
      "- {id: VA001, name: 7, type: album, artists: []}\n\
       - {id: VA002, name: B, type: album, artists: solo}\n\
       - {id: 42, name: C, type: album, artists: []}\n",
    );
    let outcome = validator().required_fields(&c).unwrap();

    assert!(outcome.valid.is_empty());
    assert_eq!(outcome.violations[0].detail, "invalid type for \"name\"");
    assert_eq!(outcome.violations[1].detail, "invalid type for \"artists\"");
    assert_eq!(outcome.violations[2].detail, "invalid type for \"id\"");
  }

  #[test]
  fn test_unique_playlists_flags_second_occurrence() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: [], playlist: PL123}\n\
       - {id: VA002, name: B, type: album, artists: []}\n\
       - {id: VA003, name: C, type: album, artists: [], playlist: PL123}\n",
    );
    let outcome = validator().unique_playlists(&c).unwrap();

    // la entrada sin playlist no entra en el universo
    assert_eq!(outcome.universe, 2);
    assert_eq!(outcome.valid, vec![0]);
    assert_eq!(outcome.violations[0].to_string(), "duplicate playlist \"PL123\": VA003");
  }

  #[test]
  fn test_unique_playlists_ignores_empty_values() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: [], playlist: ''}\n\
       - {id: VA002, name: B, type: album, artists: [], playlist: null}\n",
    );
    let outcome = validator().unique_playlists(&c).unwrap();

    assert_eq!(outcome.universe, 0);
    assert!(outcome.valid.is_empty());
    assert!(outcome.violations.is_empty());
  }

  #[test]
  fn test_artist_roster_rejects_unknown_slug() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: [nemo-orange, unknown-person]}\n",
    );
    let outcome = validator().artist_roster(&c).unwrap();

    assert_eq!(outcome.violations[0].detail, "unknown artist \"unknown-person\"");
  }

  #[test]
  fn test_artist_roster_accepts_empty_sequence() {
    let c = catalogue("- {id: VA001, name: A, type: album, artists: []}\n");
    let outcome = validator().artist_roster(&c).unwrap();

    assert!(outcome.passed());
  }

  #[test]
  fn test_artist_roster_rejects_missing_sequence() {
    let c = catalogue("- {id: VA001, name: A, type: album}\n");
    let outcome = validator().artist_roster(&c).unwrap();

    assert_eq!(outcome.valid.len(), 0);
    assert_eq!(outcome.violations.len(), 1);
  }

  #[test]
  fn test_partition_property() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: [duo], playlist: PL1}\n\
       - {id: VA001, name: B, type: EP, artists: [nobody], playlist: PL1}\n\
       - {id: XZ999, name: 3, type: single, artists: [skupers]}\n\
       - {name: D, type: album}\n",
    );
    let v = validator();

    for outcome in [
      v.unique_ids(&c).unwrap(),
      v.id_pattern(&c).unwrap(),
      v.pack_type(&c).unwrap(),
      v.required_fields(&c).unwrap(),
      v.unique_playlists(&c).unwrap(),
      v.artist_roster(&c).unwrap(),
    ] {
      assert_eq!(outcome.valid.len() + outcome.violations.len(), outcome.universe);
    }
  }

  #[test]
  fn test_checks_are_idempotent() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: [duo], playlist: PL1}\n\
       - {id: VA001, name: B, type: EP, artists: [nobody], playlist: PL1}\n",
    );
    let v = validator();

    assert_eq!(v.unique_ids(&c).unwrap(), v.unique_ids(&c).unwrap());
    assert_eq!(v.run(&c).unwrap(), v.run(&c).unwrap());
  }

  #[test]
  fn test_fail_fast_raises_on_first_violation() {
    let c = catalogue(
      "- {id: VA001, name: A, type: album, artists: []}\n\
       - {id: VA001, name: B, type: album, artists: []}\n\
       - {id: VA001, name: C, type: album, artists: []}\n",
    );
    let v = CatalogueValidator::with_mode(roster(), FailureMode::FailFast);

    let err = v.unique_ids(&c).unwrap_err();
    assert_eq!(err.rule(), Rule::UniqueIds);
    assert_eq!(err.entry(), &EntryRef::Id("VA001".to_owned()));
    assert_eq!(err.to_string(), "unique ids violated by entry VA001: duplicate id");
  }

  #[test]
  fn test_fail_fast_aborts_the_run() {
    let c = catalogue("- {id: XZ999, name: A, type: album, artists: []}\n");
    let v = CatalogueValidator::with_mode(roster(), FailureMode::FailFast);

    let err = v.run(&c).unwrap_err();
    assert_eq!(err.rule(), Rule::IdPattern);
  }

  #[test]
  fn test_collect_mode_never_errors() {
    let c = catalogue(
      "- {id: XZ999, name: 3, type: EP, artists: [nobody], playlist: PL1}\n\
       - {id: XZ999, name: 3, type: EP, artists: [nobody], playlist: PL1}\n",
    );
    let report = validator().run(&c).unwrap();

    assert!(!report.passed());
    assert_eq!(report.summary().failed, Rule::ALL.len());
  }

  #[test]
  fn test_empty_catalogue_passes() {
    let report = validator().run(&Catalogue::default()).unwrap();

    assert!(report.passed());
    assert_eq!(report.total_violations(), 0);
  }
}
