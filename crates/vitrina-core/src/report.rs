use crate::checks::CheckOutcome;

/// Veredictos agregados de una ejecución completa del validador.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
  entries: usize,
  outcomes: Vec<CheckOutcome>,
}

impl ValidationReport {
  pub fn new(entries: usize) -> Self {
    Self { entries, outcomes: Vec::new() }
  }

  /// Número de entradas del catálogo validado.
  pub fn entries(&self) -> usize {
    self.entries
  }

  pub fn push(&mut self, outcome: CheckOutcome) {
    self.outcomes.push(outcome);
  }

  pub fn outcomes(&self) -> &[CheckOutcome] {
    &self.outcomes
  }

  /// `true` si ninguna regla registró violaciones.
  pub fn passed(&self) -> bool {
    self.outcomes.iter().all(CheckOutcome::passed)
  }

  pub fn total_violations(&self) -> usize {
    self.outcomes.iter().map(|o| o.violations.len()).sum()
  }

  pub fn summary(&self) -> ReportSummary {
    let mut summary = ReportSummary { checks: self.outcomes.len(), ..ReportSummary::default() };

    for outcome in &self.outcomes {
      if outcome.passed() {
        summary.passed += 1;
      } else {
        summary.failed += 1;
      }
      summary.violations += outcome.violations.len();
    }

    summary
  }
}

/// Conteos de una ejecución, pensados para la línea final del reporte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
  pub checks: usize,
  pub passed: usize,
  pub failed: usize,
  pub violations: usize,
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::checks::{Rule, Violation};
  use crate::catalogue::EntryRef;

  fn outcome(rule: Rule, violations: usize) -> CheckOutcome {
    CheckOutcome {
      rule,
      universe: 5,
      valid: (0..5 - violations).collect(),
      violations: (0..violations)
        .map(|i| Violation { entry: EntryRef::Index(i), detail: "boom".to_owned() })
        .collect(),
    }
  }

  #[test]
  fn test_summary_counts() {
    let mut report = ValidationReport::new(5);
    report.push(outcome(Rule::UniqueIds, 0));
    report.push(outcome(Rule::IdPattern, 2));
    report.push(outcome(Rule::PackType, 1));

    let summary = report.summary();
    assert_eq!(summary.checks, 3);
    assert_eq!(summary.passed, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(summary.violations, 3);
    assert!(!report.passed());
    assert_eq!(report.total_violations(), 3);
  }

  #[test]
  fn test_empty_report_passes() {
    let report = ValidationReport::new(0);

    assert!(report.passed());
    assert_eq!(report.summary(), ReportSummary::default());
  }
}
