use vitrina_core::{CheckOutcome, ValidationReport};

/// Renders the report as plain text lines, one status line per check plus an
/// indented diagnostic line per violation.
pub fn render_report(report: &ValidationReport) -> String {
  let mut out = String::new();

  for outcome in report.outcomes() {
    render_outcome(&mut out, outcome);
  }

  let summary = report.summary();
  out.push_str(&format!(
    "{} checks, {} passed, {} failed, {} violations ({} entries)\n",
    summary.checks,
    summary.passed,
    summary.failed,
    summary.violations,
    report.entries()
  ));

  out
}

fn render_outcome(out: &mut String, outcome: &CheckOutcome) {
  if outcome.passed() {
    out.push_str(&format!("ok   {} ({} examined)\n", outcome.rule, outcome.universe));
  } else {
    out.push_str(&format!(
      "FAIL {} ({} of {} accepted)\n",
      outcome.rule,
      outcome.valid.len(),
      outcome.universe
    ));
    for violation in &outcome.violations {
      out.push_str(&format!("     {violation}\n"));
    }
  }
}

pub fn print_report(report: &ValidationReport) {
  print!("{}", render_report(report));
}
