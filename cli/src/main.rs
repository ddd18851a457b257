use anyhow::{Context, bail};
use std::path::PathBuf;

use vitrina_cli::{YamlFileSource, output};
use vitrina_config::{CONFIG_BACKEND, RosterConfig, TomlConfigBackend, ValidatorConfig};
use vitrina_core::{CatalogueSource, CatalogueValidator, FailureMode};

const USAGE: &str = "usage: vitrina [CATALOGUE] [--config FILE] [--fail-fast]

Validates a YAML catalogue of releases (default: ./catalogue.yml) against
the schema rules and the configured artist roster.";

struct Args {
  catalogue: PathBuf,
  config: Option<PathBuf>,
  fail_fast: bool,
}

fn parse_args(mut argv: impl Iterator<Item = String>) -> anyhow::Result<Args> {
  let mut catalogue = None;
  let mut config = None;
  let mut fail_fast = false;

  while let Some(arg) = argv.next() {
    match arg.as_str() {
      "--help" | "-h" => {
        println!("{USAGE}");
        std::process::exit(0);
      }
      "--fail-fast" => fail_fast = true,
      "--config" => {
        let value = argv.next().context("--config requires a file path")?;
        config = Some(PathBuf::from(value));
      }
      _ if arg.starts_with('-') => bail!("unknown flag {arg:?}\n{USAGE}"),
      _ if catalogue.is_none() => catalogue = Some(PathBuf::from(arg)),
      _ => bail!("unexpected argument {arg:?}\n{USAGE}"),
    }
  }

  Ok(Args {
    catalogue: catalogue.unwrap_or_else(|| PathBuf::from("catalogue.yml")),
    config,
    fail_fast,
  })
}

fn load_config(args: &Args) -> anyhow::Result<(ValidatorConfig, RosterConfig)> {
  let load = |backend: &TomlConfigBackend| -> anyhow::Result<(ValidatorConfig, RosterConfig)> {
    let validator = backend.load_section_with_default("validator")?;
    let roster = backend.load_section_with_default("roster")?;
    Ok((validator, roster))
  };

  match &args.config {
    Some(path) => load(&TomlConfigBackend::from_file(path)),
    None => load(&CONFIG_BACKEND),
  }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let args = parse_args(std::env::args().skip(1))?;

  let (validator_config, roster_config) =
    load_config(&args).context("failed to load configuration")?;

  let mode = if args.fail_fast { FailureMode::FailFast } else { validator_config.mode };

  let source = YamlFileSource::new(&args.catalogue);
  let catalogue = source
    .load()
    .await
    .with_context(|| format!("failed to load catalogue {}", args.catalogue.display()))?;

  let validator = CatalogueValidator::with_mode(roster_config.roster(), mode);

  match validator.run(&catalogue) {
    Ok(report) => {
      output::print_report(&report);
      if !report.passed() {
        std::process::exit(1);
      }
      Ok(())
    }
    Err(err) => {
      eprintln!("validation aborted: {err}");
      std::process::exit(2);
    }
  }
}
