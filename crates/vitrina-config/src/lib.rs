mod backend;
mod model;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use model::{RosterConfig, ValidatorConfig};
pub use paths::{ConfigError, VitrinaPaths};

use once_cell::sync::Lazy;

// Singleton de paths (portable / system)
pub static PATHS: Lazy<VitrinaPaths> =
  Lazy::new(|| VitrinaPaths::detect().expect("failed to init VitrinaPaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> =
  Lazy::new(|| TomlConfigBackend::new(PATHS.clone()));
