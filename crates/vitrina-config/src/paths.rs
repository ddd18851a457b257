use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct VitrinaPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
}

impl VitrinaPaths {
  pub fn new() -> Result<Self, ConfigError> {
    let (base_dir, config_dir);

    if let Ok(env_base) = std::env::var("VITRINA_BASE_DIR") {
      let base = PathBuf::from(env_base);
      base_dir = base.clone();
      config_dir = base.join("config");
    } else {
      let proj_dirs =
        ProjectDirs::from("com", "vitrina", "vitrina").ok_or(ConfigError::Directories)?;
      base_dir = proj_dirs.config_dir().to_path_buf();
      config_dir = proj_dirs.config_dir().to_path_buf();
    }

    std::fs::create_dir_all(&config_dir)?;

    Ok(Self { base_dir, config_dir })
  }

  pub fn detect() -> Result<Self, ConfigError> {
    Self::new()
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("vitrina.toml")
  }
}
