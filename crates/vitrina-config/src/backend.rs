use crate::paths::{ConfigError, VitrinaPaths};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::PathBuf;

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
}

/// Backend de configuración sobre un único archivo TOML con secciones.
///
/// El validador solo lee configuración, nunca la escribe; por eso este
/// backend no tiene operación de guardado.
pub struct TomlConfigBackend {
  file: PathBuf,
}

impl TomlConfigBackend {
  pub fn new(paths: VitrinaPaths) -> Self {
    Self { file: paths.config_file() }
  }

  /// Construye el backend sobre un archivo concreto, sin pasar por la
  /// resolución de rutas estándar (útil para `--config` y para tests).
  pub fn from_file(file: impl Into<PathBuf>) -> Self {
    Self { file: file.into() }
  }

  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    use std::io::ErrorKind;

    let content = match fs::read_to_string(&self.file) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => {
        return Ok(T::default());
      }
      Err(e) => return Err(e.into()),
    };

    let toml_val: toml::Value = toml::from_str(&content)?;

    let Some(table) = toml_val.get(section) else {
      return Ok(T::default());
    };

    let t: T = table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))?;

    Ok(t)
  }
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let content = fs::read_to_string(&self.file)?;
    let toml_val: toml::Value = toml::from_str(&content)?;

    let table = toml_val.get(section).ok_or_else(|| {
      ConfigError::Other(format!("missing section [{section}] in {:?}", self.file))
    })?;

    let t: T = table
      .clone()
      .try_into()
      .map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))?;

    Ok(t)
  }
}
