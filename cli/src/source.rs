use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use vitrina_core::{Catalogue, CatalogueSource, SourceError};

/// A `CatalogueSource` implementation that reads the catalogue from a YAML
/// file on disk.
///
/// The read is async and happens exactly once per run; the parsed catalogue
/// is handed to the validator as an immutable value.
pub struct YamlFileSource {
  path: PathBuf,
}

impl YamlFileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  pub fn path(&self) -> &std::path::Path {
    &self.path
  }
}

#[async_trait]
impl CatalogueSource for YamlFileSource {
  async fn load(&self) -> Result<Catalogue, SourceError> {
    let raw = fs::read_to_string(&self.path)
      .await
      .map_err(|e| SourceError::Io(format!("{}: {e}", self.path.display())))?;

    serde_yaml::from_str(&raw).map_err(|e| SourceError::Parse(e.to_string()))
  }
}
