use crate::catalogue::Catalogue;
use async_trait::async_trait;

/// Fallos al obtener el catálogo desde su fuente externa.
///
/// No define el formato de la fuente: eso es decisión del adapter. El
/// contrato del validador empieza en "secuencia de entradas".
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
  #[error("io error: {0}")]
  Io(String),
  #[error("parse error: {0}")]
  Parse(String),
}

/// Puerto de carga del catálogo.
///
/// La carga ocurre exactamente una vez, antes de ejecutar regla alguna;
/// después el catálogo es inmutable hasta el final del proceso.
#[async_trait]
pub trait CatalogueSource {
  async fn load(&self) -> Result<Catalogue, SourceError>;
}
