pub mod catalogue;
pub mod checks;
pub mod errors;
pub mod ports;
pub mod report;
pub mod roster;

pub use catalogue::{Catalogue, CatalogueEntry, EntryRef, PackType};
pub use checks::{CatalogueValidator, CheckOutcome, FailureMode, Rule, Violation};
pub use errors::ValidationError;
pub use ports::{CatalogueSource, SourceError};
pub use report::{ReportSummary, ValidationReport};
pub use roster::Roster;
