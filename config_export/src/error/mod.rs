//! Error types produced while building schemas and exporting settings.

mod constructors;
mod types;

pub use types::{ExportError, SchemaError};

/// Result alias used throughout the export API.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests;
