//! Constructors for the error enums.

use figment::Error as FigmentError;

use super::{ExportError, SchemaError};
use crate::schema::ValueKind;

impl ExportError {
    /// Construct the error reported for a module that carries a delayed
    /// construction error.
    ///
    /// # Examples
    ///
    /// ```
    /// use config_export::ExportError;
    /// let e = ExportError::delayed("mail", "mail_location: unknown driver");
    /// assert_eq!(e.to_string(), "mail_location: unknown driver");
    /// ```
    #[must_use]
    pub fn delayed(module: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delayed {
            module: module.into(),
            message: message.into(),
        }
    }

    /// Construct an options error from a [`figment::Error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use config_export::ExportError;
    /// let e = ExportError::options(figment::Error::from("boom"));
    /// assert!(matches!(e, ExportError::Options(_)));
    /// ```
    #[must_use]
    pub fn options(source: FigmentError) -> Self {
        Self::Options(Box::new(source))
    }
}

impl SchemaError {
    pub(crate) fn unknown_key(schema: &str, key: &str) -> Self {
        Self::UnknownKey {
            schema: schema.to_owned(),
            key: key.to_owned(),
        }
    }

    pub(crate) fn kind_mismatch(
        schema: &str,
        key: &str,
        expected: ValueKind,
        found: ValueKind,
    ) -> Self {
        Self::KindMismatch {
            schema: schema.to_owned(),
            key: key.to_owned(),
            expected,
            found,
        }
    }
}
