//! Errors raised while building typed APT records.
//!
//! Tokenization never fails, so everything here comes from the typed layer
//! or from input that could not be decoded in the first place. A Packages
//! index collects the errors of all its failing records.

use crate::fields::RecordKind;

/// Errors for building [`crate::Release`], [`crate::Control`], [`crate::Package`]
/// and [`crate::Packages`].
#[derive(Debug)]
pub enum Error {
    /// A field the format mandates is absent or empty
    MissingRequiredField {
        /// The record being built
        kind: RecordKind,
        /// Name of the missing field
        field: String,
    },
    /// A field is present but its value cannot be coerced to the declared type
    InvalidValue {
        /// The record being built
        kind: RecordKind,
        /// Name of the offending field
        field: String,
        /// The raw value as tokenized
        value: String,
        /// Why coercion failed
        reason: String,
    },
    /// The input could not be read or decoded before tokenization
    MalformedInput(apt_kv::Error),
    /// One or more records of a Packages index failed to build
    ///
    /// Holds every failure with the zero-based index of its record, in
    /// source order.
    InvalidRecords(Vec<(usize, Error)>),
}

impl Error {
    /// The kind of record whose construction failed, if known.
    pub fn kind(&self) -> Option<RecordKind> {
        match self {
            Self::MissingRequiredField { kind, .. } | Self::InvalidValue { kind, .. } => {
                Some(*kind)
            }
            Self::MalformedInput(_) => None,
            Self::InvalidRecords(_) => Some(RecordKind::Package),
        }
    }

    /// The field that caused the failure, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field, .. } | Self::InvalidValue { field, .. } => {
                Some(field)
            }
            Self::MalformedInput(_) | Self::InvalidRecords(_) => None,
        }
    }

    /// The failing records of a Packages index, with their indices.
    ///
    /// Empty for any other error.
    pub fn records(&self) -> &[(usize, Error)] {
        match self {
            Self::InvalidRecords(errors) => errors,
            _ => &[],
        }
    }
}

impl From<apt_kv::Error> for Error {
    fn from(e: apt_kv::Error) -> Self {
        Self::MalformedInput(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::MissingRequiredField { kind, field } => {
                write!(f, "{kind} is missing required field `{field}`")
            }
            Self::InvalidValue {
                kind,
                field,
                value,
                reason,
            } => write!(
                f,
                "{kind} field `{field}` has invalid value {value:?}: {reason}"
            ),
            Self::MalformedInput(e) => write!(f, "Malformed input: {e}"),
            Self::InvalidRecords(errors) => {
                write!(f, "{} invalid record(s) in Packages index", errors.len())?;
                for (index, e) in errors {
                    write!(f, "\n - record {index}: {e}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedInput(e) => Some(e),
            Self::InvalidRecords(errors) => errors
                .first()
                .map(|(_, e)| e as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}
