//! Shared extraction layer for typed records.
//!
//! Every record type is built the same way: tokenize, check the required
//! keys once, then coerce each declared field from its raw value. The
//! [`Fields`] view does the checking and the lookups, and
//! [`FromRawDocument`] ties a record type to it.
use crate::Error;
use apt_kv::RawDocument;

/// The kind of record being built, reported in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RecordKind {
    /// A Release (or InRelease) file
    Release,

    /// A binary package control file
    Control,

    /// One record of a Packages index
    Package,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(match self {
            RecordKind::Release => "Release",
            RecordKind::Control => "Control",
            RecordKind::Package => "Package",
        })
    }
}

/// Options controlling how records are built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Treat all required keys as optional, never failing construction for
    /// their absence.
    pub skip_validation: bool,
}

impl ParseOptions {
    /// Set whether required-field validation is skipped.
    pub fn skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }
}

/// Validated, read-only view over a [`RawDocument`] while a record is built.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    document: &'a RawDocument,
    kind: RecordKind,
}

impl<'a> Fields<'a> {
    /// Check the `required` keys of `document` and return a view over it.
    ///
    /// With [`ParseOptions::skip_validation`] set, missing required keys are
    /// tolerated.
    pub fn new(
        document: &'a RawDocument,
        kind: RecordKind,
        required: &[&str],
        options: &ParseOptions,
    ) -> Result<Self, Error> {
        let fields = Self { document, kind };
        for key in required {
            match fields.require(key) {
                Ok(_) => {}
                Err(_err) if options.skip_validation => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("{}, continuing without validation", _err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(fields)
    }

    /// Get the value of a required field.
    ///
    /// Fails if the field is absent or blank.
    pub fn require(&self, key: &str) -> Result<&'a str, Error> {
        match self.document.get(key) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(Error::MissingRequiredField {
                kind: self.kind,
                field: key.to_string(),
            }),
        }
    }

    /// Get the raw value of any field, declared or not.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.document.get(key)
    }

    /// Coerce the raw value of `key` with `with`.
    ///
    /// A coercion failure is reported as [`Error::InvalidValue`] naming the
    /// record kind and field.
    pub fn coerce<T, F>(&self, key: &str, with: F) -> Result<T, Error>
    where
        F: FnOnce(Option<&str>) -> Result<T, String>,
    {
        let value = self.get(key);
        with(value).map_err(|reason| Error::InvalidValue {
            kind: self.kind,
            field: key.to_string(),
            value: value.unwrap_or_default().to_string(),
            reason,
        })
    }

    /// The kind of record being built.
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// The underlying document.
    pub fn document(&self) -> &'a RawDocument {
        self.document
    }
}

/// Build a typed record from a tokenized document.
///
/// Usually derived with `#[derive(FromRawDocument)]`.
pub trait FromRawDocument: Sized {
    /// The kind of record this type represents.
    const KIND: RecordKind;

    /// Fields this type itself requires to be present and non-empty.
    ///
    /// A record embedded with `#[apt(flatten)]` checks its own.
    const REQUIRED: &'static [&'static str];

    /// Build the record, reporting failures as errors of `kind`.
    ///
    /// Lets an embedded record fail under the kind of the record that
    /// embeds it.
    fn from_document_as(
        document: RawDocument,
        kind: RecordKind,
        options: &ParseOptions,
    ) -> Result<Self, Error>;

    /// Build the record, consuming the document.
    fn from_document(document: RawDocument, options: &ParseOptions) -> Result<Self, Error> {
        Self::from_document_as(document, Self::KIND, options)
    }

    /// Tokenize `text` and build the record.
    fn parse_with(text: &str, options: &ParseOptions) -> Result<Self, Error> {
        Self::from_document(RawDocument::parse(text), options)
    }

    /// Decode `bytes` as UTF-8, tokenize and build the record.
    fn from_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self, Error> {
        Self::from_document(RawDocument::from_bytes(bytes)?, options)
    }

    /// Read everything from `r` and build the record.
    fn from_reader<R: std::io::Read>(r: R, options: &ParseOptions) -> Result<Self, Error> {
        Self::from_document(RawDocument::from_reader(r)?, options)
    }
}
