//! Permissive key/value tokenizer for APT metadata.
//!
//! Release files, Packages indices and binary package control files all share
//! the deb822 layout: `Key: value` lines, values folded over indented
//! continuation lines, and blank lines between records. This crate turns the
//! text of a single record into a [`RawDocument`], an ordered mapping from
//! field name to raw value, and splits multi-record documents with
//! [`records`].
//!
//! The tokenizer never fails. Lines it cannot interpret are skipped.
//!
//! ```rust
//! use apt_kv::RawDocument;
//!
//! let doc = RawDocument::parse("Package: hello\nDescription: greeter\n says hello\n .\n twice\n");
//! assert_eq!(doc.get("Package"), Some("hello"));
//! assert_eq!(doc.get("Description"), Some("greeter\nsays hello\n\ntwice"));
//! ```
use indexmap::IndexMap;
use std::borrow::Cow;

/// Error type for reading raw input.
///
/// Tokenization itself is infallible; these only arise before it starts.
#[derive(Debug)]
pub enum Error {
    /// IO error.
    Io(std::io::Error),

    /// The input was not valid UTF-8.
    Utf8(std::str::Utf8Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(e: std::str::Utf8Error) -> Self {
        Self::Utf8(e)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Utf8(e) => write!(f, "Invalid UTF-8: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Utf8(e) => Some(e),
        }
    }
}

/// The fields of a single record, in first-occurrence order.
///
/// Keys are case-sensitive and kept exactly as written. A key that occurs
/// more than once holds all of its values joined by a newline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawDocument {
    fields: IndexMap<String, String>,
}

impl RawDocument {
    /// Tokenize the text of a single record.
    pub fn parse(text: &str) -> Self {
        let text = if text.contains('\0') {
            Cow::Owned(text.replace('\0', ""))
        } else {
            Cow::Borrowed(text)
        };

        let mut fields = IndexMap::new();
        let mut current: Option<(&str, String)> = None;

        for line in text.lines() {
            if line.trim().is_empty() {
                commit(&mut fields, current.take());
                continue;
            }

            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = current.as_mut() {
                    // Strip the single folding marker, keep any further indentation
                    let content = line[1..].trim_end();
                    value.push('\n');
                    if content.trim() != "." {
                        value.push_str(content);
                    }
                    continue;
                }
            }

            // Only reached with no key open, or at column 0
            let line = line.trim_start();
            if line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }

            commit(&mut fields, current.take());
            current = Some((key, value.trim().to_string()));
        }
        commit(&mut fields, current);

        Self { fields }
    }

    /// Tokenize a record from raw bytes, which must be valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self::parse(std::str::from_utf8(bytes)?))
    }

    /// Read a record from a reader.
    pub fn from_reader<R: std::io::Read>(mut r: R) -> Result<Self, Error> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf)?;
        Self::from_bytes(&buf)
    }

    /// Get the value of a field by name.
    ///
    /// Returns `None` if the field does not exist.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Check whether a field is present, even with an empty value.
    pub fn contains_key(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Check if the document has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Return the number of distinct fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Iterate over the fields in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterate over the field names in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

fn commit(fields: &mut IndexMap<String, String>, entry: Option<(&str, String)>) {
    let Some((key, value)) = entry else {
        return;
    };
    let value = value.trim();
    match fields.get_mut(key) {
        Some(existing) => {
            existing.push('\n');
            existing.push_str(value);
        }
        None => {
            fields.insert(key.to_string(), value.to_string());
        }
    }
}

impl std::str::FromStr for RawDocument {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl std::fmt::Display for RawDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (name, value) in self.iter() {
            let mut lines = value.split('\n');
            match lines.next() {
                Some(first) if !first.is_empty() => writeln!(f, "{}: {}", name, first)?,
                _ => writeln!(f, "{}:", name)?,
            }
            for line in lines {
                if line.is_empty() {
                    writeln!(f, " .")?;
                } else {
                    writeln!(f, " {}", line)?;
                }
            }
        }
        Ok(())
    }
}

impl FromIterator<(String, String)> for RawDocument {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut fields: IndexMap<String, String> = IndexMap::new();
        for (name, value) in iter {
            commit(&mut fields, Some((name.as_str(), value)));
        }
        Self { fields }
    }
}

impl IntoIterator for RawDocument {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

/// Split a multi-record document on blank lines.
///
/// A line holding only whitespace ends a record. Chunks that contain nothing
/// but whitespace are skipped.
pub fn records(text: &str) -> Records<'_> {
    Records { rest: text }
}

/// Iterator over the records of a multi-record document, see [`records`].
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Records<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let mut end = self.rest.len();
            let mut next = self.rest.len();
            let mut offset = 0;
            for line in self.rest.split_inclusive('\n') {
                if line.trim().is_empty() {
                    end = offset;
                    next = offset + line.len();
                    break;
                }
                offset += line.len();
            }

            let chunk = &self.rest[..end];
            self.rest = &self.rest[next..];
            if !chunk.trim().is_empty() {
                return Some(chunk);
            }
        }
        None
    }
}
