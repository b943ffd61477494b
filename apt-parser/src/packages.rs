//! Packages indices: a sequence of [`Package`] records separated by blank lines.
use crate::{Error, FromRawDocument, Package, ParseOptions};
use apt_kv::RawDocument;

/// The records of a Packages index, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Packages(Vec<Package>);

impl Packages {
    /// Split `text` into records and build a [`Package`] from each.
    ///
    /// Chunks holding nothing but comments are skipped; every other chunk
    /// becomes one record, even if none of its lines tokenize. If any record
    /// fails to build, all failures are returned together as
    /// [`Error::InvalidRecords`], indexed by their position among the
    /// remaining chunks.
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self, Error> {
        let mut packages = Vec::new();
        let mut errors = Vec::new();
        let chunks = apt_kv::records(text).filter(|chunk| !is_comment_only(chunk));
        for (index, chunk) in chunks.enumerate() {
            match Package::from_document(RawDocument::parse(chunk), options) {
                Ok(package) => packages.push(package),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Record {} of Packages index is invalid: {}", index, err);
                    errors.push((index, err));
                }
            }
        }

        if !errors.is_empty() {
            return Err(Error::InvalidRecords(errors));
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("Parsed {} records from Packages index", packages.len());

        Ok(Self(packages))
    }

    /// Decode `bytes` as UTF-8 and parse them as a Packages index.
    pub fn from_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self, Error> {
        let text = std::str::from_utf8(bytes).map_err(apt_kv::Error::from)?;
        Self::parse_with(text, options)
    }

    /// Read a whole Packages index from `r`.
    pub fn from_reader<R: std::io::Read>(mut r: R, options: &ParseOptions) -> Result<Self, Error> {
        let mut buf = Vec::new();
        r.read_to_end(&mut buf).map_err(apt_kv::Error::from)?;
        Self::from_bytes(&buf, options)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the record at `index`.
    pub fn get(&self, index: usize) -> Option<&Package> {
        self.0.get(index)
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, Package> {
        self.0.iter()
    }
}

fn is_comment_only(chunk: &str) -> bool {
    chunk
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'))
}

impl std::str::FromStr for Packages {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

impl std::ops::Index<usize> for Packages {
    type Output = Package;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Packages {
    type Item = Package;
    type IntoIter = std::vec::IntoIter<Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Packages {
    type Item = &'a Package;
    type IntoIter = std::slice::Iter<'a, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Packages> for Vec<Package> {
    fn from(packages: Packages) -> Self {
        packages.0
    }
}
