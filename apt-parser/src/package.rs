//! Records of a Packages index.
use crate::coerce;
use crate::{Control, Error, FromRawDocument, ParseOptions};

/// A package in a Packages index
///
/// Carries the control fields of the binary package plus the location and
/// checksums of its `.deb` in the archive. The control fields, including
/// [`Control::get`] for raw lookups, are reachable directly through `Deref`.
#[derive(Debug, Clone, PartialEq, Eq, crate::FromRawDocument)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[apt(kind = Package)]
pub struct Package {
    #[apt(flatten)]
    #[cfg_attr(feature = "serde", serde(flatten))]
    /// The control fields of the package
    pub control: Control,

    #[apt(field = "Filename")]
    /// Path of the `.deb`, relative to the archive root
    pub filename: Option<String>,

    #[apt(field = "Size", with = coerce::unsigned)]
    /// Size of the `.deb`, in bytes
    pub size: Option<u64>,

    #[apt(field = "MD5sum")]
    /// MD5 checksum of the `.deb`
    pub md5sum: Option<String>,

    #[apt(field = "SHA1")]
    /// SHA1 checksum of the `.deb`
    pub sha1: Option<String>,

    #[apt(field = "SHA256")]
    /// SHA256 checksum of the `.deb`
    pub sha256: Option<String>,

    #[apt(field = "SHA512")]
    /// SHA512 checksum of the `.deb`
    pub sha512: Option<String>,

    #[apt(field = "Description-md5")]
    /// MD5 of the untranslated description, used to look up translations
    pub description_md5: Option<String>,
}

impl std::ops::Deref for Package {
    type Target = Control;

    fn deref(&self) -> &Self::Target {
        &self.control
    }
}

impl From<Package> for Control {
    fn from(package: Package) -> Self {
        package.control
    }
}

impl std::str::FromStr for Package {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}
