//! Binary package control files, as found in `DEBIAN/control` of a `.deb`.
use crate::coerce;
use crate::{Error, FromRawDocument, ParseOptions};
use apt_kv::RawDocument;

/// A binary package control file
#[derive(Debug, Clone, PartialEq, Eq, crate::FromRawDocument)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[apt(kind = Control)]
pub struct Control {
    #[apt(raw)]
    #[cfg_attr(feature = "serde", serde(skip))]
    document: RawDocument,

    #[apt(field = "Package", required)]
    /// Name of the package
    pub package: String,

    #[apt(field = "Source")]
    /// Source package the binary was built from
    pub source: Option<String>,

    #[apt(field = "Version", required)]
    /// Version of the package
    pub version: String,

    #[apt(field = "Section")]
    /// Section of the package
    pub section: Option<String>,

    #[apt(field = "Priority")]
    /// Priority of the package
    pub priority: Option<String>,

    #[apt(field = "Architecture", required)]
    /// Architecture of the package
    pub architecture: String,

    #[apt(field = "Essential", with = coerce::yes_no)]
    /// Whether the package is essential
    pub essential: Option<bool>,

    #[apt(field = "Depends", with = coerce::comma_list)]
    /// Packages that this package depends on
    pub depends: Option<Vec<String>>,

    #[apt(field = "Pre-Depends", with = coerce::comma_list)]
    /// Packages that must be configured before this one is unpacked
    pub pre_depends: Option<Vec<String>>,

    #[apt(field = "Recommends", with = coerce::comma_list)]
    /// Packages that this package recommends
    pub recommends: Option<Vec<String>>,

    #[apt(field = "Suggests", with = coerce::comma_list)]
    /// Packages that this package suggests
    pub suggests: Option<Vec<String>>,

    #[apt(field = "Replaces", with = coerce::comma_list)]
    /// Packages that this package replaces
    pub replaces: Option<Vec<String>>,

    #[apt(field = "Enhances", with = coerce::comma_list)]
    /// Packages that this package enhances
    pub enhances: Option<Vec<String>>,

    #[apt(field = "Breaks", with = coerce::comma_list)]
    /// Packages that this package breaks
    pub breaks: Option<Vec<String>>,

    #[apt(field = "Conflicts", with = coerce::comma_list)]
    /// Packages that this package conflicts with
    pub conflicts: Option<Vec<String>>,

    #[apt(field = "Provides", with = coerce::comma_list)]
    /// Virtual packages this package provides
    pub provides: Option<Vec<String>>,

    #[apt(field = "Installed-Size", with = coerce::unsigned)]
    /// Estimated disk usage once installed, in kibibytes
    pub installed_size: Option<u64>,

    #[apt(field = "Maintainer")]
    /// Maintainer of the package
    pub maintainer: Option<String>,

    #[apt(field = "Description")]
    /// Description of the package
    pub description: Option<String>,

    #[apt(field = "Homepage")]
    /// Homepage of the package
    pub homepage: Option<String>,

    #[apt(field = "Built-Using", with = coerce::comma_list)]
    /// Source packages whose contents were incorporated at build time
    pub built_using: Option<Vec<String>>,

    #[apt(field = "Package-Type")]
    /// Type of the package, e.g. `deb` or `udeb`
    pub package_type: Option<String>,

    #[apt(field = "Tag", with = coerce::comma_list)]
    /// Debtags
    pub tags: Option<Vec<String>>,

    #[apt(field = "Multi-Arch")]
    /// Multi-Arch behaviour of the package
    pub multi_arch: Option<String>,
}

impl Control {
    /// Get the raw value of any field, including ones without a typed accessor.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.document.get(key)
    }

    /// All fields as tokenized.
    pub fn document(&self) -> &RawDocument {
        &self.document
    }

    /// The first line of the description.
    pub fn synopsis(&self) -> Option<&str> {
        self.description.as_deref().and_then(|d| d.lines().next())
    }
}

impl std::str::FromStr for Control {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}
