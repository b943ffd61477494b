//! Release files
use crate::coerce;
use crate::{Error, FromRawDocument, ParseOptions};
use apt_kv::RawDocument;
use chrono::{DateTime, FixedOffset};

/// One file listed under a Release checksum field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReleaseHash {
    /// Path of the index, relative to the Release file
    pub filename: String,

    /// Hex digest
    pub hash: String,

    /// Size of the file, in bytes
    pub size: u64,
}

impl std::fmt::Display for ReleaseHash {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} {} {}", self.hash, self.size, self.filename)
    }
}

/// The checksum fields a Release file may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum HashKind {
    /// `MD5Sum`
    Md5,

    /// `SHA1`
    Sha1,

    /// `SHA256`
    Sha256,

    /// `SHA512`
    Sha512,
}

impl HashKind {
    /// All checksum kinds, weakest first.
    pub const ALL: [HashKind; 4] = [
        HashKind::Md5,
        HashKind::Sha1,
        HashKind::Sha256,
        HashKind::Sha512,
    ];

    /// Name of the Release field holding this checksum list.
    pub fn field(self) -> &'static str {
        match self {
            HashKind::Md5 => "MD5Sum",
            HashKind::Sha1 => "SHA1",
            HashKind::Sha256 => "SHA256",
            HashKind::Sha512 => "SHA512",
        }
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

impl std::str::FromStr for HashKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MD5Sum" => Ok(HashKind::Md5),
            "SHA1" => Ok(HashKind::Sha1),
            "SHA256" => Ok(HashKind::Sha256),
            "SHA512" => Ok(HashKind::Sha512),
            _ => Err(format!("Invalid hash field: {}", s)),
        }
    }
}

/// A Release file
#[derive(Debug, Clone, PartialEq, Eq, crate::FromRawDocument)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[apt(kind = Release)]
pub struct Release {
    #[apt(raw)]
    #[cfg_attr(feature = "serde", serde(skip))]
    document: RawDocument,

    #[apt(field = "Architectures", required, with = coerce::whitespace_list)]
    /// Architectures supported by the release
    pub architectures: Vec<String>,

    #[apt(field = "Components", required, with = coerce::whitespace_list)]
    /// Components supported by the release
    pub components: Vec<String>,

    #[apt(field = "No-Support-for-Architecture-all", with = coerce::yes_no)]
    /// Whether `Architecture: all` packages are listed only in native architecture indices
    pub no_support_for_architecture_all: Option<bool>,

    #[apt(field = "Description")]
    /// Description of the release
    pub description: Option<String>,

    #[apt(field = "Origin")]
    /// Origin of the release
    pub origin: Option<String>,

    #[apt(field = "Label")]
    /// Label of the release
    pub label: Option<String>,

    #[apt(field = "Suite")]
    /// Suite of the release
    pub suite: Option<String>,

    #[apt(field = "Version")]
    /// Version of the release
    pub version: Option<String>,

    #[apt(field = "Codename")]
    /// The codename of the release
    pub codename: Option<String>,

    #[apt(field = "Date", with = coerce::date)]
    /// Date the release was published
    pub date: Option<DateTime<FixedOffset>>,

    #[apt(field = "Valid-Until", with = coerce::date)]
    /// Date after which the release should be considered stale
    pub valid_until: Option<DateTime<FixedOffset>>,

    #[apt(field = "MD5Sum", with = coerce::hash_list)]
    /// MD5 checksums of the indices
    pub md5sum: Option<Vec<ReleaseHash>>,

    #[apt(field = "SHA1", with = coerce::hash_list)]
    /// SHA1 checksums of the indices
    pub sha1: Option<Vec<ReleaseHash>>,

    #[apt(field = "SHA256", with = coerce::hash_list)]
    /// SHA256 checksums of the indices
    pub sha256: Option<Vec<ReleaseHash>>,

    #[apt(field = "SHA512", with = coerce::hash_list)]
    /// SHA512 checksums of the indices
    pub sha512: Option<Vec<ReleaseHash>>,

    #[apt(field = "NotAutomatic", with = coerce::yes_no)]
    /// Whether the release is not automatic
    pub not_automatic: Option<bool>,

    #[apt(field = "ButAutomaticUpgrades", with = coerce::yes_no)]
    /// Indicates if packages retrieved from this release should be automatically upgraded
    pub but_automatic_upgrades: Option<bool>,

    #[apt(field = "Acquire-By-Hash", with = coerce::yes_no)]
    /// Whether packages files can be acquired by hash
    pub acquire_by_hash: Option<bool>,

    #[apt(field = "Signed-By", with = coerce::comma_list)]
    /// Fingerprints of the keys allowed to sign the next Release
    pub signed_by: Option<Vec<String>>,

    #[apt(field = "Packages-Require-Authorization", with = coerce::yes_no)]
    /// Whether downloading packages requires authorization
    pub packages_require_authorization: Option<bool>,

    #[apt(field = "Changelogs")]
    /// URL template for package changelogs
    pub changelogs: Option<String>,
}

impl Release {
    /// Get the raw value of any field, including ones without a typed accessor.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.document.get(key)
    }

    /// All fields as tokenized.
    pub fn document(&self) -> &RawDocument {
        &self.document
    }

    /// The checksum list of the given kind, if the Release carries one.
    pub fn hashes(&self, kind: HashKind) -> Option<&[ReleaseHash]> {
        match kind {
            HashKind::Md5 => self.md5sum.as_deref(),
            HashKind::Sha1 => self.sha1.as_deref(),
            HashKind::Sha256 => self.sha256.as_deref(),
            HashKind::Sha512 => self.sha512.as_deref(),
        }
    }

    /// Every filename listed by any checksum field, in first-seen order.
    pub fn files(&self) -> Vec<&str> {
        let mut files: Vec<&str> = Vec::new();
        for kind in HashKind::ALL {
            for entry in self.hashes(kind).unwrap_or_default() {
                if !files.contains(&entry.filename.as_str()) {
                    files.push(&entry.filename);
                }
            }
        }
        files
    }
}

impl std::str::FromStr for Release {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, &ParseOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordKind;
    use chrono::Datelike;
    use indoc::indoc;

    const FOCAL: &str = indoc! {"
        Origin: Ubuntu
        Label: Ubuntu
        Suite: focal
        Version: 20.04
        Codename: focal
        Date: Thu, 23 Apr 2020 17:33:17 UTC
        Architectures: amd64 arm64 armhf i386 ppc64el riscv64 s390x
        Components: main restricted universe multiverse
        Description: Ubuntu Focal 20.04
        Acquire-By-Hash: yes
        MD5Sum:
         2f5a2c3ed1d2a1e1e0f3e7b2d9c5a7e1 1234 main/binary-amd64/Packages
         5b1c0a4c5d3e6f708192a3b4c5d6e7f8 567 main/binary-amd64/Packages.gz
        SHA256:
         7c9e8b1a6d5f4e3c2b1a09f8e7d6c5b4a3928170e6d5c4b3a29180f7e6d5c4b3 1234 main/binary-amd64/Packages
         0a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f9 567 main/binary-amd64/Packages.gz
         1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f708192a3b4c5d6e7f809 89 main/i18n/Index
    "};

    #[test]
    fn test_release() {
        let release: Release = FOCAL.parse().unwrap();

        assert_eq!(
            release.architectures,
            vec!["amd64", "arm64", "armhf", "i386", "ppc64el", "riscv64", "s390x"]
        );
        assert_eq!(
            release.components,
            vec!["main", "restricted", "universe", "multiverse"]
        );
        assert_eq!(release.origin.as_deref(), Some("Ubuntu"));
        assert_eq!(release.label.as_deref(), Some("Ubuntu"));
        assert_eq!(release.suite.as_deref(), Some("focal"));
        assert_eq!(release.version.as_deref(), Some("20.04"));
        assert_eq!(release.codename.as_deref(), Some("focal"));
        assert_eq!(release.description.as_deref(), Some("Ubuntu Focal 20.04"));
        assert_eq!(release.date.unwrap().year(), 2020);
        assert_eq!(release.valid_until, None);
        assert_eq!(release.acquire_by_hash, Some(true));
        assert_eq!(release.not_automatic, None);
        assert_eq!(release.but_automatic_upgrades, None);
        assert_eq!(release.no_support_for_architecture_all, None);
        assert_eq!(release.signed_by, None);
        assert_eq!(release.packages_require_authorization, None);
        assert_eq!(release.changelogs, None);

        let md5 = release.md5sum.as_ref().unwrap();
        assert_eq!(md5.len(), 2);
        assert_eq!(md5[0].hash, "2f5a2c3ed1d2a1e1e0f3e7b2d9c5a7e1");
        assert_eq!(md5[0].size, 1234);
        assert_eq!(md5[0].filename, "main/binary-amd64/Packages");
        assert_eq!(release.sha1, None);
        assert_eq!(release.sha256.as_ref().unwrap().len(), 3);
        assert_eq!(release.sha512, None);
    }

    #[test]
    fn test_raw_lookup_matches_typed_source() {
        let release: Release = FOCAL.parse().unwrap();
        assert_eq!(
            release.get("Architectures"),
            Some("amd64 arm64 armhf i386 ppc64el riscv64 s390x")
        );
        assert_eq!(release.get("Date"), Some("Thu, 23 Apr 2020 17:33:17 UTC"));
        assert_eq!(
            release.get("MD5Sum"),
            Some("2f5a2c3ed1d2a1e1e0f3e7b2d9c5a7e1 1234 main/binary-amd64/Packages\n5b1c0a4c5d3e6f708192a3b4c5d6e7f8 567 main/binary-amd64/Packages.gz")
        );
        assert_eq!(release.get("Invalid-Key"), None);
        assert_eq!(release.document().len(), 12);
    }

    #[test]
    fn test_hashes_by_kind() {
        let release: Release = FOCAL.parse().unwrap();
        assert_eq!(release.hashes(HashKind::Md5).map(<[_]>::len), Some(2));
        assert_eq!(release.hashes(HashKind::Sha1), None);
        assert_eq!(release.hashes(HashKind::Sha256).map(<[_]>::len), Some(3));
        assert_eq!(release.hashes(HashKind::Sha512), None);
        assert_eq!(
            release.files(),
            vec![
                "main/binary-amd64/Packages",
                "main/binary-amd64/Packages.gz",
                "main/i18n/Index"
            ]
        );
    }

    #[test]
    fn test_hash_kind() {
        for kind in HashKind::ALL {
            assert_eq!(kind.field().parse::<HashKind>(), Ok(kind));
            assert_eq!(kind.to_string(), kind.field());
        }
        assert!("MD5sum".parse::<HashKind>().is_err());
    }

    #[test]
    fn test_release_hash_display() {
        let hash = ReleaseHash {
            filename: "main/Contents-amd64".to_string(),
            hash: "abc".to_string(),
            size: 10,
        };
        assert_eq!(hash.to_string(), "abc 10 main/Contents-amd64");
    }

    #[test]
    fn test_missing_components() {
        let err = "Architectures: amd64\n".parse::<Release>().unwrap_err();
        match err {
            Error::MissingRequiredField { kind, field } => {
                assert_eq!(kind, RecordKind::Release);
                assert_eq!(field, "Components");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_architectures_skip_validation() {
        let options = ParseOptions::default().skip_validation(true);
        let release = Release::parse_with("Origin: Example\n", &options).unwrap();
        assert!(release.architectures.is_empty());
        assert!(release.components.is_empty());
        assert_eq!(release.origin.as_deref(), Some("Example"));
    }

    #[test]
    fn test_flags_and_signed_by() {
        let release: Release = indoc! {"
            Architectures: iphoneos-arm
            Components: main
            NotAutomatic: yes
            ButAutomaticUpgrades: No
            No-Support-for-Architecture-all: Packages
            Packages-Require-Authorization: YES
            Signed-By: 0123456789ABCDEF, FEDCBA9876543210
            Valid-Until: Sat, 30 Apr 2022 17:33:17 UTC
        "}
        .parse()
        .unwrap();

        assert_eq!(release.not_automatic, Some(true));
        assert_eq!(release.but_automatic_upgrades, Some(false));
        assert_eq!(release.no_support_for_architecture_all, None);
        assert_eq!(release.packages_require_authorization, Some(true));
        assert_eq!(
            release.signed_by,
            Some(vec![
                "0123456789ABCDEF".to_string(),
                "FEDCBA9876543210".to_string()
            ])
        );
        assert_eq!(release.valid_until.unwrap().month(), 4);
    }

    #[test]
    fn test_unparsable_date_is_kept_raw() {
        let release: Release = "Architectures: all\nComponents: main\nDate: someday\n"
            .parse()
            .unwrap();
        assert_eq!(release.date, None);
        assert_eq!(release.get("Date"), Some("someday"));
    }

    #[test]
    fn test_hash_with_invalid_size() {
        let err = "Architectures: all\nComponents: main\nSHA256:\n abc big main/Packages\n"
            .parse::<Release>()
            .unwrap_err();
        assert_eq!(err.kind(), Some(RecordKind::Release));
        assert_eq!(err.field(), Some("SHA256"));
    }

    #[test]
    fn test_hash_with_trailing_tokens() {
        let release: Release =
            "Architectures: all\nComponents: main\nSHA1:\n abc 1 main/Packages\n def 2\n"
                .parse()
                .unwrap();
        assert_eq!(release.sha1.unwrap().len(), 1);
    }
}
