#![deny(missing_docs)]
//! Typed parsers for the metadata files of APT repositories.
//!
//! Three formats are supported, all in the deb822 layout:
//!
//! - [`Release`] for `Release` and (already verified) `InRelease` files
//! - [`Control`] for the `control` file of a binary package
//! - [`Package`] for one record of a `Packages` index, and [`Packages`] for
//!   the whole index
//!
//! Every record keeps the full tokenized [`RawDocument`], so fields without
//! a typed accessor stay reachable through `get`.
//!
//! # Examples
//!
//! ```rust
//! use apt_parser::{Control, Packages};
//!
//! let control: Control = "Package: hello
//! Version: 2.10-3
//! Architecture: amd64
//! Installed-Size: 280
//! Custom-Key: cool-value
//! ".parse().unwrap();
//!
//! assert_eq!(control.package, "hello");
//! assert_eq!(control.installed_size, Some(280));
//! assert_eq!(control.get("Custom-Key"), Some("cool-value"));
//!
//! let packages: Packages = "Package: a
//! Version: 1
//! Architecture: all
//!
//! Package: b
//! Version: 2
//! Architecture: all
//! ".parse().unwrap();
//!
//! assert_eq!(packages.len(), 2);
//! assert_eq!(packages[1].version, "2");
//! ```
//!
//! Required fields can be relaxed with [`ParseOptions`]:
//!
//! ```rust
//! use apt_parser::{FromRawDocument, ParseOptions, Release};
//!
//! let options = ParseOptions::default().skip_validation(true);
//! let release = Release::parse_with("Origin: Debian\n", &options).unwrap();
//! assert!(release.architectures.is_empty());
//! ```

extern crate self as apt_parser;

pub mod coerce;
mod control;
mod error;
mod fields;
mod package;
mod packages;
mod release;

pub use apt_kv::{records, RawDocument};
pub use apt_parser_derive::FromRawDocument;
pub use control::Control;
pub use error::Error;
pub use fields::{Fields, FromRawDocument, ParseOptions, RecordKind};
pub use package::Package;
pub use packages::Packages;
pub use release::{HashKind, Release, ReleaseHash};
