use apt_parser::{HashKind, Release};
use std::str::FromStr;

pub const TEXT: &str = r#"Origin: Debian
Label: Debian
Suite: unstable
Codename: sid
Date: Sat, 10 Feb 2024 08:12:43 UTC
Valid-Until: Sat, 17 Feb 2024 08:12:43 UTC
Architectures: all amd64 arm64
Components: main contrib non-free-firmware non-free
Description: Debian x.y Unstable - Not Released
SHA256:
 2b1f9a2f4ea0e8f1d6a5f4f2c1c8d0e6f5b0c9a5e9b6c3d4e5f60718293a4b5c  1484322 main/binary-amd64/Packages
 a8f3e1d9c7b5a3f1e9d7c5b3a1f9e7d5c3b1a9f7e5d3c1b9a7f5e3d1c9b7a5f3    98581 main/binary-amd64/Packages.xz
"#;

pub fn main() {
    let release = match Release::from_str(TEXT) {
        Ok(release) => release,
        Err(e) => {
            eprintln!("Failed to parse Release file: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(codename) = &release.codename {
        println!("Codename: {}", codename);
    }

    if let Some(valid_until) = &release.valid_until {
        println!("Valid until: {}", valid_until.to_rfc2822());
    }

    for kind in HashKind::ALL {
        for entry in release.hashes(kind).unwrap_or_default() {
            println!("{}: {}", kind, entry);
        }
    }
}
