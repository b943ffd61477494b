use apt_parser::{Packages, RawDocument, Release};
use criterion::{criterion_group, criterion_main, Criterion};

fn packages_index(count: usize) -> String {
    let mut text = String::new();
    for i in 0..count {
        text.push_str(&format!(
            "Package: package-{i}\n\
             Version: 1.{i}-1\n\
             Architecture: amd64\n\
             Installed-Size: {size}\n\
             Depends: libc6 (>= 2.34), libfoo{i} | libbar, zlib1g\n\
             Description: synthetic package {i}\n \
             with a folded description\n \
             .\n \
             and a second paragraph\n\
             Filename: pool/main/p/package-{i}/package-{i}_1.{i}-1_amd64.deb\n\
             Size: {size}\n\
             SHA256: 0d5d1a2f3e4b5c6d7e8f9a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d\n\n",
            size = 1000 + i
        ));
    }
    text
}

fn parse_packages_benchmark(c: &mut Criterion) {
    let index = packages_index(1000);

    c.bench_function("tokenize_packages", |b| {
        b.iter(|| apt_parser::records(&index).map(RawDocument::parse).count());
    });

    c.bench_function("parse_packages", |b| {
        b.iter(|| {
            let _packages: Packages = index.parse().unwrap();
        });
    });
}

fn parse_release_benchmark(c: &mut Criterion) {
    let release = include_str!("../tests/data/Release");

    c.bench_function("parse_release", |b| {
        b.iter(|| {
            let _release: Release = release.parse().unwrap();
        });
    });
}

criterion_group!(benches, parse_packages_benchmark, parse_release_benchmark);
criterion_main!(benches);
