use apt_parser::{coerce, Error, FromRawDocument, ParseOptions, RawDocument, RecordKind};

fn upper(value: Option<&str>) -> Result<Option<String>, String> {
    match value {
        Some(v) if v.chars().all(|c| c.is_ascii_alphabetic()) => Ok(Some(v.to_uppercase())),
        Some(v) => Err(format!("{} is not alphabetic", v)),
        None => Ok(None),
    }
}

#[derive(Debug, FromRawDocument)]
#[apt(kind = Control)]
struct Minimal {
    #[apt(raw)]
    raw: RawDocument,

    #[apt(field = "Package", required)]
    name: String,

    #[apt(field = "Priority", with = upper)]
    priority: Option<String>,

    #[apt(field = "Installed-Size", with = coerce::unsigned)]
    installed_size: Option<u64>,

    #[apt(field = "Offset", with = coerce::signed)]
    offset: Option<i64>,

    #[apt(field = "Archs", with = coerce::whitespace_list)]
    archs: Vec<String>,

    // Falls back to the field name as key.
    homepage: Option<String>,
}

#[test]
fn test_derived_constants() {
    assert_eq!(Minimal::KIND, RecordKind::Control);
    assert_eq!(Minimal::REQUIRED, &["Package"]);
}

#[test]
fn test_derived_builder() {
    let minimal = Minimal::parse_with(
        "Package: foo\nPriority: optional\nInstalled-Size: 10\nOffset: -3\nArchs: a b\nhomepage: x\n",
        &ParseOptions::default(),
    )
    .unwrap();

    assert_eq!(minimal.name, "foo");
    assert_eq!(minimal.priority.as_deref(), Some("OPTIONAL"));
    assert_eq!(minimal.installed_size, Some(10));
    assert_eq!(minimal.offset, Some(-3));
    assert_eq!(minimal.archs, vec!["a", "b"]);
    assert_eq!(minimal.homepage.as_deref(), Some("x"));
    assert_eq!(minimal.raw.len(), 6);
}

#[test]
fn test_derived_absent_fields() {
    let minimal = Minimal::parse_with("Package: foo\n", &ParseOptions::default()).unwrap();
    assert_eq!(minimal.priority, None);
    assert_eq!(minimal.installed_size, None);
    assert_eq!(minimal.offset, None);
    assert!(minimal.archs.is_empty());
    assert_eq!(minimal.homepage, None);
}

#[test]
fn test_derived_custom_coercion_error() {
    let err = Minimal::parse_with("Package: foo\nPriority: 42\n", &ParseOptions::default())
        .unwrap_err();
    match err {
        Error::InvalidValue {
            kind,
            field,
            value,
            reason,
        } => {
            assert_eq!(kind, RecordKind::Control);
            assert_eq!(field, "Priority");
            assert_eq!(value, "42");
            assert_eq!(reason, "42 is not alphabetic");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_derived_from_document() {
    let document: RawDocument = vec![
        ("Package".to_string(), "bar".to_string()),
        ("Offset".to_string(), "7".to_string()),
    ]
    .into_iter()
    .collect();

    let minimal = Minimal::from_document(document, &ParseOptions::default()).unwrap();
    assert_eq!(minimal.name, "bar");
    assert_eq!(minimal.offset, Some(7));
}

#[derive(Debug, FromRawDocument)]
#[apt(kind = Package)]
struct Wrapped {
    #[apt(flatten)]
    inner: Minimal,

    #[apt(field = "Extra", required)]
    extra: String,
}

#[test]
fn test_flattened_record() {
    let wrapped =
        Wrapped::parse_with("Package: foo\nExtra: x\nArchs: a\n", &ParseOptions::default())
            .unwrap();
    assert_eq!(wrapped.extra, "x");
    assert_eq!(wrapped.inner.name, "foo");
    assert_eq!(wrapped.inner.archs, vec!["a"]);
    assert_eq!(wrapped.inner.raw.len(), 3);
    assert_eq!(Wrapped::REQUIRED, &["Extra"]);
}

#[test]
fn test_flattened_record_fails_as_outer_kind() {
    let err = Wrapped::parse_with("Extra: x\n", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind(), Some(RecordKind::Package));
    assert_eq!(err.field(), Some("Package"));

    let err = Wrapped::parse_with("Package: foo\n", &ParseOptions::default()).unwrap_err();
    assert_eq!(err.kind(), Some(RecordKind::Package));
    assert_eq!(err.field(), Some("Extra"));

    let err = Minimal::parse_with("Priority: 1\n", &ParseOptions::default().skip_validation(true))
        .unwrap_err();
    assert_eq!(err.kind(), Some(RecordKind::Control));
}
