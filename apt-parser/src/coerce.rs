//! Conversions from raw field values to typed values.
//!
//! The `parse_*` functions implement the per-format coercion rules. The
//! remaining functions adapt them to the `fn(Option<&str>) -> Result<T, String>`
//! shape used by `#[apt(with = ...)]`.
use crate::release::ReleaseHash;
use chrono::{DateTime, FixedOffset};
use std::str::FromStr;

/// How a list-valued field separates its items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// Any run of whitespace, as in `Architectures` and `Components`
    Whitespace,

    /// Commas, as in `Depends` and other relationship fields
    Comma,
}

/// Parse a `yes`/`no` field, ignoring case.
///
/// Anything else, including an empty value, yields `None` rather than `false`.
pub fn parse_boolean(raw: Option<&str>) -> Option<bool> {
    let raw = raw?.trim();
    if raw.eq_ignore_ascii_case("yes") {
        Some(true)
    } else if raw.eq_ignore_ascii_case("no") {
        Some(false)
    } else {
        None
    }
}

/// Split a list field, dropping empty items left by stray delimiters.
///
/// Comma-separated items are trimmed. An absent field yields `None`, a
/// present but empty one an empty list.
pub fn parse_list(raw: Option<&str>, delimiter: Delimiter) -> Option<Vec<String>> {
    let raw = raw?;
    let items = match delimiter {
        Delimiter::Whitespace => raw.split_whitespace().map(str::to_string).collect(),
        Delimiter::Comma => raw
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
    };
    Some(items)
}

/// Parse a Release checksum list into `(hash, size, filename)` entries.
///
/// Tokens are taken three at a time; an incomplete trailing group is
/// dropped. A size that is not an unsigned integer is an error.
pub fn parse_hash_list(raw: &str) -> Result<Vec<ReleaseHash>, std::num::ParseIntError> {
    let tokens = raw.split_whitespace().collect::<Vec<_>>();
    let chunks = tokens.chunks_exact(3);

    let _dropped = chunks.remainder();
    #[cfg(feature = "tracing")]
    if !_dropped.is_empty() {
        tracing::debug!("Dropping incomplete hash entry: {:?}", _dropped);
    }

    chunks
        .map(|chunk| {
            Ok(ReleaseHash {
                hash: chunk[0].to_string(),
                size: chunk[1].parse()?,
                filename: chunk[2].to_string(),
            })
        })
        .collect()
}

/// Parse a base-10 integer field.
///
/// The target type decides signedness. An absent field yields `Ok(None)`;
/// anything that does not parse is an error.
pub fn parse_integer<T: FromStr>(raw: Option<&str>) -> Result<Option<T>, T::Err> {
    raw.map(|raw| raw.trim().parse()).transpose()
}

/// Parse an RFC 2822 date as written in Release files.
///
/// APT archives commonly use the zone name `UTC`, which is accepted. A value
/// that still fails to parse yields `None`.
pub fn parse_date(raw: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let raw = raw?.trim();
    let parsed = DateTime::parse_from_rfc2822(raw).or_else(|err| match raw.strip_suffix("UTC") {
        Some(prefix) => DateTime::parse_from_rfc2822(&format!("{}+0000", prefix)),
        None => Err(err),
    });

    match parsed {
        Ok(date) => Some(date),
        Err(_err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("Ignoring unparsable date {:?}: {}", raw, _err);
            None
        }
    }
}

/// Optional free-form text.
pub fn string(value: Option<&str>) -> Result<Option<String>, String> {
    Ok(value.map(str::to_string))
}

/// Required free-form text; empty when absent and validation is skipped.
pub fn required_string(value: Option<&str>) -> Result<String, String> {
    Ok(value.unwrap_or_default().to_string())
}

/// Optional `yes`/`no` flag.
pub fn yes_no(value: Option<&str>) -> Result<Option<bool>, String> {
    Ok(parse_boolean(value))
}

/// Whitespace separated list that is empty when absent.
pub fn whitespace_list(value: Option<&str>) -> Result<Vec<String>, String> {
    Ok(parse_list(value, Delimiter::Whitespace).unwrap_or_default())
}

/// Optional comma separated list.
pub fn comma_list(value: Option<&str>) -> Result<Option<Vec<String>>, String> {
    Ok(parse_list(value, Delimiter::Comma))
}

/// Optional unsigned integer.
pub fn unsigned(value: Option<&str>) -> Result<Option<u64>, String> {
    parse_integer(value).map_err(|e: std::num::ParseIntError| e.to_string())
}

/// Optional signed integer.
pub fn signed(value: Option<&str>) -> Result<Option<i64>, String> {
    parse_integer(value).map_err(|e: std::num::ParseIntError| e.to_string())
}

/// Optional Release checksum list.
pub fn hash_list(value: Option<&str>) -> Result<Option<Vec<ReleaseHash>>, String> {
    value
        .map(parse_hash_list)
        .transpose()
        .map_err(|e| format!("invalid size in hash entry: {}", e))
}

/// Optional RFC 2822 date; unparsable dates become `None`.
pub fn date(value: Option<&str>) -> Result<Option<DateTime<FixedOffset>>, String> {
    Ok(parse_date(value))
}
