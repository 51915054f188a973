//! Decoding of `editor:` URIs into a file path and optional line number.
//!
//! Two URI forms are accepted:
//!
//! - `editor:///path/to/file:123` - trailing `:line` suffix
//! - `editor:///path/to/file?line=456` - explicit `line` query key
//!
//! The query key always wins. The suffix form only ever splits on the last
//! colon; a non-numeric suffix is treated as part of the filename.
//!
//! The path is taken verbatim from the URI text and only percent-decoded.
//! Dot segments (`.`, `..`) are never resolved.

use std::num::IntErrorKind;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::error::{Error, Result};
use crate::target::DecodedTarget;

/// URI scheme this program is registered for
pub const PROTOCOL_NAME: &str = "editor";

/// Query key carrying an explicit line number
const LINE_QUERY_KEY: &str = "line";

/// Parse an `editor:` URI into a [`DecodedTarget`].
///
/// # Errors
///
/// - [`Error::InvalidScheme`] if the string is not a URI or its scheme is not
///   [`PROTOCOL_NAME`]
/// - [`Error::InvalidLineNumber`] if a `line` query value is not an integer
pub fn parse_uri(uri: &str) -> Result<DecodedTarget> {
    let parsed = Url::parse(uri).map_err(|e| {
        tracing::debug!("Failed to parse {:?} as a URI: {}", uri, e);
        Error::invalid_scheme(uri)
    })?;

    if parsed.scheme() != PROTOCOL_NAME {
        return Err(Error::invalid_scheme(uri));
    }

    let path = percent_decode_str(raw_path(uri))
        .decode_utf8_lossy()
        .into_owned();

    // Blank values are ignored, the last non-blank occurrence wins
    let line_value = parsed
        .query_pairs()
        .filter(|(key, value)| key == LINE_QUERY_KEY && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .last();

    if let Some(value) = line_value {
        let line =
            parse_line_number(&value).ok_or_else(|| Error::invalid_line_number(uri, &value))?;
        return Ok(DecodedTarget::new(path, Some(line)));
    }

    Ok(split_line_suffix(path))
}

/// Split a trailing `:<line>` off a decoded path.
///
/// Only the last colon is considered. If what follows it is not an integer the
/// path is returned unchanged with no line number.
pub fn split_line_suffix(path: String) -> DecodedTarget {
    if let Some((file, suffix)) = path.rsplit_once(':') {
        if let Some(line) = parse_line_number(suffix) {
            return DecodedTarget::new(file, Some(line));
        }
    }
    DecodedTarget::new(path, None)
}

/// Path text of `uri` as written: after `scheme:` and any `//authority`, up
/// to the first `?` or `#`.
/// Unlike `Url::path`, dot segments are left exactly as written.
fn raw_path(uri: &str) -> &str {
    // Same trimming as `Url::parse`
    let uri = uri.trim_matches(|c: char| c <= ' ');
    let rest = uri.split_once(':').map_or(uri, |(_, rest)| rest);

    let rest = match rest.strip_prefix("//") {
        Some(authority_and_path) => match authority_and_path.find(['/', '?', '#']) {
            Some(start) => &authority_and_path[start..],
            None => "",
        },
        None => rest,
    };

    match rest.find(['?', '#']) {
        Some(end) => &rest[..end],
        None => rest,
    }
}

/// Parse a line number as a signed integer, clamped to `1..=u32::MAX`.
///
/// Negative, zero and out-of-range values still count as line numbers;
/// editors get the nearest line that exists.
fn parse_line_number(value: &str) -> Option<u32> {
    let line = match value.trim().parse::<i64>() {
        Ok(line) => line,
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => i64::MAX,
            IntErrorKind::NegOverflow => i64::MIN,
            _ => return None,
        },
    };
    u32::try_from(line.clamp(1, i64::from(u32::MAX))).ok()
}
