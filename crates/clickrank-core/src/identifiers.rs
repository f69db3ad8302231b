//! Link identifier normalization.
//!
//! The registry names a link by its domain and path segment, a click event
//! by a URL. Both are reduced to the same `host/path` join key here.

use percent_encoding::percent_decode_str;
use url::{ParseError, Url};

use crate::error::{ClickRankError, Result};

/// Build the join key for a registry row: `"{domain}/{path}"`.
///
/// The domain is ASCII-lowercased to match the host normalization applied
/// to click URLs by [`bitlink_identifier`]; the path is kept verbatim.
///
/// # Examples
///
/// ```
/// use clickrank_core::identifiers::registry_identifier;
///
/// assert_eq!(registry_identifier("bit.ly", "abc123"), "bit.ly/abc123");
/// assert_eq!(registry_identifier("Bit.LY", "AbC"), "bit.ly/AbC");
/// ```
pub fn registry_identifier(domain: &str, path: &str) -> String {
    format!("{}/{}", domain.to_ascii_lowercase(), path)
}

/// Build the join key for a click event from its raw `bitlink`.
///
/// The key is the host followed directly by the percent-decoded path. The
/// scheme, query and fragment do not take part, and a non-default port
/// stays attached to the host (`host:port`).
///
/// References without a scheme are accepted too:
/// * `//bit.ly/x` carries a host and keys as `bit.ly/x`.
/// * `bit.ly/x` is a bare path with no host, so the whole path is the key.
///
/// Opaque URLs such as `mailto:someone` have neither host nor path and key
/// as the empty string.
///
/// # Errors
///
/// Returns [`ClickRankError::InvalidBitlink`] for text that is not a URL
/// reference: malformed authorities, bad percent escapes, or a colon in the
/// first segment of a scheme-less path.
///
/// # Examples
///
/// ```
/// use clickrank_core::identifiers::bitlink_identifier;
///
/// assert_eq!(bitlink_identifier("http://bit.ly/x").unwrap(), "bit.ly/x");
/// assert_eq!(bitlink_identifier("https://amzn.to/3C5IIJm?ref=a").unwrap(), "amzn.to/3C5IIJm");
/// assert_eq!(bitlink_identifier("bit.ly/x").unwrap(), "bit.ly/x");
/// assert!(bitlink_identifier("%foo.html").is_err());
/// ```
pub fn bitlink_identifier(raw: &str) -> Result<String> {
    match Url::parse(raw) {
        Ok(url) => absolute_identifier(raw, &url),
        Err(ParseError::RelativeUrlWithoutBase) => relative_identifier(raw),
        Err(err) => Err(invalid(raw, err.to_string())),
    }
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn absolute_identifier(raw: &str, url: &Url) -> Result<String> {
    let path = if url.cannot_be_a_base() {
        String::new()
    } else {
        decode_path(raw, url.path())?
    };

    let host = url.host_str().unwrap_or_default();
    let key = match url.port() {
        Some(port) => format!("{}:{}{}", host, port, path),
        None => format!("{}{}", host, path),
    };
    Ok(key)
}

fn relative_identifier(raw: &str) -> Result<String> {
    let reference = raw
        .split(|c| c == '?' || c == '#')
        .next()
        .unwrap_or_default();

    if reference.starts_with("//") {
        let url = Url::parse(&format!("http:{}", raw)).map_err(|e| invalid(raw, e.to_string()))?;
        return absolute_identifier(raw, &url);
    }

    let first_segment = reference.split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        return Err(invalid(
            raw,
            "first path segment in URL cannot contain colon".to_string(),
        ));
    }

    decode_path(raw, reference)
}

/// Percent-decode `path`, rejecting any `%` not followed by two hex digits.
fn decode_path(raw: &str, path: &str) -> Result<String> {
    let bytes = path.as_bytes();
    for (i, _) in path.match_indices('%') {
        let well_formed = bytes
            .get(i + 1..i + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            let escape = path.get(i..i + 3).unwrap_or(&path[i..]);
            return Err(invalid(raw, format!("invalid percent escape {:?}", escape)));
        }
    }
    Ok(percent_decode_str(path).decode_utf8_lossy().into_owned())
}

fn invalid(raw: &str, reason: String) -> ClickRankError {
    ClickRankError::InvalidBitlink {
        bitlink: raw.to_string(),
        reason,
    }
}
