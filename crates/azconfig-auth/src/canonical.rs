//! Canonical string construction for App Configuration HMAC signing.
//!
//! The string to sign is exactly three newline-separated lines with no
//! trailing newline:
//!
//! ```text
//! GET\n
//! /kv?api-version=1\n
//! <date>;<host>;<content-hash>
//! ```
//!
//! Both signer and verifier must rebuild this byte-for-byte, so every
//! delimiter here is a literal.

use std::fmt::Write;

use azconfig_core::{AppConfigError, AppConfigResult};
use chrono::{DateTime, Utc};

/// The only HTTP method the client issues.
pub const METHOD: &str = "GET";

/// Path and query of the key-value listing request.
pub const KV_PATH: &str = "/kv?api-version=1";

/// Algorithm name at the start of the `Authorization` header.
pub const ALGORITHM: &str = "HMAC-SHA256";

/// Signed header list, in the order their values appear in the string to sign.
pub const SIGNED_HEADERS: &str = "date;host;x-ms-content-sha256";

/// Header carrying the base64 SHA-256 of the request body.
pub const CONTENT_SHA256_HEADER: &str = "x-ms-content-sha256";

/// ISO-8601 UTC, second precision, `Z` designator (`2022-01-11T16:42:45Z`).
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Format a signing timestamp for the `Date` header.
///
/// # Errors
///
/// Returns [`AppConfigError::Internal`] if the formatter fails, which only
/// happens with a broken format string.
///
/// # Examples
///
/// ```
/// use azconfig_auth::canonical::format_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2022, 1, 11, 16, 42, 45).unwrap();
/// assert_eq!(format_timestamp(ts).unwrap(), "2022-01-11T16:42:45Z");
/// ```
pub fn format_timestamp(timestamp: DateTime<Utc>) -> AppConfigResult<String> {
    let mut out = String::with_capacity(20);
    write!(out, "{}", timestamp.format(DATE_FORMAT))
        .map_err(|_| AppConfigError::Internal("failed to format signing timestamp".to_owned()))?;
    Ok(out)
}

/// Build the canonical string to sign.
///
/// # Examples
///
/// ```
/// use azconfig_auth::canonical::build_string_to_sign;
///
/// let sts = build_string_to_sign(
///     "/kv?api-version=1",
///     "2022-01-11T16:42:45Z",
///     "azure.com",
///     "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=",
/// );
/// assert!(sts.starts_with("GET\n/kv?api-version=1\n"));
/// ```
#[must_use]
pub fn build_string_to_sign(path: &str, date: &str, host: &str, content_hash: &str) -> String {
    format!("{METHOD}\n{path}\n{date};{host};{content_hash}")
}

/// Build the `Authorization` header value.
///
/// The credential is inserted verbatim.
#[must_use]
pub fn build_authorization_header(credential: &str, signature: &str) -> String {
    format!("{ALGORITHM} Credential={credential}&SignedHeaders={SIGNED_HEADERS}&Signature={signature}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_should_build_three_line_string_to_sign() {
        let sts = build_string_to_sign(
            KV_PATH,
            "2022-01-11T16:42:45Z",
            "azure.com",
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=",
        );
        let expected = "GET\n\
                        /kv?api-version=1\n\
                        2022-01-11T16:42:45Z;azure.com;47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";
        assert_eq!(sts, expected);
        assert!(!sts.ends_with('\n'));
        assert_eq!(sts.lines().count(), 3);
    }

    #[test]
    fn test_should_build_authorization_header() {
        let header = build_authorization_header("foo", "c2lnbmF0dXJl");
        assert_eq!(
            header,
            "HMAC-SHA256 Credential=foo&SignedHeaders=date;host;x-ms-content-sha256&Signature=c2lnbmF0dXJl"
        );
    }

    #[test]
    fn test_should_keep_credential_verbatim() {
        let header = build_authorization_header("id with spaces&more", "sig");
        assert!(header.starts_with("HMAC-SHA256 Credential=id with spaces&more&SignedHeaders="));
    }

    #[test]
    fn test_should_format_timestamp_with_utc_designator() {
        let ts = Utc.with_ymd_and_hms(2022, 1, 11, 16, 42, 45).unwrap();
        assert_eq!(format_timestamp(ts).unwrap(), "2022-01-11T16:42:45Z");
    }

    #[test]
    fn test_should_drop_subsecond_precision() {
        let ts = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(format_timestamp(ts).unwrap(), "2023-12-31T23:59:59Z");
    }
}
