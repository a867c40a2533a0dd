//! Verification of HMAC-SHA256 signed requests.
//!
//! This is the mirror of [`crate::signer`]: given the parts of an incoming
//! request and the shared secret, rebuild the string to sign from the
//! request's own `Date`, `host`, path-and-query, and `x-ms-content-sha256`,
//! recompute the MAC, and compare it to the presented signature in constant
//! time. Useful for test doubles of the service and for checking a prepared
//! request before it leaves the process.

use subtle::ConstantTimeEq;
use tracing::debug;

use crate::canonical::{ALGORITHM, CONTENT_SHA256_HEADER, SIGNED_HEADERS, build_string_to_sign};
use crate::error::AuthError;
use crate::signer::{compute_signature, decode_secret};

/// Parsed components of an `Authorization` header.
///
/// Format:
/// ```text
/// HMAC-SHA256 Credential=<id>&SignedHeaders=date;host;x-ms-content-sha256&Signature=<base64>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedAuth {
    /// The credential identifier.
    pub credential: String,
    /// The signed header list, as presented.
    pub signed_headers: String,
    /// The base64 signature.
    pub signature: String,
}

/// The result of a successful verification.
#[derive(Debug, Clone)]
pub struct VerifiedRequest {
    /// The credential that signed the request.
    pub credential: String,
    /// The `Date` header the signature covers.
    pub date: String,
}

/// Parse an `Authorization` header value into its components.
///
/// The credential is opaque and may itself contain `&`, so the signature
/// and signed headers are split off from the right.
///
/// # Errors
///
/// Returns [`AuthError::UnsupportedAlgorithm`] for anything other than
/// `HMAC-SHA256`, and [`AuthError::InvalidAuthHeader`] when a component is missing.
///
/// # Examples
///
/// ```
/// use azconfig_auth::parse_authorization_header;
///
/// let parsed = parse_authorization_header(
///     "HMAC-SHA256 Credential=foo&SignedHeaders=date;host;x-ms-content-sha256&Signature=c2ln",
/// )
/// .unwrap();
/// assert_eq!(parsed.credential, "foo");
/// assert_eq!(parsed.signature, "c2ln");
/// ```
pub fn parse_authorization_header(header: &str) -> Result<ParsedAuth, AuthError> {
    let (algorithm, rest) = header.split_once(' ').ok_or(AuthError::InvalidAuthHeader)?;

    if algorithm != ALGORITHM {
        return Err(AuthError::UnsupportedAlgorithm(algorithm.to_owned()));
    }

    let rest = rest.strip_prefix("Credential=").ok_or(AuthError::InvalidAuthHeader)?;
    let (rest, signature) = rest
        .rsplit_once("&Signature=")
        .ok_or(AuthError::InvalidAuthHeader)?;
    let (credential, signed_headers) = rest
        .rsplit_once("&SignedHeaders=")
        .ok_or(AuthError::InvalidAuthHeader)?;

    if signature.is_empty() {
        return Err(AuthError::InvalidAuthHeader);
    }

    Ok(ParsedAuth {
        credential: credential.to_owned(),
        signed_headers: signed_headers.to_owned(),
        signature: signature.to_owned(),
    })
}

/// Verify a signed request against the shared secret.
///
/// `content_hash` is the base64 SHA-256 of the received body (see
/// [`crate::hash_payload`]). The host is taken from the `host` header when
/// present, otherwise from the URI authority.
///
/// # Errors
///
/// Returns an [`AuthError`] if:
/// - The `Authorization` header is missing or malformed
/// - A header covered by the signature is missing
/// - The content hash header disagrees with `content_hash`
/// - The secret is not valid base64
/// - The signature does not match
pub fn verify_request(
    parts: &http::request::Parts,
    content_hash: &str,
    secret: &str,
) -> Result<VerifiedRequest, AuthError> {
    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let parsed = parse_authorization_header(auth_header)?;
    if parsed.signed_headers != SIGNED_HEADERS {
        return Err(AuthError::UnsupportedSignedHeaders(parsed.signed_headers));
    }

    let date = extract_header_value(parts, http::header::DATE.as_str())?;
    let presented_hash = extract_header_value(parts, CONTENT_SHA256_HEADER)?;
    if presented_hash != content_hash {
        return Err(AuthError::ContentHashMismatch);
    }

    let host = match parts.headers.get(http::header::HOST) {
        Some(value) => value
            .to_str()
            .map_err(|_| AuthError::MissingHeader("host".to_owned()))?,
        None => parts
            .uri
            .authority()
            .map(http::uri::Authority::as_str)
            .ok_or_else(|| AuthError::MissingHeader("host".to_owned()))?,
    };
    let path = parts
        .uri
        .path_and_query()
        .map_or("/", http::uri::PathAndQuery::as_str);

    debug!(credential = %parsed.credential, host, path, "Verifying HMAC-SHA256 signature");

    let string_to_sign = build_string_to_sign(path, date, host, content_hash);
    let key = decode_secret(secret)?;
    let expected_signature = compute_signature(&key, string_to_sign.as_bytes())?;

    if parsed
        .signature
        .as_bytes()
        .ct_eq(expected_signature.as_bytes())
        .into()
    {
        debug!(credential = %parsed.credential, "Signature verification succeeded");
        Ok(VerifiedRequest {
            credential: parsed.credential,
            date: date.to_owned(),
        })
    } else {
        debug!(credential = %parsed.credential, "Signature mismatch");
        Err(AuthError::SignatureDoesNotMatch)
    }
}

/// Extract a header value as a string slice from the request parts.
fn extract_header_value<'a>(
    parts: &'a http::request::Parts,
    name: &str,
) -> Result<&'a str, AuthError> {
    parts
        .headers
        .get(name)
        .ok_or_else(|| AuthError::MissingHeader(name.to_owned()))?
        .to_str()
        .map_err(|_| AuthError::MissingHeader(name.to_owned()))
}
