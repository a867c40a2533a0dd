//! Error types for verifying signed App Configuration requests.
//!
//! Request preparation reports [`azconfig_core::AppConfigError`]; the
//! verification side has its own failure modes, collected in [`AuthError`].

use azconfig_core::AppConfigError;

/// Reasons a signed App Configuration request fails verification.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header was presented.
    #[error("no Authorization header")]
    MissingAuthHeader,

    /// `Authorization` is not `HMAC-SHA256 Credential=..&SignedHeaders=..&Signature=..`.
    #[error("malformed Authorization header")]
    InvalidAuthHeader,

    /// The header names a scheme other than `HMAC-SHA256`.
    #[error("unsupported signing scheme: {0}")]
    UnsupportedAlgorithm(String),

    /// The signed header list differs from `date;host;x-ms-content-sha256`.
    #[error("unsupported signed header list: {0}")]
    UnsupportedSignedHeaders(String),

    /// `Date`, `host`, or `x-ms-content-sha256` is absent or not ASCII.
    #[error("signed header unavailable: {0}")]
    MissingHeader(String),

    /// `x-ms-content-sha256` disagrees with the hash of the received body.
    #[error("x-ms-content-sha256 does not match the body")]
    ContentHashMismatch,

    /// The recomputed HMAC differs from the presented `Signature`.
    #[error("HMAC signature mismatch")]
    SignatureDoesNotMatch,

    /// The shared secret is not base64, or the MAC could not be built.
    #[error(transparent)]
    Signing(#[from] AppConfigError),
}
