//! Error types for the App Configuration client.

/// Every failure the signer, decoder, or configuration loader can report.
///
/// Failures are deterministic for a given input and are never retried.
#[derive(Debug, thiserror::Error)]
pub enum AppConfigError {
    /// The endpoint is not an `https://` URL, or `endpoint + path` does not parse.
    #[error("invalid endpoint: {0} (must be an https:// URL)")]
    InvalidEndpoint(String),

    /// The access key secret is not valid base64.
    #[error("secret is not valid base64: {0}")]
    InvalidSecret(String),

    /// The credential contains bytes that cannot be carried in an HTTP header value.
    #[error("credential contains characters not allowed in a header value")]
    InvalidCredential,

    /// Host environment defect (clock formatting, MAC construction, header encoding).
    #[error("internal error: {0}")]
    Internal(String),

    /// The response body is not JSON or does not match the `items` envelope.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Connection string or environment configuration problem.
    #[error("configuration error: {0}")]
    Config(String),
}

impl AppConfigError {
    /// Whether this error stems from caller-supplied configuration rather than
    /// the service or the host environment.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidEndpoint(_) | Self::InvalidSecret(_) | Self::InvalidCredential | Self::Config(_)
        )
    }
}

/// Convenience result type for App Configuration operations.
pub type AppConfigResult<T> = Result<T, AppConfigError>;
