//! Validated input types shared by the signer and the configuration loader.

use std::fmt;

use serde::Deserialize;

use crate::error::{AppConfigError, AppConfigResult};

/// The only scheme the service accepts.
pub const HTTPS_PREFIX: &str = "https://";

/// Base URL of a configuration store, e.g. `https://myconfig.azconfig.io`.
///
/// The value is kept verbatim: the signer derives the signed `host` by
/// stripping the scheme, so a trailing slash or path is signed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Endpoint(String);

impl Endpoint {
    /// Create an endpoint, rejecting anything that is not an `https://` URL with a host.
    ///
    /// A query or fragment is rejected too, since the request path is appended
    /// to the endpoint verbatim.
    ///
    /// # Errors
    /// Returns [`AppConfigError::InvalidEndpoint`] when the scheme is missing, the host is
    /// empty, or the endpoint carries a query or fragment.
    ///
    /// # Examples
    ///
    /// ```
    /// use azconfig_core::Endpoint;
    ///
    /// let endpoint = Endpoint::new("https://myconfig.azconfig.io").unwrap();
    /// assert_eq!(endpoint.host(), "myconfig.azconfig.io");
    /// assert!(Endpoint::new("http://myconfig.azconfig.io").is_err());
    /// ```
    pub fn new(endpoint: impl Into<String>) -> AppConfigResult<Self> {
        let endpoint = endpoint.into();
        match endpoint.strip_prefix(HTTPS_PREFIX) {
            Some(host) if !host.is_empty() && !host.contains(['?', '#']) => Ok(Self(endpoint)),
            _ => Err(AppConfigError::InvalidEndpoint(endpoint)),
        }
    }

    /// The endpoint without its scheme.
    #[must_use]
    pub fn host(&self) -> &str {
        self.0.strip_prefix(HTTPS_PREFIX).unwrap_or(&self.0)
    }

    /// Get the endpoint as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Endpoint {
    type Error = AppConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An access key: the credential identifier and its base64-encoded secret.
///
/// The secret stays encoded here; it is only decoded for the duration of a
/// signing call. `Debug` output never includes it.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct AccessKey {
    credential: String,
    secret: String,
}

impl AccessKey {
    /// Create an access key from a credential id and a base64 secret.
    #[must_use]
    pub fn new(credential: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            secret: secret.into(),
        }
    }

    /// The credential identifier, sent verbatim in the `Authorization` header.
    #[must_use]
    pub fn credential(&self) -> &str {
        &self.credential
    }

    /// The base64-encoded secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessKey")
            .field("credential", &self.credential)
            .field("secret", &"<redacted>")
            .finish()
    }
}
