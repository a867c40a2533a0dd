//! Configuration for App Configuration clients.
//!
//! Settings come either from the service's native connection string
//! (`Endpoint=https://...;Id=...;Secret=...`) or from individual environment
//! variables. The signer and decoder never read the environment themselves;
//! these helpers exist for the application code that wires them up.

use std::str::FromStr;

use serde::Deserialize;
use tracing::debug;
use typed_builder::TypedBuilder;

use crate::error::{AppConfigError, AppConfigResult};
use crate::types::{AccessKey, Endpoint};

/// Environment variable holding a full connection string.
pub const CONNECTION_STRING_VAR: &str = "AZCONFIG_CONNECTION_STRING";
/// Environment variable holding the store endpoint.
pub const ENDPOINT_VAR: &str = "AZCONFIG_ENDPOINT";
/// Environment variable holding the credential id.
pub const CREDENTIAL_VAR: &str = "AZCONFIG_CREDENTIAL";
/// Environment variable holding the base64 secret.
pub const SECRET_VAR: &str = "AZCONFIG_SECRET";
/// Environment variable holding the log level filter.
pub const LOG_LEVEL_VAR: &str = "LOG_LEVEL";

const DEFAULT_LOG_LEVEL: &str = "info";

/// A parsed connection string.
///
/// Segments are separated by `;` and split on the first `=`, so base64
/// padding in the secret survives. Keys are case-sensitive, unknown keys are
/// ignored, and `Endpoint`, `Id`, and `Secret` are all required.
///
/// # Examples
///
/// ```
/// use azconfig_core::ConnectionString;
///
/// let parsed: ConnectionString = "Endpoint=https://myconfig.azconfig.io;Id=abc;Secret=Zm9v"
///     .parse()
///     .unwrap();
/// assert_eq!(parsed.endpoint().host(), "myconfig.azconfig.io");
/// assert_eq!(parsed.access_key().credential(), "abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    endpoint: Endpoint,
    access_key: AccessKey,
}

impl ConnectionString {
    /// The store endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// The access key.
    #[must_use]
    pub fn access_key(&self) -> &AccessKey {
        &self.access_key
    }

    /// Split into the endpoint and access key.
    #[must_use]
    pub fn into_parts(self) -> (Endpoint, AccessKey) {
        (self.endpoint, self.access_key)
    }
}

impl FromStr for ConnectionString {
    type Err = AppConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut endpoint = None;
        let mut credential = None;
        let mut secret = None;

        let segments = s.split(';').map(str::trim).filter(|seg| !seg.is_empty());
        for (index, segment) in segments.enumerate() {
            // Never echo the segment itself: it may be the secret.
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                AppConfigError::Config(format!("connection string segment {index} has no '='"))
            })?;
            match key {
                "Endpoint" => endpoint = Some(value),
                "Id" => credential = Some(value),
                "Secret" => secret = Some(value),
                other => debug!(key = other, "Ignoring unknown connection string segment"),
            }
        }

        let missing = |name: &str| AppConfigError::Config(format!("connection string is missing {name}"));
        let endpoint = Endpoint::new(endpoint.ok_or_else(|| missing("Endpoint"))?)?;
        let credential = credential.ok_or_else(|| missing("Id"))?;
        let secret = secret.ok_or_else(|| missing("Secret"))?;

        Ok(Self {
            endpoint,
            access_key: AccessKey::new(credential, secret),
        })
    }
}

/// Settings for talking to one configuration store.
///
/// # Examples
///
/// ```
/// use azconfig_core::{AccessKey, AppConfigSettings, Endpoint};
///
/// let settings = AppConfigSettings::builder()
///     .endpoint(Endpoint::new("https://myconfig.azconfig.io").unwrap())
///     .access_key(AccessKey::new("abc", "Zm9v"))
///     .build();
/// assert_eq!(settings.log_level, "info");
/// ```
#[derive(Debug, Clone, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct AppConfigSettings {
    /// Base URL of the configuration store.
    pub endpoint: Endpoint,

    /// Credential id and base64 secret used to sign requests.
    pub access_key: AccessKey,

    /// Log level filter string (e.g. `"info"`, `"debug"`).
    #[builder(default = String::from(DEFAULT_LOG_LEVEL))]
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_owned()
}

impl AppConfigSettings {
    /// Build settings from a connection string.
    ///
    /// # Errors
    /// Returns [`AppConfigError::Config`] for a malformed or incomplete string and
    /// [`AppConfigError::InvalidEndpoint`] when the endpoint is not `https://`.
    pub fn from_connection_string(connection_string: &str) -> AppConfigResult<Self> {
        let (endpoint, access_key) = connection_string.parse::<ConnectionString>()?.into_parts();
        Ok(Self::builder()
            .endpoint(endpoint)
            .access_key(access_key)
            .build())
    }

    /// Load settings from the process environment.
    ///
    /// `AZCONFIG_CONNECTION_STRING` wins when set; otherwise `AZCONFIG_ENDPOINT`,
    /// `AZCONFIG_CREDENTIAL`, and `AZCONFIG_SECRET` are all required.
    ///
    /// # Errors
    /// See [`AppConfigSettings::from_lookup`].
    pub fn from_env() -> AppConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns [`AppConfigError::Config`] when required variables are missing or the
    /// connection string is malformed, and [`AppConfigError::InvalidEndpoint`] when
    /// the endpoint is not `https://`.
    pub fn from_lookup<F>(lookup: F) -> AppConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let log_level = lookup(LOG_LEVEL_VAR).unwrap_or_else(default_log_level);

        if let Some(connection_string) = lookup(CONNECTION_STRING_VAR) {
            debug!("Loading App Configuration settings from connection string");
            let mut settings = Self::from_connection_string(&connection_string)?;
            settings.log_level = log_level;
            return Ok(settings);
        }

        let require = |name: &str| {
            lookup(name)
                .ok_or_else(|| AppConfigError::Config(format!("environment variable {name} is not set")))
        };
        let endpoint = Endpoint::new(require(ENDPOINT_VAR)?)?;
        let access_key = AccessKey::new(require(CREDENTIAL_VAR)?, require(SECRET_VAR)?);

        Ok(Self {
            endpoint,
            access_key,
            log_level,
        })
    }
}
