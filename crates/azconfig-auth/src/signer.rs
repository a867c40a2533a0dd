//! Request preparation and HMAC-SHA256 signing.
//!
//! [`prepare_request_at`] is the whole protocol:
//!
//! 1. Compose `endpoint + /kv?api-version=1`; the endpoint must be `https://`
//!    and the result must parse as a URI.
//! 2. Format the signing time as the `Date` header.
//! 3. Hash the empty body into `x-ms-content-sha256`.
//! 4. Derive `host` (endpoint minus scheme) and the path (URL minus endpoint).
//! 5. Build the string to sign and HMAC it with the base64-decoded secret.
//! 6. Assemble the `Authorization` header.
//!
//! Every failure is returned before anything is produced.

use azconfig_core::{
    AccessKey, AppConfigError, AppConfigResult, AppConfigSettings, ConnectionString, Endpoint,
    HTTPS_PREFIX,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use http::header::{AUTHORIZATION, DATE, HeaderName};
use http::{HeaderMap, HeaderValue, Uri};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::canonical::{
    CONTENT_SHA256_HEADER, KV_PATH, build_authorization_header, build_string_to_sign,
    format_timestamp,
};
use crate::request::RequestDescriptor;

type HmacSha256 = Hmac<Sha256>;

/// Compute the SHA-256 of a request body and return it base64-encoded.
///
/// # Examples
///
/// ```
/// use azconfig_auth::hash_payload;
///
/// // SHA-256 of the empty body
/// assert_eq!(hash_payload(b""), "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8]) -> String {
    BASE64.encode(Sha256::digest(payload))
}

/// Decode a base64 secret into raw key bytes.
///
/// # Errors
///
/// Returns [`AppConfigError::InvalidSecret`] for a bad alphabet, length, or padding.
pub fn decode_secret(secret: &str) -> AppConfigResult<Vec<u8>> {
    BASE64
        .decode(secret)
        .map_err(|e| AppConfigError::InvalidSecret(e.to_string()))
}

/// Compute the base64 HMAC-SHA256 of `data` keyed by `key`.
///
/// # Errors
///
/// Returns [`AppConfigError::Internal`] if the MAC rejects the key. HMAC accepts
/// keys of any length, so this does not happen in practice.
pub fn compute_signature(key: &[u8], data: &[u8]) -> AppConfigResult<String> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| AppConfigError::Internal("HMAC rejected the signing key".to_owned()))?;
    mac.update(data);
    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

/// Prepare a signed `GET /kv` request using the current time.
///
/// # Errors
///
/// See [`prepare_request_at`].
pub fn prepare_request(
    endpoint: &str,
    secret: &str,
    credential: &str,
) -> AppConfigResult<RequestDescriptor> {
    prepare_request_at(endpoint, secret, credential, Utc::now())
}

/// Prepare a signed `GET /kv` request for a given signing time.
///
/// # Errors
///
/// - [`AppConfigError::InvalidEndpoint`] if the endpoint is not `https://`, carries
///   a query or fragment, or the composed URL does not parse. Checked before any
///   hashing.
/// - [`AppConfigError::InvalidSecret`] if the secret is not valid base64.
/// - [`AppConfigError::InvalidCredential`] if the credential is not visible
///   ASCII (control characters or non-ASCII bytes).
/// - [`AppConfigError::Internal`] for host-environment failures.
pub fn prepare_request_at(
    endpoint: &str,
    secret: &str,
    credential: &str,
    timestamp: DateTime<Utc>,
) -> AppConfigResult<RequestDescriptor> {
    let url = format!("{endpoint}{KV_PATH}");
    let Some(host) = endpoint.strip_prefix(HTTPS_PREFIX) else {
        return Err(AppConfigError::InvalidEndpoint(endpoint.to_owned()));
    };
    // A query or fragment in the endpoint would swallow the appended path.
    if host.contains(['?', '#']) {
        return Err(AppConfigError::InvalidEndpoint(endpoint.to_owned()));
    }
    let uri: Uri = url
        .parse()
        .map_err(|_| AppConfigError::InvalidEndpoint(endpoint.to_owned()))?;
    if uri.host().is_none_or(str::is_empty) {
        return Err(AppConfigError::InvalidEndpoint(endpoint.to_owned()));
    }

    let date = format_timestamp(timestamp)?;
    let content_hash = hash_payload(b"");
    let path = url.strip_prefix(endpoint).unwrap_or(KV_PATH);

    debug!(endpoint, host, path, date = %date, "Preparing App Configuration request");

    let string_to_sign = build_string_to_sign(path, &date, host, &content_hash);

    debug!(string_to_sign, "Built string to sign");

    let key = decode_secret(secret)?;
    let signature = compute_signature(&key, string_to_sign.as_bytes())?;
    drop(key);

    let authorization = build_authorization_header(credential, &signature);

    let mut headers = HeaderMap::with_capacity(3);
    headers.insert(DATE, header_value(&date)?);
    headers.insert(
        HeaderName::from_static(CONTENT_SHA256_HEADER),
        header_value(&content_hash)?,
    );
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&authorization).map_err(|_| AppConfigError::InvalidCredential)?,
    );

    Ok(RequestDescriptor::new(url, uri, headers))
}

/// Values we generate ourselves are always visible ASCII.
fn header_value(value: &str) -> AppConfigResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| AppConfigError::Internal(format!("generated header value is not ASCII: {value}")))
}

/// Signs requests for one configuration store.
///
/// # Examples
///
/// ```
/// use azconfig_auth::RequestSigner;
///
/// let signer = RequestSigner::from_connection_string(
///     "Endpoint=https://myconfig.azconfig.io;Id=abc;Secret=Zm9v",
/// )
/// .unwrap();
/// let request = signer.prepare().unwrap();
/// assert_eq!(request.method(), http::Method::GET);
/// ```
#[derive(Debug, Clone)]
pub struct RequestSigner {
    endpoint: Endpoint,
    access_key: AccessKey,
}

impl RequestSigner {
    /// Create a signer for the given store and access key.
    #[must_use]
    pub fn new(endpoint: Endpoint, access_key: AccessKey) -> Self {
        Self {
            endpoint,
            access_key,
        }
    }

    /// Create a signer from loaded settings.
    #[must_use]
    pub fn from_settings(settings: &AppConfigSettings) -> Self {
        Self::new(settings.endpoint.clone(), settings.access_key.clone())
    }

    /// Create a signer from an `Endpoint=..;Id=..;Secret=..` connection string.
    ///
    /// # Errors
    ///
    /// Returns the connection string's parse error.
    pub fn from_connection_string(connection_string: &str) -> AppConfigResult<Self> {
        let (endpoint, access_key) = connection_string.parse::<ConnectionString>()?.into_parts();
        Ok(Self::new(endpoint, access_key))
    }

    /// The store this signer targets.
    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Prepare a signed request using the current time.
    ///
    /// # Errors
    ///
    /// See [`prepare_request_at`].
    pub fn prepare(&self) -> AppConfigResult<RequestDescriptor> {
        self.prepare_at(Utc::now())
    }

    /// Prepare a signed request for a given signing time.
    ///
    /// # Errors
    ///
    /// See [`prepare_request_at`].
    pub fn prepare_at(&self, timestamp: DateTime<Utc>) -> AppConfigResult<RequestDescriptor> {
        prepare_request_at(
            self.endpoint.as_str(),
            self.access_key.secret(),
            self.access_key.credential(),
            timestamp,
        )
    }
}
