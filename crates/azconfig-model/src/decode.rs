//! Decoding of raw response bodies.

use azconfig_core::{AppConfigError, AppConfigResult};
use tracing::debug;

use crate::types::{ConfigEntry, ConfigMap, KvResponse};

/// Decode a response body into a [`ConfigMap`].
///
/// Unknown fields in the envelope or in items are ignored. An empty `items`
/// array yields an empty map.
///
/// # Errors
///
/// Returns [`AppConfigError::MalformedResponse`] when the body is empty, not
/// JSON, or lacks an `items` array of objects with string `key` and `value`.
///
/// # Examples
///
/// ```
/// use azconfig_model::decode_response;
///
/// let map = decode_response(br#"{"items":[{"key":"foo","value":"bar","locked":false}]}"#).unwrap();
/// assert_eq!(map.get("foo").map(String::as_str), Some("bar"));
/// ```
pub fn decode_response(body: &[u8]) -> AppConfigResult<ConfigMap> {
    let response = parse(body)?;
    Ok(response.into_config_map())
}

/// Decode a response body into its records, in wire order.
///
/// # Errors
///
/// Same as [`decode_response`].
pub fn decode_entries(body: &[u8]) -> AppConfigResult<Vec<ConfigEntry>> {
    Ok(parse(body)?.items)
}

fn parse(body: &[u8]) -> AppConfigResult<KvResponse> {
    let response: KvResponse = serde_json::from_slice(body)
        .map_err(|e| AppConfigError::MalformedResponse(e.to_string()))?;
    debug!(items = response.items.len(), "Decoded key-value response");
    Ok(response)
}
