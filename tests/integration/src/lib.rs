//! End-to-end tests for the App Configuration client.
//!
//! These chain settings, signing, verification, and decoding together the
//! way an application would, with an in-process stand-in for the service in
//! place of a network call.

use std::sync::Once;

use azconfig_auth::{AuthError, hash_payload, verify_request};
use azconfig_model::{ConfigEntry, KvResponse};

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Connection string used across the tests.
pub const TEST_CONNECTION_STRING: &str =
    "Endpoint=https://myconfig.azconfig.io;Id=abc;Secret=c2VjcmV0LWtleS1ieXRlcw==";

/// A minimal stand-in for the service: checks the signature and answers
/// with a fixed set of records.
#[derive(Debug)]
pub struct FakeStore {
    secret: String,
    entries: Vec<ConfigEntry>,
}

impl FakeStore {
    /// Create a store that accepts requests signed with `secret`.
    #[must_use]
    pub fn new(secret: &str, entries: &[(&str, &str)]) -> Self {
        Self {
            secret: secret.to_owned(),
            entries: entries
                .iter()
                .map(|(key, value)| ConfigEntry {
                    key: (*key).to_owned(),
                    value: (*value).to_owned(),
                })
                .collect(),
        }
    }

    /// Serve one request, returning the JSON body the real service would send.
    pub fn handle(&self, request: &http::Request<()>) -> anyhow::Result<Vec<u8>> {
        let (parts, ()) = clone_request(request).into_parts();
        let verified = verify_request(&parts, &hash_payload(b""), &self.secret)?;
        tracing::debug!(credential = %verified.credential, "Fake store accepted request");

        let response = KvResponse {
            items: self.entries.clone(),
        };
        let mut body = serde_json::to_value(&response)?;
        // Real responses carry metadata the client ignores.
        if let Some(items) = body["items"].as_array_mut() {
            for item in items {
                item["etag"] = serde_json::json!("JPyzoVkUx8F4ighi4WDdmP9gFT5");
                item["label"] = serde_json::Value::Null;
                item["locked"] = serde_json::json!(false);
            }
        }
        Ok(body.to_string().into_bytes())
    }

    /// Whether a failed [`FakeStore::handle`] was an authentication rejection.
    #[must_use]
    pub fn is_rejection(err: &anyhow::Error) -> bool {
        matches!(
            err.downcast_ref::<AuthError>(),
            Some(AuthError::SignatureDoesNotMatch)
        )
    }
}

fn clone_request(request: &http::Request<()>) -> http::Request<()> {
    let mut copy = http::Request::new(());
    *copy.method_mut() = request.method().clone();
    *copy.uri_mut() = request.uri().clone();
    *copy.headers_mut() = request.headers().clone();
    copy
}

mod test_config;
mod test_roundtrip;
