//! Key-value wire types and response decoding for App Configuration.
//!
//! A `GET /kv` response is an envelope of records:
//!
//! ```json
//! { "items": [ { "key": "foo", "value": "bar", "etag": "...", "label": null } ] }
//! ```
//!
//! Only `key` and `value` are consumed. [`decode_response`] flattens the
//! records into a [`ConfigMap`] where later duplicates win.

pub mod decode;
pub mod types;

pub use decode::{decode_entries, decode_response};
pub use types::{ConfigEntry, ConfigMap, KvResponse};
