//! HMAC-SHA256 request signing for App Configuration.
//!
//! This crate prepares authenticated `GET /kv` requests for an App
//! Configuration store. Every request carries three headers:
//!
//! - `Date`: the ISO-8601 UTC signing time
//! - `x-ms-content-sha256`: base64 SHA-256 of the (empty) body
//! - `Authorization`: `HMAC-SHA256 Credential=..&SignedHeaders=..&Signature=..`
//!
//! The signature is a base64 HMAC-SHA256, keyed by the base64-decoded secret,
//! over the canonical string:
//!
//! ```text
//! GET\n
//! <path-and-query>\n
//! <date>;<host>;<content-hash>
//! ```
//!
//! No network I/O happens here. The returned [`RequestDescriptor`] is handed to
//! whatever HTTP transport the caller uses.
//!
//! # Usage
//!
//! ```rust
//! use azconfig_auth::prepare_request;
//!
//! let request = prepare_request("https://myconfig.azconfig.io", "Zm9v", "my-credential").unwrap();
//! assert_eq!(request.url(), "https://myconfig.azconfig.io/kv?api-version=1");
//! assert!(request.header("Authorization").unwrap().starts_with("HMAC-SHA256 Credential=my-credential"));
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical string-to-sign and `Authorization` header construction
//! - [`error`] - Verification error types
//! - [`request`] - The prepared request descriptor
//! - [`signer`] - Request preparation and signature computation
//! - [`verify`] - Server-side verification of signed requests

pub mod canonical;
pub mod error;
pub mod request;
pub mod signer;
pub mod verify;

pub use error::AuthError;
pub use request::RequestDescriptor;
pub use signer::{RequestSigner, compute_signature, hash_payload, prepare_request, prepare_request_at};
pub use verify::{VerifiedRequest, parse_authorization_header, verify_request};
