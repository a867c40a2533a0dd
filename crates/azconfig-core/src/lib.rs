//! Core types, error taxonomy, and configuration for the App Configuration client.
//!
//! This crate provides the building blocks shared by the signing and decoding
//! crates: the [`AppConfigError`] taxonomy, the validated [`Endpoint`] and
//! [`AccessKey`] input types, and [`AppConfigSettings`] for loading them from a
//! connection string or the process environment.

mod config;
mod error;
mod types;

pub use config::{AppConfigSettings, ConnectionString};
pub use error::{AppConfigError, AppConfigResult};
pub use types::{AccessKey, Endpoint, HTTPS_PREFIX};
