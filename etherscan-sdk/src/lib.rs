//! Etherscan.io API wrapper.
//!
//! The wire types, field normalisation and error types are always available.
//! The HTTP client lives behind the `client` cargo feature.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

#[cfg(feature = "client")]
pub mod client;
pub mod objects;
pub mod record;

#[cfg(feature = "client")]
pub use client::{Client, ClientBuilder, ClientError};
pub use objects::{Network, ParseError};
pub use record::{FieldValue, Record};
