//! # unraid-client
//!
//! Typed client for the Unraid management GraphQL API.
//!
//! The [`Client`] speaks GraphQL over HTTP with `x-api-key` authentication
//! and exposes one typed async method per server operation: system info,
//! array and parity control, Docker containers, VMs, shares, metrics,
//! notifications, log files, and plugins.
//!
//! Containers and VMs can be addressed by id, display name, or id prefix;
//! see [`resolve`] for the tier rules.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod resolve;
pub mod types;

pub use client::Client;
pub use error::ClientError;
pub use resolve::{resolve, Addressable, ResolveError};
