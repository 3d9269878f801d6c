//! # unraid-cli
//!
//! Command-line interface for managing Unraid servers.
//!
//! Provides commands for:
//! - Array, parity, and disk monitoring
//! - Docker container and VM lifecycle control
//! - Shares, metrics, notifications, logs, and plugins
//! - Multi-server profile configuration
//!
//! # Architecture
//!
//! The CLI talks to the Unraid management API over GraphQL via the
//! [`unraid_client::Client`]. Server profiles live in
//! `~/.unraidcli/config.yaml`; every invocation resolves one profile, builds
//! a client, and hands off to a command executor in [`commands`].
//!
//! ```text
//! ┌────────────┐     GraphQL/HTTP      ┌────────────────┐
//! │  unraidcli │◄─────────────────────►│  Unraid server │
//! └────────────┘     (x-api-key)       └────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, FormatArg};
pub use config::Config;
pub use error::CliError;
