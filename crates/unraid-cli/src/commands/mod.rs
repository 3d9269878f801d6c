//! Command implementations.
//!
//! Each module owns one top-level command: it fetches through the shared
//! [`unraid_client::Client`] with an explicit timeout and emits results
//! through the [`crate::output::format::Formatter`].

use std::time::Duration;

pub mod array;
pub mod config;
pub mod docker;
pub mod health;
pub mod logs;
pub mod metrics;
pub mod notifications;
pub mod parity;
pub mod plugin;
pub mod server;
pub mod shares;
pub mod vm;

pub use array::ArrayCommand;
pub use config::ConfigCommand;
pub use docker::DockerCommand;
pub use health::HealthCommand;
pub use logs::LogsCommand;
pub use metrics::MetricsCommand;
pub use notifications::NotificationsCommand;
pub use parity::ParityCommand;
pub use plugin::PluginCommand;
pub use server::ServerCommand;
pub use shares::SharesCommand;
pub use vm::VmCommand;

/// Timeout for ordinary queries and mutations.
pub(crate) const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for bulk operations and array state changes.
pub(crate) const BULK_TIMEOUT: Duration = Duration::from_secs(60);

/// Timeout for cheap liveness and metrics queries.
pub(crate) const QUICK_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for plugin installation, which downloads packages server-side.
pub(crate) const PLUGIN_INSTALL_TIMEOUT: Duration = Duration::from_secs(120);
