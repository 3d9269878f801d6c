//! Server information commands.

use std::io::Write;

use unraid_client::types::SystemInfo;
use unraid_client::Client;

use crate::cli::ServerCommands;
use crate::commands::{DEFAULT_TIMEOUT, QUICK_TIMEOUT};
use crate::error::CliError;
use crate::output::format::{format_bytes, Formatter};

/// Executes `server` subcommands.
pub struct ServerCommand<'a> {
    client: &'a Client,
}

impl<'a> ServerCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `server` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &ServerCommands,
    ) -> Result<(), CliError> {
        match command {
            ServerCommands::Info => self.info(writer, formatter).await,
            ServerCommands::Status => self.status(writer, formatter).await,
        }
    }

    async fn info<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let info = self.client.system_info(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &info);
        }
        formatter.write_key_values(writer, &info_pairs(&info))
    }

    async fn status<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        self.client.test_connection(QUICK_TIMEOUT).await?;
        let info = self.client.system_info(DEFAULT_TIMEOUT).await?;

        formatter.write_success(
            writer,
            &format!(
                "Connected to {} (Unraid {})",
                info.os.hostname, info.versions.core.unraid
            ),
        )
    }
}

fn info_pairs(info: &SystemInfo) -> Vec<(&'static str, String)> {
    vec![
        ("Hostname", info.os.hostname.clone()),
        ("Platform", info.os.platform.clone()),
        ("Unraid", info.versions.core.unraid.clone()),
        ("Uptime", info.os.uptime.clone()),
        ("CPU", info.cpu.display_name().to_string()),
        (
            "Cores",
            format!("{} ({} threads)", info.cpu.cores, info.cpu.threads),
        ),
        ("Clock", format!("{:.2} GHz", info.cpu.speed)),
        (
            "Memory",
            format_bytes(u64::try_from(info.total_memory()).unwrap_or(0)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use unraid_client::types::{
        CoreVersions, CpuInfo, MemoryLayout, MemoryModule, OsInfo, Versions,
    };

    #[test]
    fn info_pairs_cover_hardware_and_os() {
        let info = SystemInfo {
            cpu: CpuInfo {
                manufacturer: "AMD".into(),
                brand: "AMD Ryzen 9 5950X".into(),
                cores: 16,
                threads: 32,
                speed: 3.4,
            },
            memory: MemoryLayout {
                layout: vec![MemoryModule {
                    size: 34_359_738_368,
                }],
            },
            os: OsInfo {
                platform: "linux".into(),
                hostname: "tower".into(),
                uptime: "up 12 days".into(),
            },
            versions: Versions {
                core: CoreVersions {
                    unraid: "7.0.0".into(),
                },
            },
        };

        let pairs = info_pairs(&info);
        assert_eq!(pairs[0].1, "tower");
        assert_eq!(pairs[2].1, "7.0.0");
        assert_eq!(pairs[4].1, "AMD Ryzen 9 5950X");
        assert_eq!(pairs[5].1, "16 (32 threads)");
        assert_eq!(pairs[6].1, "3.40 GHz");
        assert_eq!(pairs[7].1, "32.0 GiB");
    }
}
