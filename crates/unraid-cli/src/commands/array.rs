//! Storage array commands.

use std::io::Write;

use unraid_client::types::{ArrayDisk, ArrayInfo};
use unraid_client::Client;

use crate::cli::ArrayCommands;
use crate::commands::BULK_TIMEOUT;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::{format_bytes, Formatter};

const DISK_HEADERS: &[&str] = &["NAME", "DEVICE", "TYPE", "STATUS", "SIZE", "TEMP", "FS"];

/// Executes `array` subcommands.
pub struct ArrayCommand<'a> {
    client: &'a Client,
}

impl<'a> ArrayCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `array` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &ArrayCommands,
    ) -> Result<(), CliError> {
        match command {
            ArrayCommands::Status => self.status(writer, formatter).await,
            ArrayCommands::Start => {
                self.client.start_array(BULK_TIMEOUT).await?;
                formatter.write_success(writer, "Array started")
            }
            ArrayCommands::Stop => {
                self.client.stop_array(BULK_TIMEOUT).await?;
                formatter.write_success(writer, "Array stopped")
            }
        }
    }

    async fn status<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let array = self.client.array(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &array);
        }

        formatter.write_key_values(writer, &summary_pairs(&array))?;

        let disks = array.all_disks();
        if !disks.is_empty() {
            writeln!(writer)?;
            formatter.write_table(writer, DISK_HEADERS, &disk_rows(&disks))?;
        }
        Ok(())
    }
}

fn summary_pairs(array: &ArrayInfo) -> Vec<(&'static str, String)> {
    let total = kilobytes(&array.capacity.kilobytes.total);
    let used = kilobytes(&array.capacity.kilobytes.used);
    let free = kilobytes(&array.capacity.kilobytes.free);

    let used_text = if total > 0 {
        let percent = used as f64 / total as f64 * 100.0;
        format!(
            "{} ({})",
            format_bytes(used),
            color::percentage(percent, false)
        )
    } else {
        format_bytes(used)
    };

    vec![
        ("State", color::state(&array.state)),
        ("Total", format_bytes(total)),
        ("Used", used_text),
        ("Free", format_bytes(free)),
    ]
}

fn disk_rows(disks: &[&ArrayDisk]) -> Vec<Vec<String>> {
    disks
        .iter()
        .map(|d| {
            vec![
                d.name.clone(),
                d.device.clone(),
                d.disk_type.clone(),
                color::state(&d.status),
                format_bytes(kb_to_bytes(d.size)),
                disk_temperature(d.temperature),
                d.fs_type.clone(),
            ]
        })
        .collect()
}

fn disk_temperature(temp: i64) -> String {
    if temp == 0 {
        return "N/A".to_string();
    }
    color::temperature(temp as f64)
}

// Capacity counts arrive as decimal strings of kilobytes.
fn kilobytes(text: &str) -> u64 {
    kb_to_bytes(text.parse::<i64>().unwrap_or(0))
}

fn kb_to_bytes(kb: i64) -> u64 {
    u64::try_from(kb).unwrap_or(0) * 1024
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;
    use unraid_client::types::{ArrayCapacity, CapacityKilobytes};

    #[test]
    fn summary_scales_kilobyte_strings() {
        let array = ArrayInfo {
            state: "STARTED".into(),
            capacity: ArrayCapacity {
                kilobytes: CapacityKilobytes {
                    total: "1048576".into(),
                    used: "524288".into(),
                    free: "524288".into(),
                },
            },
            ..Default::default()
        };

        let pairs = summary_pairs(&array);
        assert_eq!(strip_ansi(&pairs[0].1), "STARTED");
        assert_eq!(pairs[1].1, "1.0 GiB");
        assert_eq!(strip_ansi(&pairs[2].1), "512.0 MiB (50.0%)");
        assert_eq!(pairs[3].1, "512.0 MiB");
    }

    #[test]
    fn unparseable_capacity_reads_as_zero() {
        let array = ArrayInfo::default();
        let pairs = summary_pairs(&array);
        assert_eq!(pairs[1].1, "0 B");
        assert_eq!(pairs[2].1, "0 B");
    }

    #[test]
    fn disk_rows_format_size_and_temperature() {
        let disk = ArrayDisk {
            name: "disk1".into(),
            device: "sdb".into(),
            status: "DISK_OK".into(),
            size: 1_048_576,
            temperature: 34,
            disk_type: "Data".into(),
            fs_type: "xfs".into(),
            ..Default::default()
        };
        let cold = ArrayDisk {
            name: "flash".into(),
            temperature: 0,
            ..Default::default()
        };

        let rows = disk_rows(&[&disk, &cold]);
        assert_eq!(rows[0][4], "1.0 GiB");
        assert_eq!(strip_ansi(&rows[0][5]), "34.0°C");
        assert_eq!(rows[1][5], "N/A");
    }
}
