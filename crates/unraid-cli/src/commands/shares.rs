//! User share commands.

use std::io::Write;

use unraid_client::types::Share;
use unraid_client::Client;

use crate::cli::SharesCommands;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::{format_bool, format_bytes, Formatter};

const HEADERS: &[&str] = &["NAME", "SIZE", "USED", "FREE", "FREE%", "CACHE", "COMMENT"];

/// Executes `shares` subcommands.
pub struct SharesCommand<'a> {
    client: &'a Client,
}

impl<'a> SharesCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `shares` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &SharesCommands,
    ) -> Result<(), CliError> {
        match command {
            SharesCommands::Ls => self.list(writer, formatter).await,
            SharesCommands::Info { name } => self.info(writer, formatter, name).await,
        }
    }

    async fn list<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let shares = self.client.shares(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &shares);
        }
        if shares.is_empty() {
            writeln!(writer, "No shares found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HEADERS, &share_rows(&shares))
    }

    async fn info<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        name: &str,
    ) -> Result<(), CliError> {
        let shares = self.client.shares(DEFAULT_TIMEOUT).await?;
        let share = shares
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| CliError::Command(format!("share not found: {name}")))?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, share);
        }
        formatter.write_key_values(writer, &info_pairs(share))
    }
}

fn share_rows(shares: &[Share]) -> Vec<Vec<String>> {
    shares
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                format_bytes(kb_to_bytes(s.size)),
                format_bytes(kb_to_bytes(s.used)),
                format_bytes(kb_to_bytes(s.free)),
                free_percent(s),
                format_bool(s.cache),
                s.comment.clone(),
            ]
        })
        .collect()
}

fn info_pairs(share: &Share) -> Vec<(&'static str, String)> {
    vec![
        ("Name", share.name.clone()),
        ("Size", format_bytes(kb_to_bytes(share.size))),
        ("Used", format_bytes(kb_to_bytes(share.used))),
        ("Free", format_bytes(kb_to_bytes(share.free))),
        ("Free%", free_percent(share)),
        ("Cache", format_bool(share.cache)),
        ("Include", disk_list(&share.include, "all")),
        ("Exclude", disk_list(&share.exclude, "none")),
        ("Comment", share.comment.clone()),
    ]
}

// Free space is high-is-good, so the reverse thresholds apply.
fn free_percent(share: &Share) -> String {
    if share.size <= 0 {
        return "N/A".to_string();
    }
    let percent = share.free as f64 / share.size as f64 * 100.0;
    color::percentage(percent, true)
}

fn disk_list(disks: &[String], when_empty: &str) -> String {
    if disks.is_empty() {
        when_empty.to_string()
    } else {
        disks.join(", ")
    }
}

fn kb_to_bytes(kb: i64) -> u64 {
    u64::try_from(kb).unwrap_or(0) * 1024
}
