//! Parity check commands.

use std::io::Write;

use unraid_client::types::ParityCheck;
use unraid_client::Client;

use crate::cli::ParityCommands;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::{format_bool, format_duration, Formatter};

const HISTORY_HEADERS: &[&str] = &["DATE", "DURATION", "SPEED", "STATUS", "ERRORS"];

/// Executes `parity` subcommands.
pub struct ParityCommand<'a> {
    client: &'a Client,
}

impl<'a> ParityCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `parity` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &ParityCommands,
    ) -> Result<(), CliError> {
        match command {
            ParityCommands::Status => self.status(writer, formatter).await,
            ParityCommands::History => self.history(writer, formatter).await,
            ParityCommands::Start { correct } => {
                self.client
                    .start_parity_check(*correct, DEFAULT_TIMEOUT)
                    .await?;
                let message = if *correct {
                    "Parity check started (correcting)"
                } else {
                    "Parity check started"
                };
                formatter.write_success(writer, message)
            }
            ParityCommands::Pause => {
                self.client.pause_parity_check(DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, "Parity check paused")
            }
            ParityCommands::Resume => {
                self.client.resume_parity_check(DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, "Parity check resumed")
            }
            ParityCommands::Cancel => {
                self.client.cancel_parity_check(DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, "Parity check cancelled")
            }
        }
    }

    async fn status<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let check = self.client.parity_status(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &check);
        }

        if !check.running && check.date.is_empty() {
            writeln!(writer, "No parity check has been run.")?;
            return Ok(());
        }
        formatter.write_key_values(writer, &status_pairs(&check))
    }

    async fn history<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
    ) -> Result<(), CliError> {
        let history = self.client.parity_history(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &history);
        }
        if history.is_empty() {
            writeln!(writer, "No parity check history found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HISTORY_HEADERS, &history_rows(&history))
    }
}

fn status_pairs(check: &ParityCheck) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("Running", format_bool(check.running)),
        ("Status", color::state(&check.status)),
    ];
    if check.running {
        pairs.push((
            "Progress",
            color::percentage(check.progress as f64, false),
        ));
        pairs.push(("Correcting", format_bool(check.correcting)));
        pairs.push(("Paused", format_bool(check.paused)));
    }
    pairs.push(("Date", check.date.clone()));
    pairs.push((
        "Duration",
        format_duration(u64::try_from(check.duration).unwrap_or(0)),
    ));
    pairs.push(("Speed", check.speed.clone()));
    pairs.push(("Errors", errors_cell(check.errors)));
    pairs
}

fn history_rows(history: &[ParityCheck]) -> Vec<Vec<String>> {
    history
        .iter()
        .map(|check| {
            vec![
                check.date.clone(),
                format_duration(u64::try_from(check.duration).unwrap_or(0)),
                check.speed.clone(),
                color::state(&check.status),
                errors_cell(check.errors),
            ]
        })
        .collect()
}

fn errors_cell(errors: i64) -> String {
    if errors > 0 {
        color::red(&errors.to_string())
    } else {
        errors.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;

    #[test]
    fn running_check_includes_progress() {
        let check = ParityCheck {
            date: "2025-11-01".into(),
            duration: 3725,
            speed: "110.2 MB/s".into(),
            status: "OK".into(),
            errors: 0,
            progress: 42,
            running: true,
            ..Default::default()
        };

        let pairs = status_pairs(&check);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert!(keys.contains(&"Progress"));
        let progress = &pairs.iter().find(|(k, _)| *k == "Progress").unwrap().1;
        assert_eq!(strip_ansi(progress), "42.0%");
    }

    #[test]
    fn finished_check_omits_progress() {
        let check = ParityCheck {
            date: "2025-11-01".into(),
            duration: 36_000,
            status: "OK".into(),
            ..Default::default()
        };

        let pairs = status_pairs(&check);
        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert!(!keys.contains(&"Progress"));
        let duration = &pairs.iter().find(|(k, _)| *k == "Duration").unwrap().1;
        assert_eq!(duration, "10h0m0s");
    }

    #[test]
    fn history_rows_flag_errors_in_red() {
        let history = vec![
            ParityCheck {
                date: "2025-10-01".into(),
                errors: 0,
                ..Default::default()
            },
            ParityCheck {
                date: "2025-11-01".into(),
                errors: 3,
                ..Default::default()
            },
        ];

        let rows = history_rows(&history);
        assert_eq!(rows[0][4], "0");
        assert_eq!(strip_ansi(&rows[1][4]), "3");
    }
}
