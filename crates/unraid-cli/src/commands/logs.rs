//! Server log file commands.

use std::io::Write;

use unraid_client::types::{LogFile, LogFileContent};
use unraid_client::Client;

use crate::cli::LogCommands;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::format::{format_bytes, Formatter};

const HEADERS: &[&str] = &["NAME", "SIZE", "MODIFIED", "PATH"];

/// Executes `logs` subcommands.
pub struct LogsCommand<'a> {
    client: &'a Client,
}

impl<'a> LogsCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `logs` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &LogCommands,
    ) -> Result<(), CliError> {
        match command {
            LogCommands::Ls => self.list(writer, formatter).await,
            LogCommands::View { path, lines, tail } => {
                self.view(writer, formatter, path, *lines, *tail).await
            }
            LogCommands::Tail { path, lines } => {
                self.view(writer, formatter, path, *lines, true).await
            }
        }
    }

    async fn list<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let files = self.client.log_files(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &files);
        }
        if files.is_empty() {
            writeln!(writer, "No log files found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HEADERS, &file_rows(&files))
    }

    async fn view<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        path: &str,
        lines: i64,
        tail: bool,
    ) -> Result<(), CliError> {
        let content = if tail {
            // The server windows from a start line, so tailing needs the
            // total line count first.
            let probe = self.client.log_file(path, Some(1), None, DEFAULT_TIMEOUT).await?;
            let start = (probe.total_lines - lines + 1).max(1);
            self.client
                .log_file(path, Some(lines), Some(start), DEFAULT_TIMEOUT)
                .await?
        } else {
            self.client
                .log_file(path, Some(lines), None, DEFAULT_TIMEOUT)
                .await?
        };

        if formatter.mode().is_structured() {
            return formatter.write(writer, &content);
        }

        writeln!(writer, "{}", window_banner(&content))?;
        write!(writer, "{}", content.content)?;
        if !content.content.ends_with('\n') {
            writeln!(writer)?;
        }
        Ok(())
    }
}

fn file_rows(files: &[LogFile]) -> Vec<Vec<String>> {
    files
        .iter()
        .map(|f| {
            vec![
                f.name.clone(),
                format_bytes(u64::try_from(f.size).unwrap_or(0)),
                f.modified_at.clone(),
                f.path.clone(),
            ]
        })
        .collect()
}

fn window_banner(content: &LogFileContent) -> String {
    let shown = content.content.lines().count() as i64;
    let first = content.start_line.max(1);
    let last = first + shown.saturating_sub(1).max(0);
    format!(
        "== {} (lines {first}-{last} of {}) ==",
        content.path, content.total_lines
    )
}
