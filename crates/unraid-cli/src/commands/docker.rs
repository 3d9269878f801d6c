//! Docker container commands.

use std::io::Write;
use std::time::Duration;

use unraid_client::types::Container;
use unraid_client::{resolve, Client};

use crate::cli::DockerCommands;
use crate::commands::{BULK_TIMEOUT, DEFAULT_TIMEOUT};
use crate::error::CliError;
use crate::output::format::{format_bool, Formatter};
use crate::output::{color, watch};

const LIST_HEADERS: &[&str] = &["ID", "NAME", "STATE", "STATUS", "IMAGE", "AUTOSTART"];
const STATS_HEADERS: &[&str] = &["NAME", "STATE", "STATUS"];

/// Executes `docker` subcommands.
pub struct DockerCommand<'a> {
    client: &'a Client,
}

impl<'a> DockerCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `docker` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &DockerCommands,
    ) -> Result<(), CliError> {
        match command {
            DockerCommands::Ls {
                state,
                watch,
                interval,
            } => {
                if *watch {
                    self.watch_list(formatter, state.as_deref(), false, *interval)
                        .await
                } else {
                    self.list(writer, formatter, state.as_deref(), false).await
                }
            }
            DockerCommands::Ps { watch, interval } => {
                if *watch {
                    self.watch_list(formatter, None, true, *interval).await
                } else {
                    self.list(writer, formatter, None, true).await
                }
            }
            DockerCommands::Start { container } => {
                self.client
                    .start_container(container, DEFAULT_TIMEOUT)
                    .await?;
                formatter.write_success(writer, &format!("Container '{container}' started"))
            }
            DockerCommands::Stop { container } => {
                self.client
                    .stop_container(container, DEFAULT_TIMEOUT)
                    .await?;
                formatter.write_success(writer, &format!("Container '{container}' stopped"))
            }
            DockerCommands::Restart { container } => {
                self.client
                    .restart_container(container, DEFAULT_TIMEOUT)
                    .await?;
                formatter.write_success(writer, &format!("Container '{container}' restarted"))
            }
            DockerCommands::StartAll { containers } => {
                self.bulk(writer, formatter, containers, true).await
            }
            DockerCommands::StopAll { containers } => {
                self.bulk(writer, formatter, containers, false).await
            }
            DockerCommands::Stats {
                containers,
                watch,
                interval,
            } => {
                if *watch {
                    self.watch_stats(formatter, containers, *interval).await
                } else {
                    self.stats(writer, formatter, containers).await
                }
            }
            DockerCommands::Logs { container } => self.logs(writer, formatter, container).await,
        }
    }

    async fn list<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        state: Option<&str>,
        running_only: bool,
    ) -> Result<(), CliError> {
        let containers = self.client.containers(DEFAULT_TIMEOUT).await?;
        let filtered = filter_containers(&containers, state, running_only);

        if formatter.mode().is_structured() {
            return formatter.write(writer, &filtered);
        }
        if filtered.is_empty() {
            writeln!(writer, "No containers found.")?;
            return Ok(());
        }
        formatter.write_table(writer, LIST_HEADERS, &container_rows(&filtered))
    }

    async fn watch_list(
        &self,
        formatter: Formatter,
        state: Option<&str>,
        running_only: bool,
        interval: u64,
    ) -> Result<(), CliError> {
        let cancel = watch::cancel_on_ctrl_c();
        let client = self.client;

        watch::run(&cancel, Duration::from_secs(interval.max(1)), move || {
            async move {
                let containers = client.containers(DEFAULT_TIMEOUT).await?;
                let filtered = filter_containers(&containers, state, running_only);

                let mut stdout = std::io::stdout().lock();
                if filtered.is_empty() {
                    writeln!(stdout, "No containers found.")?;
                } else {
                    formatter.write_table(&mut stdout, LIST_HEADERS, &container_rows(&filtered))?;
                }
                write_refresh_stamp(&mut stdout)
            }
        })
        .await
    }

    async fn bulk<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        tokens: &[String],
        start: bool,
    ) -> Result<(), CliError> {
        let verb = if start { "started" } else { "stopped" };
        let mut failed = 0usize;

        for token in tokens {
            let result = if start {
                self.client.start_container(token, BULK_TIMEOUT).await
            } else {
                self.client.stop_container(token, BULK_TIMEOUT).await
            };
            match result {
                Ok(()) => formatter.write_success(writer, &format!("Container '{token}' {verb}"))?,
                Err(e) => {
                    failed += 1;
                    formatter.write_error(writer, &format!("Container '{token}': {e}"))?;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Command(format!(
                "{failed} of {} containers failed",
                tokens.len()
            )));
        }
        Ok(())
    }

    async fn stats<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        tokens: &[String],
    ) -> Result<(), CliError> {
        let containers = self.client.containers(DEFAULT_TIMEOUT).await?;
        let selected = select_containers(&containers, tokens);

        if formatter.mode().is_structured() {
            return formatter.write(writer, &selected);
        }
        if selected.is_empty() {
            writeln!(writer, "No containers found.")?;
            return Ok(());
        }
        formatter.write_table(writer, STATS_HEADERS, &stats_rows(&selected))
    }

    async fn watch_stats(
        &self,
        formatter: Formatter,
        tokens: &[String],
        interval: u64,
    ) -> Result<(), CliError> {
        let cancel = watch::cancel_on_ctrl_c();
        let client = self.client;
        let tokens = &tokens[..];

        watch::run(&cancel, Duration::from_secs(interval.max(1)), move || {
            async move {
                let containers = client.containers(DEFAULT_TIMEOUT).await?;
                let selected = select_containers(&containers, tokens);

                let mut stdout = std::io::stdout().lock();
                if selected.is_empty() {
                    writeln!(stdout, "No containers found.")?;
                } else {
                    formatter.write_table(&mut stdout, STATS_HEADERS, &stats_rows(&selected))?;
                }
                write_refresh_stamp(&mut stdout)
            }
        })
        .await
    }

    async fn logs<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        token: &str,
    ) -> Result<(), CliError> {
        let containers = self.client.containers(DEFAULT_TIMEOUT).await?;
        let id = resolve(&containers, token).map_err(unraid_client::ClientError::from)?;
        let container = containers
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CliError::Command(format!("container not found: {token}")))?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, container);
        }

        formatter.write_key_values(
            writer,
            &[
                ("Name", container.display_name().to_string()),
                ("ID", container.id.clone()),
                ("State", color::state(&container.state)),
                ("Status", container.status.clone()),
                ("Image", container.image.clone()),
                ("Autostart", format_bool(container.auto_start)),
            ],
        )?;
        writeln!(writer)?;
        writeln!(
            writer,
            "Log content is not exposed by the API. Run 'docker logs {}' on the server to stream logs.",
            container.display_name()
        )?;
        Ok(())
    }
}

fn write_refresh_stamp(writer: &mut impl Write) -> Result<(), CliError> {
    writeln!(
        writer,
        "\nLast updated: {}",
        chrono::Local::now().format("%H:%M:%S")
    )?;
    Ok(())
}

fn filter_containers<'c>(
    containers: &'c [Container],
    state: Option<&str>,
    running_only: bool,
) -> Vec<&'c Container> {
    containers
        .iter()
        .filter(|c| {
            if running_only && !c.state.eq_ignore_ascii_case("RUNNING") {
                return false;
            }
            match state {
                Some(s) => c.state.eq_ignore_ascii_case(s),
                None => true,
            }
        })
        .collect()
}

// Stats can be scoped to a subset of containers by name, id, or id prefix.
fn select_containers<'c>(containers: &'c [Container], tokens: &[String]) -> Vec<&'c Container> {
    if tokens.is_empty() {
        return containers.iter().collect();
    }
    containers
        .iter()
        .filter(|c| {
            tokens.iter().any(|t| {
                c.id == *t || c.display_name() == t.as_str() || c.id.starts_with(t.as_str())
            })
        })
        .collect()
}

fn container_rows(containers: &[&Container]) -> Vec<Vec<String>> {
    containers
        .iter()
        .map(|c| {
            vec![
                short_id(&c.id),
                c.display_name().to_string(),
                color::state(&c.state),
                c.status.clone(),
                c.image.clone(),
                format_bool(c.auto_start),
            ]
        })
        .collect()
}

fn stats_rows(containers: &[&Container]) -> Vec<Vec<String>> {
    containers
        .iter()
        .map(|c| {
            vec![
                c.display_name().to_string(),
                color::state(&c.state),
                c.status.clone(),
            ]
        })
        .collect()
}

fn short_id(id: &str) -> String {
    id.chars().take(12).collect()
}
