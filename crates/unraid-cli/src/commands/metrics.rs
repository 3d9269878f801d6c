//! Live CPU and memory metrics.

use std::io::Write;
use std::time::Duration;

use unraid_client::types::Metrics;
use unraid_client::Client;

use crate::cli::MetricsArgs;
use crate::commands::QUICK_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::{format_bytes, Formatter};
use crate::output::watch;

const CORE_HEADERS: &[&str] = &["CORE", "USAGE", "USER", "SYSTEM", "IDLE"];

/// Executes the `metrics` command.
pub struct MetricsCommand<'a> {
    client: &'a Client,
}

impl<'a> MetricsCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run the `metrics` command.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        args: &MetricsArgs,
    ) -> Result<(), CliError> {
        if args.watch {
            return self.watch(formatter, args.cores, args.interval).await;
        }

        let metrics = self.client.metrics(QUICK_TIMEOUT).await?;
        if formatter.mode().is_structured() {
            return formatter.write(writer, &metrics);
        }
        write_metrics(writer, formatter, &metrics, args.cores)
    }

    async fn watch(
        &self,
        formatter: Formatter,
        cores: bool,
        interval: u64,
    ) -> Result<(), CliError> {
        let cancel = watch::cancel_on_ctrl_c();
        let client = self.client;

        watch::run(&cancel, Duration::from_secs(interval.max(1)), move || {
            async move {
                let metrics = client.metrics(QUICK_TIMEOUT).await?;
                let mut stdout = std::io::stdout().lock();
                write_metrics(&mut stdout, formatter, &metrics, cores)?;
                writeln!(
                    stdout,
                    "\nLast updated: {}",
                    chrono::Local::now().format("%H:%M:%S")
                )?;
                Ok(())
            }
        })
        .await
    }
}

fn write_metrics<W: Write>(
    writer: &mut W,
    formatter: Formatter,
    metrics: &Metrics,
    cores: bool,
) -> Result<(), CliError> {
    formatter.write_key_values(writer, &summary_pairs(metrics))?;

    if cores && !metrics.cpu.cpus.is_empty() {
        writeln!(writer)?;
        formatter.write_table(writer, CORE_HEADERS, &core_rows(metrics))?;
    }
    Ok(())
}

fn summary_pairs(metrics: &Metrics) -> Vec<(&'static str, String)> {
    let memory = &metrics.memory;
    let memory_line = format!(
        "{} / {} ({})",
        format_bytes(u64::try_from(memory.used).unwrap_or(0)),
        format_bytes(u64::try_from(memory.total).unwrap_or(0)),
        color::percentage(memory.percent_total, false)
    );
    let swap_line = format!(
        "{} / {} ({})",
        format_bytes(u64::try_from(memory.swap_used).unwrap_or(0)),
        format_bytes(u64::try_from(memory.swap_total).unwrap_or(0)),
        color::percentage(memory.percent_swap_total, false)
    );

    vec![
        ("CPU", color::percentage(metrics.cpu.percent_total, false)),
        ("Memory", memory_line),
        ("Available", format_bytes(u64::try_from(memory.available).unwrap_or(0))),
        ("Swap", swap_line),
    ]
}

fn core_rows(metrics: &Metrics) -> Vec<Vec<String>> {
    metrics
        .cpu
        .cpus
        .iter()
        .enumerate()
        .map(|(i, core)| {
            vec![
                i.to_string(),
                color::percentage(core.percent_total, false),
                format!("{:.1}%", core.percent_user),
                format!("{:.1}%", core.percent_system),
                format!("{:.1}%", core.percent_idle),
            ]
        })
        .collect()
}
