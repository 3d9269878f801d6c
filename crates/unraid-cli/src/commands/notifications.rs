//! Notification commands.

use std::io::Write;

use unraid_client::types::{Notification, NotificationOverview};
use unraid_client::Client;

use crate::cli::NotificationCommands;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::Formatter;

const HEADERS: &[&str] = &["ID", "IMPORTANCE", "TITLE", "SUBJECT", "TIMESTAMP"];

/// Executes `notifications` subcommands.
pub struct NotificationsCommand<'a> {
    client: &'a Client,
}

impl<'a> NotificationsCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `notifications` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &NotificationCommands,
    ) -> Result<(), CliError> {
        match command {
            NotificationCommands::Ls {
                importance,
                archived,
                limit,
            } => {
                self.list(writer, formatter, importance.as_deref(), *archived, *limit)
                    .await
            }
            NotificationCommands::Archive { id } => {
                self.client.archive_notification(id, DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, "Notification archived")
            }
            NotificationCommands::Overview => self.overview(writer, formatter).await,
        }
    }

    async fn list<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        importance: Option<&str>,
        archived: bool,
        limit: i64,
    ) -> Result<(), CliError> {
        let pool = if archived { "ARCHIVE" } else { "UNREAD" };
        let importance = importance.map(str::to_uppercase);
        let notifications = self
            .client
            .notifications(pool, importance.as_deref(), 0, limit, DEFAULT_TIMEOUT)
            .await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &notifications);
        }
        if notifications.is_empty() {
            writeln!(writer, "No notifications found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HEADERS, &notification_rows(&notifications))
    }

    async fn overview<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
    ) -> Result<(), CliError> {
        let overview = self.client.notification_overview(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &overview);
        }
        formatter.write_key_values(writer, &overview_pairs(&overview))
    }
}

fn notification_rows(notifications: &[Notification]) -> Vec<Vec<String>> {
    notifications
        .iter()
        .map(|n| {
            vec![
                n.id.clone(),
                importance_cell(&n.importance),
                n.title.clone(),
                n.subject.clone(),
                n.timestamp.clone(),
            ]
        })
        .collect()
}

fn importance_cell(importance: &str) -> String {
    let upper = importance.to_uppercase();
    match upper.as_str() {
        "ALERT" => color::red(&upper),
        "WARNING" => color::yellow(&upper),
        "INFO" => color::blue(&upper),
        _ => upper,
    }
}

fn overview_pairs(overview: &NotificationOverview) -> Vec<(&'static str, String)> {
    vec![
        ("Unread", counts_line(overview.unread.total, overview.unread.info, overview.unread.warning, overview.unread.alert)),
        ("Archived", counts_line(overview.archive.total, overview.archive.info, overview.archive.warning, overview.archive.alert)),
    ]
}

fn counts_line(total: i64, info: i64, warning: i64, alert: i64) -> String {
    format!("{total} ({info} info, {warning} warning, {alert} alert)")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;
    use unraid_client::types::NotificationCounts;

    #[test]
    fn rows_color_importance_by_level() {
        let notifications = vec![
            Notification {
                id: "n1".into(),
                importance: "ALERT".into(),
                title: "Disk failure".into(),
                ..Default::default()
            },
            Notification {
                id: "n2".into(),
                importance: "info".into(),
                title: "Update available".into(),
                ..Default::default()
            },
        ];

        let rows = notification_rows(&notifications);
        assert_eq!(strip_ansi(&rows[0][1]), "ALERT");
        assert_eq!(strip_ansi(&rows[1][1]), "INFO");
        assert_eq!(rows[0][2], "Disk failure");
    }

    #[test]
    fn overview_lines_aggregate_counts() {
        let overview = NotificationOverview {
            unread: NotificationCounts {
                info: 2,
                warning: 1,
                alert: 0,
                total: 3,
            },
            archive: NotificationCounts::default(),
        };

        let pairs = overview_pairs(&overview);
        assert_eq!(pairs[0].1, "3 (2 info, 1 warning, 0 alert)");
        assert_eq!(pairs[1].1, "0 (0 info, 0 warning, 0 alert)");
    }
}
