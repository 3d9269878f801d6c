//! Plugin management commands.

use std::io::Write;

use unraid_client::types::Plugin;
use unraid_client::Client;

use crate::cli::PluginCommands;
use crate::commands::{BULK_TIMEOUT, DEFAULT_TIMEOUT, PLUGIN_INSTALL_TIMEOUT};
use crate::error::CliError;
use crate::output::format::{format_bool, Formatter};

const HEADERS: &[&str] = &["NAME", "VERSION", "API", "CLI"];

/// Executes `plugin` subcommands.
pub struct PluginCommand<'a> {
    client: &'a Client,
}

impl<'a> PluginCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `plugin` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &PluginCommands,
    ) -> Result<(), CliError> {
        match command {
            PluginCommands::Ls => self.list(writer, formatter).await,
            PluginCommands::Add {
                names,
                bundled,
                no_restart,
            } => {
                self.client
                    .add_plugins(names, *bundled, !no_restart, PLUGIN_INSTALL_TIMEOUT)
                    .await?;
                formatter.write_success(writer, &installed_message(names.len(), "installed"))
            }
            PluginCommands::Remove {
                names,
                bundled,
                no_restart,
            } => {
                self.client
                    .remove_plugins(names, *bundled, !no_restart, BULK_TIMEOUT)
                    .await?;
                formatter.write_success(writer, &installed_message(names.len(), "removed"))
            }
        }
    }

    async fn list<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let plugins = self.client.plugins(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &plugins);
        }
        if plugins.is_empty() {
            writeln!(writer, "No plugins found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HEADERS, &plugin_rows(&plugins))
    }
}

fn plugin_rows(plugins: &[Plugin]) -> Vec<Vec<String>> {
    plugins
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.version.clone(),
                module_cell(p.has_api_module),
                module_cell(p.has_cli_module),
            ]
        })
        .collect()
}

// Older servers omit the module flags entirely.
fn module_cell(flag: Option<bool>) -> String {
    match flag {
        Some(value) => format_bool(value),
        None => "N/A".to_string(),
    }
}

fn installed_message(count: usize, verb: &str) -> String {
    if count == 1 {
        format!("1 plugin {verb}")
    } else {
        format!("{count} plugins {verb}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;

    #[test]
    fn rows_show_module_flags_or_na() {
        let plugins = vec![
            Plugin {
                name: "unraid-api-plugin-connect".into(),
                version: "1.2.0".into(),
                has_api_module: Some(true),
                has_cli_module: Some(false),
            },
            Plugin {
                name: "legacy".into(),
                version: "0.1.0".into(),
                has_api_module: None,
                has_cli_module: None,
            },
        ];

        let rows = plugin_rows(&plugins);
        assert_eq!(strip_ansi(&rows[0][2]), "Yes");
        assert_eq!(strip_ansi(&rows[0][3]), "No");
        assert_eq!(rows[1][2], "N/A");
        assert_eq!(rows[1][3], "N/A");
    }

    #[test]
    fn message_pluralizes() {
        assert_eq!(installed_message(1, "installed"), "1 plugin installed");
        assert_eq!(installed_message(3, "removed"), "3 plugins removed");
    }
}
