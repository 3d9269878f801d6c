//! Server profile management.
//!
//! These subcommands run before any client is built; `config set` is the
//! only one that touches the network, to verify the credentials it is about
//! to save.

use std::io::Write;

use unraid_client::Client;

use crate::cli::ConfigCommands;
use crate::commands::QUICK_TIMEOUT;
use crate::config::Config;
use crate::error::CliError;
use crate::output::format::{format_bool, Formatter};

const HEADERS: &[&str] = &["NAME", "URL", "DEFAULT"];

/// Executes `config` subcommands.
pub struct ConfigCommand;

impl ConfigCommand {
    /// Run one `config` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration cannot be read or written, or
    /// when the connection test for `config set` fails.
    pub async fn execute<W: Write>(
        writer: &mut W,
        formatter: Formatter,
        command: &ConfigCommands,
    ) -> Result<(), CliError> {
        let mut config = Config::load()?;

        match command {
            ConfigCommands::Set { name, url, apikey } => {
                let client = Client::new(url, apikey)?;
                client.test_connection(QUICK_TIMEOUT).await?;

                config.set_server(name, url.clone(), apikey.clone());
                config.save()?;
                formatter.write_success(writer, &format!("Server '{name}' saved"))
            }
            ConfigCommands::Show => {
                if formatter.mode().is_structured() {
                    let masked = masked_config(&config);
                    return formatter.write(writer, &masked);
                }
                formatter.write_key_values(writer, &show_pairs(&config))
            }
            ConfigCommands::Ls => {
                if config.servers.is_empty() {
                    writeln!(writer, "No servers configured.")?;
                    return Ok(());
                }
                if formatter.mode().is_structured() {
                    let masked = masked_config(&config);
                    return formatter.write(writer, &masked);
                }
                formatter.write_table(writer, HEADERS, &server_rows(&config))
            }
            ConfigCommands::Remove { name } => {
                config.remove_server(name)?;
                config.save()?;
                formatter.write_success(writer, &format!("Server '{name}' removed"))
            }
            ConfigCommands::Default { name } => {
                config.set_default(name)?;
                config.save()?;
                formatter.write_success(writer, &format!("Default server set to '{name}'"))
            }
        }
    }
}

fn show_pairs(config: &Config) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("Default server", config.default_server.clone()),
        (
            "Output format",
            if config.output_format.is_empty() {
                "table".to_string()
            } else {
                config.output_format.clone()
            },
        ),
        ("Servers", config.servers.len().to_string()),
    ];
    for (name, server) in &config.servers {
        // The key column is static in write_key_values, so fold the profile
        // name into the value.
        pairs.push(("Server", format!("{name}: {} (key {})", server.url, mask(&server.api_key))));
    }
    pairs
}

fn server_rows(config: &Config) -> Vec<Vec<String>> {
    config
        .servers
        .iter()
        .map(|(name, server)| {
            vec![
                name.clone(),
                server.url.clone(),
                format_bool(config.default_server == *name),
            ]
        })
        .collect()
}

// Keep keys out of terminal scrollback and structured dumps.
fn masked_config(config: &Config) -> Config {
    let mut masked = config.clone();
    for server in masked.servers.values_mut() {
        server.api_key = mask(&server.api_key);
    }
    masked
}

fn mask(api_key: &str) -> String {
    if api_key.len() <= 4 {
        return "****".to_string();
    }
    format!("****{}", &api_key[api_key.len() - 4..])
}
