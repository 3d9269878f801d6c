//! Virtual machine commands.

use std::io::Write;

use unraid_client::types::Vm;
use unraid_client::Client;

use crate::cli::VmCommands;
use crate::commands::DEFAULT_TIMEOUT;
use crate::error::CliError;
use crate::output::color;
use crate::output::format::Formatter;

const HEADERS: &[&str] = &["ID", "NAME", "STATE"];

/// Executes `vm` subcommands.
pub struct VmCommand<'a> {
    client: &'a Client,
}

impl<'a> VmCommand<'a> {
    /// Create the executor.
    #[must_use]
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Run one `vm` subcommand.
    ///
    /// # Errors
    ///
    /// Returns an error when the API call or output writing fails.
    pub async fn execute<W: Write>(
        &self,
        writer: &mut W,
        formatter: Formatter,
        command: &VmCommands,
    ) -> Result<(), CliError> {
        match command {
            VmCommands::Ls => self.list(writer, formatter).await,
            VmCommands::Start { vm } => {
                self.client.start_vm(vm, DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, &format!("VM '{vm}' started"))
            }
            VmCommands::Stop { vm } => {
                self.client.stop_vm(vm, DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, &format!("VM '{vm}' stopped"))
            }
            VmCommands::Restart { vm } => {
                self.client.reboot_vm(vm, DEFAULT_TIMEOUT).await?;
                formatter.write_success(writer, &format!("VM '{vm}' restarted"))
            }
        }
    }

    async fn list<W: Write>(&self, writer: &mut W, formatter: Formatter) -> Result<(), CliError> {
        let vms = self.client.vms(DEFAULT_TIMEOUT).await?;

        if formatter.mode().is_structured() {
            return formatter.write(writer, &vms);
        }
        if vms.is_empty() {
            writeln!(writer, "No VMs found.")?;
            return Ok(());
        }
        formatter.write_table(writer, HEADERS, &vm_rows(&vms))
    }
}

fn vm_rows(vms: &[Vm]) -> Vec<Vec<String>> {
    vms.iter()
        .map(|vm| {
            vec![
                vm.id.clone(),
                vm.name.clone(),
                color::state(&vm.state),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::table::strip_ansi;

    #[test]
    fn vm_rows_preserve_input_order() {
        let vms = vec![
            Vm {
                id: "v1".into(),
                name: "windows".into(),
                state: "RUNNING".into(),
            },
            Vm {
                id: "v2".into(),
                name: "homeassistant".into(),
                state: "SHUTOFF".into(),
            },
        ];

        let rows = vm_rows(&vms);
        assert_eq!(rows[0][1], "windows");
        assert_eq!(rows[1][1], "homeassistant");
        assert_eq!(strip_ansi(&rows[0][2]), "RUNNING");
        assert_eq!(strip_ansi(&rows[1][2]), "SHUTOFF");
    }
}
