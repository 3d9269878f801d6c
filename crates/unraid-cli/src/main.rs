//! unraidcli binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use unraid_client::Client;

use unraid_cli::cli::{Cli, Commands};
use unraid_cli::commands::{
    ArrayCommand, ConfigCommand, DockerCommand, HealthCommand, LogsCommand, MetricsCommand,
    NotificationsCommand, ParityCommand, PluginCommand, ServerCommand, SharesCommand, VmCommand,
};
use unraid_cli::config::Config;
use unraid_cli::output::color;
use unraid_cli::output::format::{Formatter, OutputMode};

fn main() -> ExitCode {
    // Diagnostics go to stderr so they never pollute piped output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    color::init();

    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), unraid_cli::CliError> {
    let mut stdout = io::stdout().lock();

    // Profile management runs without a resolved server; `config set` builds
    // its own client for the connection test.
    if let Commands::Config { command } = &cli.command {
        let mode = cli.output.map(OutputMode::from).unwrap_or_default();
        return ConfigCommand::execute(&mut stdout, Formatter::new(mode), command).await;
    }

    let config = Config::load()?;

    let mode = match cli.output {
        Some(arg) => arg.into(),
        None if !config.output_format.is_empty() => OutputMode::parse(&config.output_format),
        None => OutputMode::Table,
    };
    let formatter = Formatter::new(mode);

    let (_, server) = config.server(cli.server.as_deref())?;
    let client = Client::new(&server.url, &server.api_key)?;

    match &cli.command {
        Commands::Docker { command } => {
            DockerCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Vm { command } => {
            VmCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Array { command } => {
            ArrayCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Parity { command } => {
            ParityCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Shares { command } => {
            SharesCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Notifications { command } => {
            NotificationsCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Logs { command } => {
            LogsCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Plugin { command } => {
            PluginCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Metrics(args) => {
            MetricsCommand::new(&client)
                .execute(&mut stdout, formatter, args)
                .await
        }
        Commands::Server { command } => {
            ServerCommand::new(&client)
                .execute(&mut stdout, formatter, command)
                .await
        }
        Commands::Health => HealthCommand::new(&client).execute(&mut stdout).await,
        // Handled before the client was built.
        Commands::Config { .. } => Ok(()),
    }
}
