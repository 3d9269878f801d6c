//! Command-line argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::format::OutputMode;

/// Manage Unraid servers from the command line.
#[derive(Parser, Debug)]
#[command(name = "unraidcli", version, about = "Manage Unraid servers over the GraphQL API")]
pub struct Cli {
    /// Server profile to use (defaults to the configured default)
    #[arg(short, long, global = true, env = "UNRAIDCLI_SERVER")]
    pub server: Option<String>,

    /// Output format
    #[arg(short, long, global = true, env = "UNRAIDCLI_OUTPUT", value_enum)]
    pub output: Option<FormatArg>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format flag.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Human-readable table
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl From<FormatArg> for OutputMode {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Table => Self::Table,
            FormatArg::Json => Self::Json,
            FormatArg::Yaml => Self::Yaml,
        }
    }
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage Docker containers
    Docker {
        #[command(subcommand)]
        command: DockerCommands,
    },
    /// Manage virtual machines
    #[command(alias = "vms")]
    Vm {
        #[command(subcommand)]
        command: VmCommands,
    },
    /// Manage the storage array
    Array {
        #[command(subcommand)]
        command: ArrayCommands,
    },
    /// Manage parity checks
    Parity {
        #[command(subcommand)]
        command: ParityCommands,
    },
    /// Inspect user shares
    Shares {
        #[command(subcommand)]
        command: SharesCommands,
    },
    /// View and archive notifications
    #[command(alias = "notif", alias = "alerts")]
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Browse server log files
    Logs {
        #[command(subcommand)]
        command: LogCommands,
    },
    /// Manage plugins
    #[command(alias = "plugins")]
    Plugin {
        #[command(subcommand)]
        command: PluginCommands,
    },
    /// Show live CPU and memory metrics
    Metrics(MetricsArgs),
    /// Show server information
    Server {
        #[command(subcommand)]
        command: ServerCommands,
    },
    /// Aggregated health summary
    Health,
    /// Manage server profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Docker subcommands.
#[derive(Subcommand, Debug)]
pub enum DockerCommands {
    /// List all containers
    Ls {
        /// Only show containers in this state
        #[arg(long)]
        state: Option<String>,
        /// Refresh continuously
        #[arg(short, long)]
        watch: bool,
        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = 2)]
        interval: u64,
    },
    /// List running containers
    Ps {
        /// Refresh continuously
        #[arg(short, long)]
        watch: bool,
        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = 2)]
        interval: u64,
    },
    /// Start a container
    Start {
        /// Container name, id, or id prefix
        container: String,
    },
    /// Stop a container
    Stop {
        /// Container name, id, or id prefix
        container: String,
    },
    /// Restart a container
    Restart {
        /// Container name, id, or id prefix
        container: String,
    },
    /// Start several containers
    StartAll {
        /// Container names, ids, or id prefixes
        #[arg(required = true)]
        containers: Vec<String>,
    },
    /// Stop several containers
    StopAll {
        /// Container names, ids, or id prefixes
        #[arg(required = true)]
        containers: Vec<String>,
    },
    /// Show container states and status
    Stats {
        /// Limit to these containers (default: all)
        containers: Vec<String>,
        /// Refresh continuously
        #[arg(short, long)]
        watch: bool,
        /// Refresh interval in seconds
        #[arg(short, long, default_value_t = 2)]
        interval: u64,
    },
    /// Show container log information
    Logs {
        /// Container name, id, or id prefix
        container: String,
    },
}

/// VM subcommands.
#[derive(Subcommand, Debug)]
pub enum VmCommands {
    /// List virtual machines
    #[command(alias = "list")]
    Ls,
    /// Start a virtual machine
    Start {
        /// VM name, id, or id prefix
        vm: String,
    },
    /// Stop a virtual machine
    Stop {
        /// VM name, id, or id prefix
        vm: String,
    },
    /// Restart a virtual machine
    Restart {
        /// VM name, id, or id prefix
        vm: String,
    },
}

/// Array subcommands.
#[derive(Subcommand, Debug)]
pub enum ArrayCommands {
    /// Show array state, capacity, and disks
    Status,
    /// Start the array
    Start,
    /// Stop the array
    Stop,
}

/// Parity subcommands.
#[derive(Subcommand, Debug)]
pub enum ParityCommands {
    /// Show the current parity check
    Status,
    /// Show past parity checks
    History,
    /// Start a parity check
    Start {
        /// Write corrections to parity
        #[arg(long)]
        correct: bool,
    },
    /// Pause the running parity check
    Pause,
    /// Resume a paused parity check
    Resume,
    /// Cancel the running parity check
    Cancel,
}

/// Shares subcommands.
#[derive(Subcommand, Debug)]
pub enum SharesCommands {
    /// List user shares
    #[command(alias = "list")]
    Ls,
    /// Show details for one share
    Info {
        /// Share name
        name: String,
    },
}

/// Notification subcommands.
#[derive(Subcommand, Debug)]
pub enum NotificationCommands {
    /// List notifications
    #[command(alias = "list")]
    Ls {
        /// Filter by importance (INFO, WARNING, ALERT)
        #[arg(long)]
        importance: Option<String>,
        /// Show archived instead of unread notifications
        #[arg(long)]
        archived: bool,
        /// Maximum number of notifications to show
        #[arg(long, default_value_t = 20)]
        limit: i64,
    },
    /// Archive a notification
    Archive {
        /// Notification id
        id: String,
    },
    /// Show unread/archive counts by importance
    Overview,
}

/// Log subcommands.
#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// List available log files
    #[command(alias = "list")]
    Ls,
    /// View a log file
    View {
        /// Log file path
        path: String,
        /// Number of lines to show
        #[arg(short = 'n', long, default_value_t = 100)]
        lines: i64,
        /// Show the end of the file instead of the beginning
        #[arg(short, long)]
        tail: bool,
    },
    /// Show the end of a log file
    Tail {
        /// Log file path
        path: String,
        /// Number of lines to show
        #[arg(short = 'n', long, default_value_t = 50)]
        lines: i64,
    },
}

/// Plugin subcommands.
#[derive(Subcommand, Debug)]
pub enum PluginCommands {
    /// List installed plugins
    #[command(alias = "list")]
    Ls,
    /// Install plugins
    Add {
        /// Plugin names
        #[arg(required = true)]
        names: Vec<String>,
        /// Install as bundled plugins
        #[arg(long)]
        bundled: bool,
        /// Skip the API restart after installing
        #[arg(long)]
        no_restart: bool,
    },
    /// Remove plugins
    Remove {
        /// Plugin names
        #[arg(required = true)]
        names: Vec<String>,
        /// Remove bundled plugins
        #[arg(long)]
        bundled: bool,
        /// Skip the API restart after removing
        #[arg(long)]
        no_restart: bool,
    },
}

/// Arguments for the metrics command.
#[derive(clap::Args, Debug)]
pub struct MetricsArgs {
    /// Refresh continuously
    #[arg(short, long)]
    pub watch: bool,
    /// Refresh interval in seconds
    #[arg(short, long, default_value_t = 2)]
    pub interval: u64,
    /// Show per-core CPU usage
    #[arg(long)]
    pub cores: bool,
}

/// Server subcommands.
#[derive(Subcommand, Debug)]
pub enum ServerCommands {
    /// Show hardware and OS details
    Info,
    /// Test connectivity and show the server version
    Status,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Add or update a server profile
    Set {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,
        /// Server base URL
        #[arg(long)]
        url: String,
        /// API key
        #[arg(long)]
        apikey: String,
    },
    /// Show the current configuration
    Show,
    /// List server profiles
    Ls,
    /// Remove a server profile
    Remove {
        /// Profile name
        name: String,
    },
    /// Change the default server profile
    Default {
        /// Profile name
        name: String,
    },
}
