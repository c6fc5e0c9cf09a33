//! Clap derive structures for the `statusdeck` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// statusdeck -- server status checker from the command line
#[derive(Debug, Parser)]
#[command(
    name = "statusdeck",
    version,
    about = "Track servers and URL status checks from the command line",
    long_about = "A client for the server status checker backend at http://localhost:8080/api.\n\n\
        Every change is sent to the backend and the affected list is\n\
        re-fetched and printed, together with the backend's request counter.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Output format [default: from config, else table]
    #[arg(long, short = 'o', env = "STATUSDECK_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: from config, else auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

impl GlobalOpts {
    pub fn output(&self) -> OutputFormat {
        self.output.unwrap_or_default()
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or_default()
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one entry per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load and show servers, status checks and the request count
    #[command(alias = "ov")]
    Overview,

    /// Manage monitored servers
    #[command(alias = "srv", alias = "s")]
    Servers(ServersArgs),

    /// Check URLs and manage stored status checks
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Read or reset the backend request counter
    #[command(alias = "req")]
    Requests(RequestsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Servers ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ServersArgs {
    #[command(subcommand)]
    pub command: ServersCommand,
}

#[derive(Debug, Subcommand)]
pub enum ServersCommand {
    /// List all servers
    #[command(alias = "ls")]
    List,

    /// Show one server
    Get {
        /// Server ID
        id: i64,
    },

    /// Create a server (blank names are ignored)
    #[command(alias = "create")]
    Add {
        /// Server name
        name: String,
    },

    /// Rename a server (blank names are ignored)
    #[command(alias = "update")]
    Rename {
        /// Server ID
        id: i64,
        /// New name
        name: String,
    },

    /// Delete a server
    #[command(alias = "rm")]
    Delete {
        /// Server ID
        id: i64,
    },
}

// ── Status checks ────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    #[command(subcommand)]
    pub command: StatusCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatusCommand {
    /// List all stored status checks
    #[command(alias = "ls")]
    List,

    /// Show one status check
    Get {
        /// Status check ID
        id: i64,
    },

    /// Check one or more URLs and store the results (blank URLs are ignored)
    Check {
        /// URLs to check
        #[arg(required = true, num_args = 1..)]
        urls: Vec<String>,
    },

    /// Store a status check under a server without running the check
    Add {
        /// Owning server ID
        #[arg(long, short = 's')]
        server: i64,

        /// URL to store (blank values are ignored)
        url: String,
    },

    /// Overwrite a stored status check
    #[command(group(ArgGroup::new("state").required(true).args(["available", "unavailable"])))]
    Update {
        /// Status check ID
        id: i64,

        /// URL to store (blank values are ignored)
        #[arg(long)]
        url: String,

        /// Mark the URL as available
        #[arg(long)]
        available: bool,

        /// Mark the URL as unavailable
        #[arg(long)]
        unavailable: bool,

        /// Message to store alongside the state
        #[arg(long, short = 'm', default_value = "")]
        message: String,
    },

    /// Delete a stored status check
    #[command(alias = "rm")]
    Delete {
        /// Status check ID
        id: i64,
    },

    /// List status checks attached to a server
    ByServer {
        /// Server name
        name: String,
    },
}

// ── Request counter ──────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommand,
}

#[derive(Debug, Subcommand)]
pub enum RequestsCommand {
    /// Show the request count
    Count,

    /// Reset the request count to zero
    Reset,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Display the effective configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a config value (output, color, timeout-secs, tick-ms, log-file)
    Set {
        /// Config key
        key: String,
        /// New value ("none" clears optional values)
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
