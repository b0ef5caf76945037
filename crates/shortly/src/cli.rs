//! Clap derive structures for the `shortly` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use shortly_core::{ExpiryPreset, SortBy, TopN, TriState};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// shortly -- manage your short links from the command line
#[derive(Debug, Parser)]
#[command(
    name = "shortly",
    version,
    about = "Create, list, and inspect short links from the command line",
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
    /// Service profile to use
    #[arg(long, short = 'p', env = "SHORTLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL, including the /api prefix (overrides profile)
    #[arg(long, env = "SHORTLY_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: `defaults.output` from config, else table]
    #[arg(long, short = 'o', env = "SHORTLY_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: `defaults.color` from config, else auto]
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

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SHORTLY_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "SHORTLY_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

impl GlobalOpts {
    pub fn output_format(&self) -> &OutputFormat {
        self.output.as_ref().unwrap_or(&OutputFormat::Table)
    }

    pub fn color_mode(&self) -> &ColorMode {
        self.color.as_ref().unwrap_or(&ColorMode::Auto)
    }
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register(CredentialsArgs),

    /// Log in and remember the credential for later commands
    Login(CredentialsArgs),

    /// Forget the stored credential
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Create, list, and deactivate short links
    #[command(alias = "l")]
    Links(LinksArgs),

    /// Click statistics across your links
    Stats(StatsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CredentialsArgs {
    /// Account name
    pub username: String,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,
}

// ── Links ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

#[derive(Debug, Subcommand)]
pub enum LinksCommand {
    /// List your links, one page at a time
    #[command(alias = "ls")]
    List(LinksListArgs),

    /// Shorten a URL
    Create {
        /// Absolute URL to shorten
        url: String,

        /// Lifetime preset
        #[arg(long, short = 'e', default_value = "day", conflicts_with = "ttl")]
        expires: ExpiryPreset,

        /// Lifetime in seconds (instead of a preset)
        #[arg(long)]
        ttl: Option<u64>,
    },

    /// Deactivate a link (cannot be undone)
    Deactivate {
        /// Short ID of the link
        short_id: String,
    },

    /// Show click statistics for one link
    Stats {
        /// Short ID of the link
        short_id: String,
    },
}

#[derive(Debug, Args)]
pub struct LinksListArgs {
    /// Page number (starts at 1)
    #[arg(long, default_value = "1")]
    pub page: u32,

    /// Filter by activation: any, true, false
    #[arg(long, default_value = "any")]
    pub active: TriState,

    /// Filter by expiry (true = not yet expired): any, true, false
    #[arg(long, default_value = "any")]
    pub valid: TriState,
}

// ── Stats ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatsArgs {
    #[command(subcommand)]
    pub command: StatsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Most-clicked links
    Top {
        /// Window size: 10, 25, 50, or 100
        #[arg(long, short = 'n', default_value = "10", value_parser = parse_top)]
        top: TopN,

        /// Order by clicks in the last hour, day, or all time
        #[arg(long, short = 's', default_value = "all")]
        sort_by: SortBy,
    },
}

fn parse_top(raw: &str) -> Result<TopN, String> {
    let n: u32 = raw.parse().map_err(|e| format!("{e}"))?;
    TopN::try_from(n).map_err(|e| e.to_string())
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive setup wizard
    Init,

    /// Display the current configuration
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
