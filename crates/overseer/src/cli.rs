//! Clap derive structures for the `overseer` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use overseer_core::{DisplayClass, OverlapPolicy};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// overseer -- operator console for skynet 3D-printer farms
#[derive(Debug, Parser)]
#[command(
    name = "overseer",
    version,
    about = "Monitor and operate a skynet 3D-printer farm",
    long_about = "Polls a skynet print-farm service for printers, finished print jobs\n\
        and pending filament changes, and sends operator commands back to it.",
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
    #[arg(long, short = 'p', env = "OVERSEER_PROFILE", global = true)]
    pub profile: Option<String>,

    /// skynet base URL (overrides profile)
    #[arg(long, short = 'e', env = "OVERSEER_ENDPOINT", global = true)]
    pub endpoint: Option<String>,

    /// Output format [default: `defaults.output` from the config file, else table]
    #[arg(
        id = "output",
        long = "output",
        short = 'o',
        env = "OVERSEER_OUTPUT",
        value_name = "FORMAT",
        global = true
    )]
    pub output_flag: Option<OutputFormat>,

    /// When to use color output [default: `defaults.color`, else auto]
    #[arg(id = "color", long = "color", value_name = "WHEN", global = true)]
    pub color_flag: Option<ColorMode>,

    /// Effective output format, flag first, then config defaults.
    #[arg(skip)]
    pub output: OutputFormat,

    /// Effective color mode, flag first, then config defaults.
    #[arg(skip)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds (unset or 0: wait indefinitely)
    #[arg(long, env = "OVERSEER_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Poll period in milliseconds (overrides profile)
    #[arg(long, env = "OVERSEER_POLL_INTERVAL_MS", global = true)]
    pub poll_interval_ms: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, ValueEnum)]
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
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Default, ValueEnum)]
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
    /// Poll the farm continuously and print every refresh
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// List printers with their display class
    #[command(alias = "p")]
    Printers(PrintersArgs),

    /// List finished print jobs awaiting confirmation
    #[command(alias = "j")]
    Jobs,

    /// List pending filament changes
    #[command(alias = "f")]
    Filament,

    /// Confirm that the filament on a printer was changed
    ConfirmFilament {
        /// Printer ID
        printer_id: u64,
    },

    /// Report whether a finished print succeeded
    ConfirmJob {
        /// Print job ID
        job_id: u64,

        /// Outcome of the print
        #[arg(value_enum)]
        outcome: JobOutcome,
    },

    /// Cancel the active print on a printer
    Cancel {
        /// Printer ID
        printer_id: u64,
    },

    /// Reset the service's connection to a printer
    Reset {
        /// Printer ID
        printer_id: u64,
    },

    /// Enable or disable a printer
    Toggle {
        /// Printer ID
        printer_id: u64,
    },

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  WATCH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Behavior when a tick fires while the previous request is pending
    #[arg(long)]
    pub overlap: Option<OverlapPolicy>,

    /// Warn after this many consecutive failed polls of one resource
    #[arg(long, value_name = "N")]
    pub escalate_after: Option<u32>,

    /// Exit after this many printer refreshes (default: run until Ctrl-C)
    #[arg(long, value_name = "N")]
    pub count: Option<u64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PRINTERS / JOBS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PrintersArgs {
    /// Only show printers of this class (warning, danger, success, active, info)
    #[arg(long)]
    pub class: Option<DisplayClass>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum JobOutcome {
    /// The print came out fine
    #[value(alias = "ok")]
    Success,
    /// The print failed
    #[value(alias = "fail")]
    Failed,
}

impl JobOutcome {
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
