//! Clap derive structures for the `softap` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! workspace crates so `build.rs` can include it for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// softap -- soft AP configuration backup tool
#[derive(Debug, Parser)]
#[command(
    name = "softap",
    version,
    about = "Encode, decode and inspect soft AP configuration backups",
    long_about = "Work with the binary backups a device writes for its soft AP (hotspot)\n\
        settings.\n\n\
        Backups are written in the current format. Every historical format\n\
        can be restored; settings an old backup predates are filled from\n\
        defaults, with auto shutdown taken from the device settings.",
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
    /// Config file holding device settings and output defaults
    #[arg(long, env = "SOFTAP_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Output format for decoded configurations (overrides config)
    #[arg(long, short = 'o', global = true)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON (default)
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write a backup payload from a JSON configuration
    #[command(alias = "enc")]
    Encode(EncodeArgs),

    /// Restore a configuration from a backup payload
    #[command(alias = "dec")]
    Decode(DecodeArgs),

    /// Show a payload's format version and the fields it carries
    Inspect(InspectArgs),

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Payload commands ─────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// JSON configuration to encode ("-" reads stdin)
    pub input: PathBuf,

    /// Write the payload here instead of stdout
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Write an older layout (5-9) instead of the current one
    #[arg(long, value_name = "N")]
    pub format_version: Option<i32>,

    /// Emit hex text instead of raw bytes
    #[arg(long)]
    pub hex: bool,
}

#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Backup payload to decode ("-" reads stdin)
    pub input: PathBuf,

    /// Treat the payload as a bare legacy record with no version tag
    #[arg(long)]
    pub legacy: bool,

    /// Payload is hex text rather than raw bytes
    #[arg(long)]
    pub hex: bool,

    /// Auto shutdown value for backups that predate it (overrides device settings)
    #[arg(long, value_name = "BOOL")]
    pub auto_shutdown: Option<bool>,
}

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Backup payload to inspect ("-" reads stdin)
    pub input: PathBuf,

    /// Payload is hex text rather than raw bytes
    #[arg(long)]
    pub hex: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key (e.g., "device.auto_shutdown_enabled")
        key: String,

        /// Value to set
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
