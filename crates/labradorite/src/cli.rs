//! Clap derive structures for the `labradorite` binary.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use labradorite_core::{Category, LoadPolicy};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// labradorite -- device specification lookup service
#[derive(Debug, Parser)]
#[command(
    name = "labradorite",
    version,
    about = "Look up device specifications by board config, model, or identifier",
    long_about = "Serves and queries a directory of JSON device documents.\n\n\
        Identifiers are resolved through per-category mapping files and an\n\
        in-memory cache loaded at startup. Nested keys drill into a document.",
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
    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "LABRADORITE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Document store root (overrides config)
    #[arg(long, short = 'd', global = true)]
    pub data_dir: Option<PathBuf>,

    /// Mapping file directory (overrides config)
    #[arg(long, global = true)]
    pub mappings_dir: Option<PathBuf>,

    /// What to do with documents that fail to load at startup
    #[arg(long, value_enum, global = true)]
    pub load_policy: Option<LoadPolicyArg>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log line format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    /// Board configuration code (e.g. D94AP)
    #[value(alias = "board")]
    Boardconfig,
    /// Model number (e.g. A3084)
    Model,
    /// Marketing identifier (e.g. iPhone17,2)
    #[value(alias = "id")]
    Identifier,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Boardconfig => Self::Boardconfig,
            CategoryArg::Model => Self::Model,
            CategoryArg::Identifier => Self::Identifier,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LoadPolicyArg {
    /// Abort startup on the first bad document
    FailFast,
    /// Log bad documents and serve them from disk on demand
    SkipInvalid,
}

impl From<LoadPolicyArg> for LoadPolicy {
    fn from(arg: LoadPolicyArg) -> Self {
        match arg {
            LoadPolicyArg::FailFast => Self::FailFast,
            LoadPolicyArg::SkipInvalid => Self::SkipInvalid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the catalog and serve lookups over HTTP
    Serve(ServeArgs),

    /// Resolve a single identifier and print the result
    #[command(alias = "get")]
    Lookup(LookupArgs),

    /// Load the catalog and report what was cached
    Check(CheckArgs),

    /// Rebuild mapping files from a directory of device documents
    GenerateMappings(GenerateArgs),

    /// Inspect the effective configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to bind (overrides config)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(long, short = 'p')]
    pub port: Option<u16>,

    /// HTTP worker threads; 0 uses one per core (overrides config)
    #[arg(long)]
    pub workers: Option<usize>,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Identifier namespace
    #[arg(value_enum)]
    pub category: CategoryArg,

    /// Identifier to resolve (case-insensitive)
    pub identifier: String,

    /// Nested keys to drill into, outermost first
    pub subkeys: Vec<String>,

    /// Fail if a key lands on a non-object instead of stopping early
    #[arg(long)]
    pub strict: bool,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Output format for the load report
    #[arg(long, short = 'o', value_enum, default_value = "json")]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Directory containing device documents
    pub input: PathBuf,

    /// Where to write the mapping files (defaults to <input>/mappings)
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the default config file location
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
