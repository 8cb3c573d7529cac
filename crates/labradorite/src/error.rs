//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use labradorite_config::ConfigError;
use labradorite_core::CoreError;

/// Process exit codes; success is 0.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const DATA: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Lookups ──────────────────────────────────────────────────────
    #[error("No {category} device matches '{identifier}'")]
    #[diagnostic(
        code(labradorite::device_not_found),
        help("Identifiers are matched case-insensitively against {category}s.json.")
    )]
    DeviceNotFound {
        category: String,
        identifier: String,
    },

    #[error("Key '{key}' does not exist at that level of the document")]
    #[diagnostic(
        code(labradorite::key_not_found),
        help("Drop the last key to see which members are available.")
    )]
    KeyNotFound { key: String },

    #[error("Cannot drill into '{key}': its parent is not an object")]
    #[diagnostic(
        code(labradorite::nested_parsing),
        help("Run without --strict to stop at the last reachable value.")
    )]
    NestedParsing { key: String },

    #[error("Invalid lookup: {reason}")]
    #[diagnostic(code(labradorite::bad_request))]
    BadRequest { reason: String },

    // ── Data ─────────────────────────────────────────────────────────
    #[error("Device data could not be loaded")]
    #[diagnostic(
        code(labradorite::data),
        help(
            "Check the document store and mapping files.\n\
             Regenerate mappings with: labradorite generate-mappings <dir>\n\
             Or start with --load-policy skip-invalid to serve what loads."
        )
    )]
    Data {
        #[source]
        source: CoreError,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error")]
    #[diagnostic(
        code(labradorite::config),
        help("Inspect the effective settings with: labradorite config show")
    )]
    Config {
        #[source]
        source: ConfigError,
    },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(labradorite::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to render output: {0}")]
    #[diagnostic(code(labradorite::render))]
    Render(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::DeviceNotFound { .. } | Self::KeyNotFound { .. } => exit_code::NOT_FOUND,
            Self::NestedParsing { .. } | Self::BadRequest { .. } => exit_code::USAGE,
            Self::Data { .. } => exit_code::DATA,
            Self::Config { .. } => exit_code::CONFIG,
            Self::Io(_) | Self::Render(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::DeviceNotFound {
                category,
                identifier,
            } => CliError::DeviceNotFound {
                category: category.to_string(),
                identifier,
            },
            CoreError::KeyNotFound { key } => CliError::KeyNotFound { key },
            CoreError::NestedParsingFailed { key } => CliError::NestedParsing { key },
            CoreError::BadRequest { reason } => CliError::BadRequest { reason },
            CoreError::SerializationFailed { reason } => CliError::Render(reason),
            other => CliError::Data { source: other },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(source: ConfigError) -> Self {
        CliError::Config { source }
    }
}
