//! Layered configuration for the Labradorite lookup service.
//!
//! Built-in defaults, then a TOML file, then `LABRADORITE_*` environment
//! variables, and finally translation into the core's [`LoadOptions`]. The
//! binary applies its own CLI flag overrides on top of the loaded [`Config`].

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use labradorite_core::{LoadOptions, LoadPolicy, TraversalMode};

/// Prefix for environment overrides; nested keys are separated by `__`,
/// e.g. `LABRADORITE_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "LABRADORITE_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub data: DataSettings,

    #[serde(default)]
    pub lookup: LookupSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// HTTP worker count; `0` leaves the choice to actix (one per core).
    #[serde(default)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: 0,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8080
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataSettings {
    /// Document store root. Mapped document paths are relative to it.
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Mapping file directory; relative paths are resolved against `root`.
    /// Defaults to `<root>/mappings`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings_dir: Option<PathBuf>,

    #[serde(default)]
    pub load_policy: LoadPolicy,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            mappings_dir: None,
            load_policy: LoadPolicy::default(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LookupSettings {
    /// Fail when sub-keys outlast the objects in a document, unless a
    /// request says otherwise.
    #[serde(default)]
    pub strict: bool,
}

impl Config {
    /// Effective mapping directory.
    pub fn mappings_dir(&self) -> PathBuf {
        match &self.data.mappings_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => self.data.root.join(dir),
            None => self.data.root.join("mappings"),
        }
    }

    /// Translate into catalog load options.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::new(&self.data.root)
            .with_mappings_dir(self.mappings_dir())
            .with_policy(self.data.load_policy)
    }

    pub fn default_mode(&self) -> TraversalMode {
        TraversalMode::from_strict(self.lookup.strict)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "server.host".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.data.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation {
                field: "data.root".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "labradorite", "labradorite").map_or_else(
        || PathBuf::from("labradorite.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack without extraction, for callers that merge more.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load configuration from defaults, a TOML file, and the environment.
///
/// An explicitly requested file must exist; the default location is
/// optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match explicit {
        Some(path) if !path.exists() => {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    let config: Config = figment(&path).extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.mappings_dir(), PathBuf::from("./mappings"));
        assert_eq!(config.data.load_policy, LoadPolicy::FailFast);
        assert_eq!(config.default_mode(), TraversalMode::Lenient);
    }

    #[test]
    fn file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labradorite.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 9090

[data]
root = "/srv/devices"
mappings_dir = "maps"
load_policy = "skip-invalid"

[lookup]
strict = true
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.mappings_dir(), PathBuf::from("/srv/devices/maps"));
        assert_eq!(config.data.load_policy, LoadPolicy::SkipInvalid);
        assert_eq!(config.default_mode(), TraversalMode::Strict);

        let options = config.load_options();
        assert_eq!(options.data_dir, PathBuf::from("/srv/devices"));
        assert_eq!(options.policy, LoadPolicy::SkipInvalid);
    }

    #[test]
    fn absolute_mappings_dir_is_kept() {
        let mut config = Config::default();
        config.data.mappings_dir = Some(PathBuf::from("/etc/labradorite/mappings"));
        assert_eq!(
            config.mappings_dir(),
            PathBuf::from("/etc/labradorite/mappings")
        );
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }), "got {err:?}");
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[data]\nload_policy = \"sometimes\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)), "got {err:?}");
    }

    #[test]
    fn empty_host_fails_validation() {
        let mut config = Config::default();
        config.server.host = "  ".into();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn toml_round_trips() {
        let config = Config::default();
        let rendered = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);
    }
}
