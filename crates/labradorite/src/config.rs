//! Effective configuration: the layered file/env config with CLI flags on top.

use labradorite_config::{Config, load_config};

use crate::cli::{GlobalOpts, ServeArgs};
use crate::error::CliError;

/// Load the config stack and apply the global flag overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_config(global.config.as_deref())?;
    apply_global(&mut cfg, global);
    cfg.validate()?;
    Ok(cfg)
}

/// Load, then layer the serve-only flags on top.
pub fn resolve_for_serve(global: &GlobalOpts, args: &ServeArgs) -> Result<Config, CliError> {
    let mut cfg = resolve(global)?;
    if let Some(host) = &args.host {
        cfg.server.host.clone_from(host);
    }
    if let Some(port) = args.port {
        cfg.server.port = port;
    }
    if let Some(workers) = args.workers {
        cfg.server.workers = workers;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn apply_global(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(root) = &global.data_dir {
        cfg.data.root.clone_from(root);
    }
    if let Some(dir) = &global.mappings_dir {
        cfg.data.mappings_dir = Some(dir.clone());
    }
    if let Some(policy) = global.load_policy {
        cfg.data.load_policy = policy.into();
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use labradorite_core::LoadPolicy;

    use super::*;
    use crate::cli::{LoadPolicyArg, LogFormat};

    fn global() -> GlobalOpts {
        GlobalOpts {
            config: None,
            data_dir: Some(PathBuf::from("/srv/devices")),
            mappings_dir: Some(PathBuf::from("maps")),
            load_policy: Some(LoadPolicyArg::SkipInvalid),
            verbose: 0,
            log_format: LogFormat::Text,
            quiet: false,
        }
    }

    #[test]
    fn flags_override_loaded_values() {
        let mut cfg = Config::default();
        apply_global(&mut cfg, &global());

        assert_eq!(cfg.data.root, PathBuf::from("/srv/devices"));
        assert_eq!(cfg.mappings_dir(), PathBuf::from("/srv/devices/maps"));
        assert_eq!(cfg.data.load_policy, LoadPolicy::SkipInvalid);
    }

    #[test]
    fn absent_flags_keep_loaded_values() {
        let mut cfg = Config::default();
        let opts = GlobalOpts {
            data_dir: None,
            mappings_dir: None,
            load_policy: None,
            ..global()
        };
        apply_global(&mut cfg, &opts);
        assert_eq!(cfg, Config::default());
    }
}
