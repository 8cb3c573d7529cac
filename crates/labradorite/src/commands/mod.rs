//! Subcommand handlers.

pub mod check;
pub mod config_cmd;
pub mod generate;
pub mod lookup;
pub mod serve;

use labradorite_config::Config;
use labradorite_core::Catalog;

use crate::error::CliError;

/// Build the catalog described by `cfg`, logging where it came from.
pub(crate) fn load_catalog(cfg: &Config) -> Result<Catalog, CliError> {
    let options = cfg.load_options();
    tracing::info!(
        root = %options.data_dir.display(),
        mappings = %options.mappings_dir.display(),
        policy = %options.policy,
        "loading catalog"
    );

    let catalog = Catalog::load(&options)?;
    let report = catalog.report();
    if report.total_skipped() > 0 {
        tracing::warn!(
            skipped = report.total_skipped(),
            "some documents failed to load and will be read from disk on demand"
        );
    }
    tracing::info!(cached = report.total_cached(), "catalog ready");
    Ok(catalog)
}
