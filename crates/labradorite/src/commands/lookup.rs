use labradorite_core::{Lookup, TraversalMode};

use crate::cli::{GlobalOpts, LookupArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: LookupArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let mode = if args.strict {
        TraversalMode::Strict
    } else {
        cfg.default_mode()
    };

    let catalog = super::load_catalog(&cfg)?;
    let lookup = Lookup::new(args.category.into(), &args.identifier, args.subkeys).with_mode(mode);
    let resolution = catalog.resolve(&lookup)?;

    tracing::debug!(source = resolution.source.as_str(), "lookup complete");

    let rendered = output::render(args.output, &resolution.value)?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
