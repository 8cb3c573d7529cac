use crate::cli::{CheckArgs, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

/// Load the catalog exactly as `serve` would and print the load report.
pub fn handle(args: &CheckArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let cfg = config::resolve(global)?;
    let catalog = super::load_catalog(&cfg)?;

    let rendered = output::render(args.output, catalog.report())?;
    output::print_output(&rendered, global.quiet);
    Ok(())
}
