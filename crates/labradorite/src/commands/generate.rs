use labradorite_core::{Category, generate};

use crate::cli::{GenerateArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Rebuild the mapping files. Paths inside them are relative to `input`, so
/// `input` should be the document store root.
pub fn handle(args: GenerateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let output_dir = args
        .output_dir
        .unwrap_or_else(|| args.input.join("mappings"));

    let generated = generate(&args.input, Some(&output_dir))?;
    let written = generated.write(&output_dir)?;

    let mut lines = vec![format!(
        "Indexed {} documents ({} unreadable)",
        generated.indexed, generated.unreadable
    )];
    for category in Category::all() {
        let entries = generated.table(category).map_or(0, |table| table.len());
        lines.push(format!("  {category}: {entries} entries"));
    }
    for path in &written {
        lines.push(format!("Wrote {}", path.display()));
    }

    output::print_output(&lines.join("\n"), global.quiet);
    Ok(())
}
