//! Output formatting: JSON, compact JSON, YAML.

use std::io::{self, Write};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a serde-serializable value in the chosen format.
pub fn render<T: serde::Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn formats() {
        let value = json!({"soc": {"name": "A18 Pro", "cores": 6}});

        assert_eq!(
            render(OutputFormat::JsonCompact, &value).unwrap(),
            r#"{"soc":{"cores":6,"name":"A18 Pro"}}"#
        );
        assert!(
            render(OutputFormat::Json, &value)
                .unwrap()
                .contains("\n  \"soc\": {")
        );
        assert_eq!(
            render(OutputFormat::Yaml, &value).unwrap(),
            "soc:\n  cores: 6\n  name: A18 Pro\n"
        );
    }
}
