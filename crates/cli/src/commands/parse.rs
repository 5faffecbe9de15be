use std::path::Path;

use crate::OutputFormat;

/// Print the whole model as pretty JSON, whatever the output format.
pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let parsed = crate::load_or_exit(file, output, quiet);
    let pretty = serde_json::to_string_pretty(&parsed.to_json_value())
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);
}
