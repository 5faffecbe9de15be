use std::path::Path;

use dspf_core::RecordFormat;
use serde_json::json;

use crate::OutputFormat;

pub(crate) fn cmd_formats(file: &Path, output: OutputFormat, quiet: bool) {
    let parsed = crate::load_or_exit(file, output, quiet);

    match output {
        OutputFormat::Json => {
            let summaries: Vec<_> = parsed.formats.iter().map(summary_json).collect();
            let pretty = serde_json::to_string_pretty(&summaries)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
        OutputFormat::Text => {
            for format in &parsed.formats {
                println!("{}", summary_line(format));
            }
        }
    }
}

fn summary_json(format: &RecordFormat) -> serde_json::Value {
    json!({
        "name": format.name,
        "sourceRange": format.source_range,
        "fields": format.fields.len(),
        "isWindow": format.is_window,
        "windowReference": format.window_reference,
    })
}

/// `NAME  start..end  N fields [window]`
fn summary_line(format: &RecordFormat) -> String {
    let range = format!(
        "{}..{}",
        format.source_range.start, format.source_range.end
    );
    let mut line = format!(
        "{:<10} {:<9} {:>3} fields",
        format.name,
        range,
        format.fields.len()
    );
    match (&format.window_reference, format.is_window) {
        (Some(reference), _) => line.push_str(&format!("  window({})", reference)),
        (None, true) => line.push_str("  window"),
        (None, false) => {}
    }
    line
}
