use std::path::Path;
use std::process;

use dspf_core::{DisplayMode, Field, Indicators, RecordFormat, SourceFile, WindowSize};
use serde_json::json;

use crate::OutputFormat;

/// Print the fields of `format_name` that are drawn under `indicators`,
/// plus its window geometry when it is a window.
pub(crate) fn cmd_show(
    file: &Path,
    format_name: &str,
    indicators: &Indicators,
    output: OutputFormat,
    quiet: bool,
) {
    let parsed = crate::load_or_exit(file, output, quiet);
    match render(&parsed, format_name, indicators, output) {
        Ok(text) => println!("{}", text),
        Err(e) => {
            crate::report_dspf_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn render(
    parsed: &SourceFile,
    format_name: &str,
    indicators: &Indicators,
    output: OutputFormat,
) -> Result<String, dspf_core::DspfError> {
    let format = parsed.require_format(format_name)?;
    let window = if format.is_window {
        Some(parsed.window_geometry(format_name)?)
    } else {
        None
    };
    let fields: Vec<&Field> = format.visible_fields(indicators).collect();

    Ok(match output {
        OutputFormat::Json => {
            let value = json!({
                "name": format.name,
                "window": window,
                "indicators": indicators.iter().collect::<Vec<_>>(),
                "fields": fields.iter().map(|f| field_json(f)).collect::<Vec<_>>(),
            });
            serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e))
        }
        OutputFormat::Text => render_text(format, window, &fields),
    })
}

fn field_json(field: &Field) -> serde_json::Value {
    json!({
        "name": field.name,
        "row": field.position.row,
        "col": field.position.col,
        "length": field.effective_length(),
        "displayMode": field.display_mode,
        "value": field.value,
    })
}

fn render_text(format: &RecordFormat, window: Option<WindowSize>, fields: &[&Field]) -> String {
    let mut lines = vec![format!(
        "{} (lines {}..{})",
        format.name, format.source_range.start, format.source_range.end
    )];
    if let Some(w) = window {
        lines.push(format!(
            "window at row {} col {}, {} rows x {} cols",
            w.origin_row, w.origin_col, w.height, w.width
        ));
    }
    for field in fields {
        let line = format!(
            "{:>3} {:>3}  {:<10} {:>4}  {:<6} {}",
            field.position.row,
            field.position.col,
            field.name,
            field.effective_length(),
            mode_label(field.display_mode),
            field.value
        );
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

fn mode_label(mode: DisplayMode) -> &'static str {
    match mode {
        DisplayMode::Input => "input",
        DisplayMode::Output => "output",
        DisplayMode::Both => "both",
        DisplayMode::Hidden => "hidden",
        DisplayMode::Const => "const",
    }
}
