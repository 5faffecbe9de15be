use std::path::Path;
use std::process;

use dspf_core::SourceFile;

use crate::OutputFormat;

/// Print the record format covering 1-based `line`.
pub(crate) fn cmd_locate(file: &Path, line: usize, output: OutputFormat, quiet: bool) {
    let parsed = crate::load_or_exit(file, output, quiet);
    let Some(name) = locate(&parsed, line) else {
        crate::report_error(
            &format!("no record format covers line {}", line),
            output,
            quiet,
        );
        process::exit(1);
    };

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "line": line, "format": name }));
        }
        OutputFormat::Text => println!("{}", name),
    }
}

fn locate(parsed: &SourceFile, line: usize) -> Option<&str> {
    let index = line.checked_sub(1)?;
    parsed.format_at_line(index).map(|f| f.name.as_str())
}
