//! `WINDOW` keyword geometry.

use crate::ast::{RecordFormat, WindowSize};
use crate::columns::number;
use crate::keywords::split_parameters;

const DEFAULT_ORIGIN: u32 = 2;

/// Derive window geometry from a finalized record's keywords.
///
/// Recognised forms:
/// - `WINDOW(*DFT rows cols)`: default origin, explicit size
/// - `WINDOW(FMTNAME)`: geometry borrowed from another record format
/// - `WINDOW(row col rows cols)`: explicit origin and size
pub fn resolve_window(record: &mut RecordFormat) {
    let Some(keyword) = record.keywords.iter().find(|k| k.name == "WINDOW") else {
        return;
    };
    let params = split_parameters(keyword.value.as_deref().unwrap_or_default());

    record.is_window = true;
    let current = record.window_size;

    if params.len() >= 3 && params[0].eq_ignore_ascii_case("*DFT") {
        record.window_size = WindowSize {
            origin_row: DEFAULT_ORIGIN,
            origin_col: DEFAULT_ORIGIN,
            height: number(&params[1]).unwrap_or(current.height),
            width: number(&params[2]).unwrap_or(current.width),
        };
    } else if params.len() == 1 {
        record.window_reference = Some(params[0].clone());
    } else if params.len() >= 4 {
        record.window_size = WindowSize {
            origin_row: origin(&params[0]),
            origin_col: origin(&params[1]),
            height: number(&params[2]).unwrap_or(current.height),
            width: number(&params[3]).unwrap_or(current.width),
        };
    }
}

/// Program-supplied (`&FIELD`) or zero origins fall back to the default.
fn origin(param: &str) -> u32 {
    match number(param) {
        Some(n) if n > 0 => n,
        _ => DEFAULT_ORIGIN,
    }
}
