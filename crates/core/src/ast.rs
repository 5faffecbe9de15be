//! Parsed model of a DDS source member.
//!
//! These types are produced by the parser and handed to consumers
//! (renderers, editor lookups) read-only. Every attribute a consumer needs is
//! stored directly; nothing has to be reconstructed from raw source text.

use serde::{Deserialize, Serialize};

/// Name of the implicit record format that collects everything declared
/// before the first `R` line.
pub const GLOBAL_FORMAT: &str = "GLOBAL";

// ──────────────────────────────────────────────
// Source file
// ──────────────────────────────────────────────

/// One parsed source member: its record formats in declaration order.
///
/// The first entry is always the implicit [`GLOBAL_FORMAT`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub formats: Vec<RecordFormat>,
}

// ──────────────────────────────────────────────
// Record formats
// ──────────────────────────────────────────────

/// Half-open range of physical line indexes, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRange {
    pub start: usize,
    pub end: usize,
}

impl SourceRange {
    pub fn contains(&self, line: usize) -> bool {
        self.start <= line && line < self.end
    }
}

/// Window geometry, in screen rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSize {
    pub origin_row: u32,
    pub origin_col: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    /// Full 24x80 screen.
    fn default() -> Self {
        WindowSize {
            origin_row: 0,
            origin_col: 0,
            width: 80,
            height: 24,
        }
    }
}

/// A named screen or report layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordFormat {
    pub name: String,
    pub source_range: SourceRange,
    pub is_window: bool,
    /// Set when `WINDOW(NAME)` borrows the geometry of another record.
    pub window_reference: Option<String>,
    pub window_size: WindowSize,
    pub keywords: Vec<Keyword>,
    pub fields: Vec<Field>,
}

impl RecordFormat {
    pub(crate) fn new(name: impl Into<String>, start: usize) -> Self {
        RecordFormat {
            name: name.into(),
            source_range: SourceRange { start, end: start },
            is_window: false,
            window_reference: None,
            window_size: WindowSize::default(),
            keywords: Vec::new(),
            fields: Vec::new(),
        }
    }
}

// ──────────────────────────────────────────────
// Fields
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKind {
    Char,
    Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    Input,
    Output,
    Both,
    Hidden,
    /// Literal text declared without a field name.
    Const,
}

/// 1-based screen position. Printer files leave `row` at 0 when the line
/// only places the field horizontally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

/// One placed element of a record format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Declared name, or `TEXT<n>` for unnamed constants.
    pub name: String,
    pub kind: FieldKind,
    pub display_mode: DisplayMode,
    /// 0 means "use the length of `value`" (constants).
    pub length: u32,
    pub decimals: u32,
    pub position: Position,
    /// Conditioning of the line that declared the field.
    pub conditions: Vec<Conditional>,
    pub keywords: Vec<Keyword>,
    /// Literal text of a constant, assembled from its quoted lines.
    pub value: String,
}

// ──────────────────────────────────────────────
// Keywords and conditioning
// ──────────────────────────────────────────────

/// A keyword attached to a record or field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    /// Upper-cased keyword name.
    pub name: String,
    /// Raw text between the keyword's parentheses.
    pub value: Option<String>,
    pub conditions: Vec<Conditional>,
}

impl Keyword {
    /// A keyword with no value and no conditioning.
    pub fn flag(name: &str) -> Self {
        Keyword {
            name: name.to_owned(),
            value: None,
            conditions: Vec::new(),
        }
    }
}

/// One option indicator test, e.g. `N03`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conditional {
    pub indicator: u8,
    pub negate: bool,
}
