//! dspf-core: parser for DDS display (DSPF) and printer (PRTF) source.
//!
//! Turns the fixed-column lines of a source member into a model of record
//! formats, fields, keywords and indicator conditioning. Parsing never
//! fails; malformed lines degrade to defaults.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`parse()`] -- parse a member given as physical lines
//! - [`parse_str()`], [`parse_file()`], [`parse_path()`] -- text and file entry points
//! - [`SourceProvider`] -- where member text comes from
//! - Model types: [`SourceFile`], [`RecordFormat`], [`Field`], [`Keyword`],
//!   [`Conditional`], [`Position`], [`WindowSize`], [`SourceRange`]
//! - [`Indicators`] -- indicator state for conditioning queries
//! - [`DspfError`] -- I/O and lookup errors

pub mod ast;
pub mod columns;
pub mod conditional;
pub mod error;
pub mod keywords;
pub mod parser;
pub mod query;
pub mod source;
pub mod window;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    Conditional, DisplayMode, Field, FieldKind, Keyword, Position, RecordFormat, SourceFile,
    SourceRange, WindowSize, GLOBAL_FORMAT,
};
pub use conditional::Indicators;
pub use error::DspfError;
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use parser::parse;
pub use source::{parse_file, parse_path, parse_str, split_lines};
