//! Record/field assembler.
//!
//! A single pass over physical lines. The assembler is a value threaded
//! through a fold: each line consumes the previous state and produces the
//! next one. Records and fields are finalized (keywords tokenized, window
//! geometry resolved) the moment the walk passes their closing boundary.
use tracing::{debug, trace};

use crate::ast::{
    DisplayMode, Field, FieldKind, Keyword, Position, RecordFormat, SourceFile, GLOBAL_FORMAT,
};
use crate::columns::{number, SpecLine};
use crate::conditional::parse_conditionals;
use crate::keywords::RawKeywordBuffer;
use crate::window::resolve_window;

/// Parse one DDS source member, given as its physical lines in file order.
pub fn parse<S: AsRef<str>>(lines: &[S]) -> SourceFile {
    lines
        .iter()
        .enumerate()
        .fold(Assembler::new(), |asm, (index, line)| {
            asm.step(index, line.as_ref())
        })
        .finish(lines.len())
}

// ──────────────────────────────────────────────
// Assembler state
// ──────────────────────────────────────────────

enum State {
    /// Only the implicit `GLOBAL` record is open.
    BeforeFirstRecord(PendingRecord),
    /// A declared record format is open.
    BuildingRecord(PendingRecord),
}

impl State {
    fn into_pending(self) -> PendingRecord {
        match self {
            State::BeforeFirstRecord(p) | State::BuildingRecord(p) => p,
        }
    }

    fn map(self, f: impl FnOnce(PendingRecord) -> PendingRecord) -> State {
        match self {
            State::BeforeFirstRecord(p) => State::BeforeFirstRecord(f(p)),
            State::BuildingRecord(p) => State::BuildingRecord(f(p)),
        }
    }
}

struct Assembler {
    state: State,
    formats: Vec<RecordFormat>,
    /// Numbering of `TEXT<n>` constants. Runs across the whole member,
    /// not per record.
    text_counter: u32,
}

impl Assembler {
    fn new() -> Self {
        Assembler {
            state: State::BeforeFirstRecord(PendingRecord::open(GLOBAL_FORMAT, 0)),
            formats: Vec::new(),
            text_counter: 0,
        }
    }

    fn step(self, index: usize, raw: &str) -> Self {
        let Some(line) = SpecLine::extract(raw) else {
            return self;
        };

        let Assembler {
            state,
            mut formats,
            mut text_counter,
        } = self;

        let state = if line.is_record() {
            formats.push(state.into_pending().finish(index));
            let mut next = PendingRecord::open(&line.name, index);
            next.keywords.push(&line.keywords, &line.conditioning);
            State::BuildingRecord(next)
        } else if line.is_layout() {
            state.map(|pending| pending.place(&line, &mut text_counter))
        } else {
            state
        };

        Assembler {
            state,
            formats,
            text_counter,
        }
    }

    fn finish(self, line_count: usize) -> SourceFile {
        let mut formats = self.formats;
        formats.push(self.state.into_pending().finish(line_count));
        debug!(
            formats = formats.len(),
            lines = line_count,
            "parsed display file"
        );
        SourceFile { formats }
    }
}

// ──────────────────────────────────────────────
// Records under construction
// ──────────────────────────────────────────────

struct PendingRecord {
    record: RecordFormat,
    keywords: RawKeywordBuffer,
    field: Option<PendingField>,
}

impl PendingRecord {
    fn open(name: &str, start: usize) -> Self {
        PendingRecord {
            record: RecordFormat::new(name, start),
            keywords: RawKeywordBuffer::new(),
            field: None,
        }
    }

    /// Handle one non-record layout line: possibly open a field, then route
    /// the keyword area to whichever buffer is active.
    fn place(mut self, line: &SpecLine, text_counter: &mut u32) -> Self {
        if opens_field(line) {
            self.close_field();
            let position = self.position_of(line);
            let field = if line.name.is_empty() {
                *text_counter += 1;
                PendingField::constant(*text_counter, position, line)
            } else {
                PendingField::declared(position, line)
            };
            self.field = Some(field);
        }

        match self.field.as_mut() {
            Some(field) => field.keywords.push(&line.keywords, &line.conditioning),
            None => self.keywords.push(&line.keywords, &line.conditioning),
        }
        self
    }

    fn position_of(&self, line: &SpecLine) -> Position {
        let row = number(&line.row).unwrap_or(0);
        if line.col.is_empty() {
            // Hidden or unplaced field.
            Position { row, col: 0 }
        } else if line.row.is_empty() && line.usage != 'H' && line.col.starts_with('+') {
            Position {
                row: 0,
                col: self.relative_column(&line.col),
            }
        } else {
            Position {
                row,
                col: number(&line.col).unwrap_or(0),
            }
        }
    }

    /// Printer files place `+n` after the previous field: its column, plus
    /// the offset, plus the width of its constant text.
    fn relative_column(&self, col: &str) -> u32 {
        let offset = number(col).unwrap_or(0);
        match self.record.fields.last() {
            Some(prev) => prev.position.col + offset + prev.value.chars().count() as u32,
            None => offset,
        }
    }

    fn close_field(&mut self) {
        if let Some(pending) = self.field.take() {
            self.record.fields.push(pending.finish());
        }
    }

    fn finish(mut self, end: usize) -> RecordFormat {
        self.close_field();

        let mut record = self.record;
        record.keywords = self.keywords.resolve().keywords;
        record.source_range.end = end;
        resolve_window(&mut record);

        debug!(
            format = %record.name,
            fields = record.fields.len(),
            keywords = record.keywords.len(),
            window = record.is_window,
            "record format finalized"
        );
        record
    }
}

/// A line opens a new field when it carries a full position, a column-only
/// (printer) position, a hidden usage, or a field name.
fn opens_field(line: &SpecLine) -> bool {
    !line.col.is_empty() || line.usage == 'H' || !line.name.is_empty()
}

// ──────────────────────────────────────────────
// Fields under construction
// ──────────────────────────────────────────────

struct PendingField {
    field: Field,
    keywords: RawKeywordBuffer,
}

impl PendingField {
    fn blank(name: String, position: Position, line: &SpecLine) -> Self {
        PendingField {
            field: Field {
                name,
                kind: FieldKind::Char,
                display_mode: DisplayMode::Output,
                length: 0,
                decimals: 0,
                position,
                conditions: parse_conditionals(&line.conditioning),
                keywords: Vec::new(),
                value: String::new(),
            },
            keywords: RawKeywordBuffer::new(),
        }
    }

    /// An unnamed constant. Its length stays 0: the width comes from the
    /// literal assembled at finalization.
    fn constant(ordinal: u32, position: Position, line: &SpecLine) -> Self {
        let mut pending = Self::blank(format!("TEXT{}", ordinal), position, line);
        pending.field.display_mode = DisplayMode::Const;
        pending
    }

    fn declared(position: Position, line: &SpecLine) -> Self {
        let mut pending = Self::blank(line.name.clone(), position, line);
        let field = &mut pending.field;

        field.length = number(&line.length).unwrap_or(0);
        field.display_mode = match line.usage {
            'I' => DisplayMode::Input,
            'B' => DisplayMode::Both,
            'H' => DisplayMode::Hidden,
            _ => DisplayMode::Output,
        };

        match line.data_type {
            'D' | 'Z' | 'Y' => {
                field.kind = FieldKind::Decimal;
                field.decimals = number(&line.decimals).unwrap_or(0);
            }
            'L' => {
                field.length = 8;
                field.keywords.push(Keyword::flag("DATE"));
            }
            'T' => {
                field.length = 8;
                field.keywords.push(Keyword::flag("TIME"));
            }
            _ => {}
        }
        pending
    }

    fn finish(self) -> Field {
        let mut field = self.field;
        let resolved = self.keywords.resolve();
        field.keywords.extend(resolved.keywords);
        if !resolved.value.is_empty() {
            field.value = resolved.value;
        }
        trace!(
            field = %field.name,
            row = field.position.row,
            col = field.position.col,
            "field finalized"
        );
        field
    }
}
