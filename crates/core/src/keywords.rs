//! Keyword buffering and tokenizing.
//!
//! Keyword text is collected line by line while a record or field is open and
//! only interpreted once it closes, because a single keyword expression or
//! quoted constant can span any number of physical lines.

use crate::ast::Keyword;
use crate::conditional::parse_conditionals;

// ──────────────────────────────────────────────
// Accumulator
// ──────────────────────────────────────────────

/// One buffered keyword-area line and the raw conditioning zone of the same
/// physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawLine {
    text: String,
    conditioning: String,
}

/// Append-only keyword text of one record or field, not yet interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawKeywordBuffer {
    lines: Vec<RawLine>,
}

impl RawKeywordBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer one physical line. Empty keyword areas are kept so that line
    /// indexes stay aligned with their conditioning.
    pub fn push(&mut self, text: &str, conditioning: &str) {
        self.lines.push(RawLine {
            text: text.to_owned(),
            conditioning: conditioning.to_owned(),
        });
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Interpret the buffered text. Consumes the buffer: once resolved, the
    /// raw text is gone.
    pub fn resolve(self) -> ResolvedKeywords {
        tokenize(&self.lines)
    }
}

/// Tokenizer output for one record or field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedKeywords {
    pub keywords: Vec<Keyword>,
    /// Body of the last quoted literal, or empty if none was closed.
    pub value: String,
}

// ──────────────────────────────────────────────
// Tokenizer
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Char(char),
    LineEnd,
}

/// Flatten the buffered lines into one stream with an explicit boundary
/// after every line, then a trailing blank that flushes the last token.
fn scan_stream(lines: &[RawLine]) -> Vec<Scan> {
    let mut stream = Vec::new();
    for line in lines {
        stream.extend(line.text.chars().map(Scan::Char));
        stream.push(Scan::LineEnd);
    }
    stream.push(Scan::Char(' '));
    stream
}

#[derive(Debug, Default)]
struct Lexer {
    depth: usize,
    in_string: bool,
    word: String,
    inner: String,
    value: String,
    line: usize,
    keywords: Vec<Keyword>,
}

impl Lexer {
    fn in_literal(&self) -> bool {
        self.depth > 0 || self.in_string
    }

    fn emit(&mut self, lines: &[RawLine]) {
        if self.word.is_empty() {
            return;
        }
        let conditions = lines
            .get(self.line)
            .map(|l| parse_conditionals(&l.conditioning))
            .unwrap_or_default();
        let inner = std::mem::take(&mut self.inner);
        self.keywords.push(Keyword {
            name: std::mem::take(&mut self.word).to_uppercase(),
            value: (!inner.is_empty()).then_some(inner),
            conditions,
        });
    }
}

fn tokenize(lines: &[RawLine]) -> ResolvedKeywords {
    let stream = scan_stream(lines);
    let mut lx = Lexer::default();

    let mut i = 0;
    while i < stream.len() {
        let next = stream.get(i + 1).copied();
        match stream[i] {
            Scan::LineEnd | Scan::Char(' ') => {
                if lx.in_literal() {
                    if stream[i] == Scan::Char(' ') {
                        lx.inner.push(' ');
                    }
                } else {
                    lx.emit(lines);
                }
                if stream[i] == Scan::LineEnd {
                    lx.line += 1;
                }
            }
            // A trailing sign continues the token on the next line. Inside a
            // quoted constant signs are never content.
            Scan::Char(c @ ('+' | '-')) => {
                if !lx.in_string && next != Some(Scan::LineEnd) {
                    lx.inner.push(c);
                }
            }
            Scan::Char('\'') => {
                if lx.depth > 0 {
                    lx.inner.push('\'');
                } else if lx.in_string {
                    if next == Some(Scan::Char('\'')) {
                        lx.inner.push('\'');
                        i += 1;
                    } else {
                        lx.in_string = false;
                        lx.value = std::mem::take(&mut lx.inner);
                    }
                } else {
                    lx.in_string = true;
                }
            }
            Scan::Char('(') => {
                if lx.in_string {
                    lx.inner.push('(');
                } else {
                    lx.depth += 1;
                }
            }
            Scan::Char(')') => {
                if lx.in_string {
                    lx.inner.push(')');
                } else {
                    lx.depth = lx.depth.saturating_sub(1);
                }
            }
            Scan::Char(c) => {
                if lx.in_literal() {
                    lx.inner.push(c);
                } else {
                    lx.word.push(c);
                }
            }
        }
        i += 1;
    }

    ResolvedKeywords {
        keywords: lx.keywords,
        value: lx.value,
    }
}

/// Split an already extracted keyword value into blank-separated
/// parameters. Blanks inside quoted sub-strings do not split.
pub fn split_parameters(value: &str) -> Vec<String> {
    let mut params = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in value.chars() {
        match c {
            '\'' => {
                quoted = !quoted;
                current.push(c);
            }
            ' ' if !quoted => {
                if !current.is_empty() {
                    params.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() {
        params.push(current);
    }
    params
}
