//! Fixed-column extraction for one physical DDS line.
//!
//! DDS is positional: each attribute lives in a fixed column range. Lines
//! shorter than the standard record width are read as if blank-padded.

/// Width every line is padded to before columns are sliced.
pub const RECORD_WIDTH: usize = 80;

const COMMENT_FLAG: usize = 6;
const CONDITIONING: (usize, usize) = (6, 16);
const MARKER: usize = 16;
const NAME: (usize, usize) = (18, 28);
const LENGTH: (usize, usize) = (29, 34);
const DATA_TYPE: usize = 34;
const DECIMALS: (usize, usize) = (35, 37);
const USAGE: usize = 37;
const ROW: (usize, usize) = (38, 41);
const COLUMN: (usize, usize) = (41, 44);
const KEYWORDS: usize = 44;

/// The positional attributes of one non-comment line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLine {
    /// Raw 10-column conditioning zone (AND/OR column plus three slots).
    pub conditioning: String,
    /// `R` for a record format, blank for fields and keyword lines.
    pub marker: char,
    pub name: String,
    pub length: String,
    /// Upper-cased data type.
    pub data_type: char,
    pub decimals: String,
    /// Upper-cased usage.
    pub usage: char,
    pub row: String,
    pub col: String,
    /// Keyword area, right-trimmed only. Leading blanks are kept because
    /// they are part of continued string literals.
    pub keywords: String,
}

impl SpecLine {
    /// Slice a physical line into its columns. Returns `None` for comment
    /// lines, which contribute nothing to the model.
    pub fn extract(line: &str) -> Option<SpecLine> {
        let mut chars: Vec<char> = line.chars().collect();
        if chars.len() < RECORD_WIDTH {
            chars.resize(RECORD_WIDTH, ' ');
        }

        if chars[COMMENT_FLAG] == '*' {
            return None;
        }

        let span = |(from, to): (usize, usize)| chars[from..to].iter().collect::<String>();
        let trimmed = |range: (usize, usize)| span(range).trim().to_owned();

        Some(SpecLine {
            conditioning: span(CONDITIONING),
            marker: chars[MARKER],
            name: trimmed(NAME),
            length: trimmed(LENGTH),
            data_type: chars[DATA_TYPE].to_ascii_uppercase(),
            decimals: trimmed(DECIMALS),
            usage: chars[USAGE].to_ascii_uppercase(),
            row: trimmed(ROW),
            col: trimmed(COLUMN),
            keywords: chars[KEYWORDS..]
                .iter()
                .collect::<String>()
                .trim_end()
                .to_owned(),
        })
    }

    pub fn is_record(&self) -> bool {
        self.marker == 'R'
    }

    /// Lines whose marker is neither `R` nor blank (key, help and select
    /// entries) are not part of the layout model.
    pub fn is_layout(&self) -> bool {
        self.marker == 'R' || self.marker == ' '
    }
}

/// Parse a trimmed numeric column. A leading `+` is accepted; anything
/// non-numeric yields `None`.
pub fn number(text: &str) -> Option<u32> {
    let digits = text.trim();
    let digits = digits.strip_prefix('+').unwrap_or(digits);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}
