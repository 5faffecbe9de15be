//! Read-only lookups over a parsed [`SourceFile`].
//!
//! These are the questions renderers and editor integrations ask of the
//! model: find a format by name or by source line, follow window
//! references, decide which fields are active for a set of indicators.

use std::collections::BTreeSet;

use crate::ast::{DisplayMode, Field, Keyword, RecordFormat, SourceFile, WindowSize};
use crate::conditional::{all_satisfied, Indicators};
use crate::error::DspfError;

impl SourceFile {
    pub fn format(&self, name: &str) -> Option<&RecordFormat> {
        self.formats.iter().find(|f| f.name == name)
    }

    pub fn require_format(&self, name: &str) -> Result<&RecordFormat, DspfError> {
        self.format(name).ok_or_else(|| DspfError::FormatNotFound {
            name: name.to_owned(),
        })
    }

    /// The format whose source range covers the 0-based `line`.
    pub fn format_at_line(&self, line: usize) -> Option<&RecordFormat> {
        self.formats.iter().find(|f| f.source_range.contains(line))
    }

    /// Geometry of the named format, following `WINDOW(NAME)` references
    /// until a format with its own geometry is reached.
    pub fn window_geometry(&self, name: &str) -> Result<WindowSize, DspfError> {
        let mut current = self.require_format(name)?;
        let mut visited = BTreeSet::new();

        while let Some(reference) = current.window_reference.as_deref() {
            if !visited.insert(current.name.as_str()) {
                return Err(DspfError::WindowReferenceCycle {
                    format: name.to_owned(),
                });
            }
            current = self
                .format(reference)
                .ok_or_else(|| DspfError::WindowReferenceNotFound {
                    format: current.name.clone(),
                    reference: reference.to_owned(),
                })?;
        }
        Ok(current.window_size)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl RecordFormat {
    /// First keyword with the given (upper-case) name.
    pub fn keyword(&self, name: &str) -> Option<&Keyword> {
        self.keywords.iter().find(|k| k.name == name)
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields that would be drawn: not hidden, and active under `indicators`.
    pub fn visible_fields<'a>(
        &'a self,
        indicators: &'a Indicators,
    ) -> impl Iterator<Item = &'a Field> + 'a {
        self.fields
            .iter()
            .filter(move |f| f.display_mode != DisplayMode::Hidden && f.is_active(indicators))
    }
}

impl Field {
    /// Declared length, or the literal's width for constants.
    pub fn effective_length(&self) -> u32 {
        if self.length > 0 {
            self.length
        } else {
            self.value.chars().count() as u32
        }
    }

    pub fn is_active(&self, indicators: &Indicators) -> bool {
        all_satisfied(&self.conditions, indicators)
    }

    /// Keywords in effect under `indicators`, in declaration order.
    pub fn active_keywords<'a>(
        &'a self,
        indicators: &'a Indicators,
    ) -> impl Iterator<Item = &'a Keyword> + 'a {
        self.keywords.iter().filter(move |k| k.is_active(indicators))
    }
}

impl Keyword {
    pub fn is_active(&self, indicators: &Indicators) -> bool {
        all_satisfied(&self.conditions, indicators)
    }
}
