use std::path::PathBuf;

/// Errors raised around the parser: reading members and looking things up
/// in a parsed model. Parsing itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum DspfError {
    /// The source member could not be read.
    #[error("could not read '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No record format with the requested name.
    #[error("record format not found: {name}")]
    FormatNotFound { name: String },

    /// `WINDOW(NAME)` points at a record format that does not exist.
    #[error("record format {format} references window {reference}, which does not exist")]
    WindowReferenceNotFound { format: String, reference: String },

    /// Following window references led back to a format already visited.
    #[error("window references starting at {format} form a cycle")]
    WindowReferenceCycle { format: String },
}

impl DspfError {
    /// Stable identifier for the error variant, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            DspfError::Io { .. } => "io",
            DspfError::FormatNotFound { .. } => "format_not_found",
            DspfError::WindowReferenceNotFound { .. } => "window_reference_not_found",
            DspfError::WindowReferenceCycle { .. } => "window_reference_cycle",
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.kind(),
            "message": self.to_string(),
        })
    }
}
