//! Source member acquisition.
//!
//! The parser itself does no I/O; [`SourceProvider`] supplies the text of a
//! member so callers can parse from disk or from memory alike.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::ast::SourceFile;
use crate::error::DspfError;
use crate::parser::parse;

/// Trait that abstracts reading a DDS source member.
pub trait SourceProvider {
    /// Read the full text of the member at `path`.
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error>;
}

/// Reads members from the filesystem. Members transferred from the host are
/// not always UTF-8; invalid bytes are replaced rather than rejected.
pub struct FileSystemProvider;

impl SourceProvider for FileSystemProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Serves members from a path-to-text map. Used in tests and by hosts that
/// already hold the member text (an editor buffer, for instance).
pub struct InMemoryProvider {
    files: HashMap<PathBuf, String>,
}

impl InMemoryProvider {
    pub fn new(files: HashMap<PathBuf, String>) -> Self {
        Self { files }
    }
}

impl SourceProvider for InMemoryProvider {
    fn read_source(&self, path: &Path) -> Result<String, std::io::Error> {
        self.files.get(path).cloned().ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("not found: {}", path.display()),
            )
        })
    }
}

/// Split member text into physical lines. Accepts `\n` and `\r\n`; a final
/// line terminator does not start another line.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

/// Parse member text held in memory.
pub fn parse_str(text: &str) -> SourceFile {
    parse(&split_lines(text))
}

/// Read a member through `provider` and parse it.
pub fn parse_path(provider: &dyn SourceProvider, path: &Path) -> Result<SourceFile, DspfError> {
    let text = provider.read_source(path).map_err(|source| DspfError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_str(&text))
}

/// Read a member from disk and parse it.
pub fn parse_file(path: &Path) -> Result<SourceFile, DspfError> {
    parse_path(&FileSystemProvider, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMBER: &str = "     A                                      INDARA\r\n     A          R MAIN\r\n";

    #[test]
    fn split_lines_handles_crlf() {
        let lines = split_lines(MEMBER);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].ends_with("MAIN"));
    }

    #[test]
    fn split_lines_without_trailing_newline() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn in_memory_parse() {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("/qddssrc/main.dspf"), MEMBER.to_string());
        let provider = InMemoryProvider::new(files);
        let file = parse_path(&provider, Path::new("/qddssrc/main.dspf")).unwrap();
        assert_eq!(file.formats.len(), 2);
        assert_eq!(file.formats[0].keywords[0].name, "INDARA");
        assert_eq!(file.formats[1].source_range.end, 2);
    }

    #[test]
    fn in_memory_missing_member() {
        let provider = InMemoryProvider::new(HashMap::new());
        let err = parse_path(&provider, Path::new("/missing.dspf")).unwrap_err();
        match err {
            DspfError::Io { path, source } => {
                assert_eq!(path, PathBuf::from("/missing.dspf"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn file_system_reads_latin1_member() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin1.dspf");
        std::fs::write(
            &path,
            b"     A          R MAIN\n     A                                  1  2'Gr\xFC\xDFe'\n",
        )
        .unwrap();

        let file = parse_file(&path).unwrap();
        assert_eq!(file.formats[1].name, "MAIN");
        let greeting = &file.formats[1].fields[0];
        assert_eq!(greeting.name, "TEXT1");
        assert_eq!(greeting.value, "Gr\u{FFFD}\u{FFFD}e");
    }

    #[test]
    fn file_system_missing_member() {
        let err = parse_file(Path::new("/definitely/not/here.dspf")).unwrap_err();
        assert_eq!(err.kind(), "io");
    }
}
