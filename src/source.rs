use std::fs;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::cancel::CancellationToken;
use crate::error::GenmarkError;
use crate::generated::{self, Evidence};
use crate::syntax::{ParsedUnit, SyntaxTree, Trivia};
use crate::types::Lang;

/// What's on disk, before we decide whether it's worth parsing.
#[derive(Debug)]
pub enum Contents {
    Empty,
    Binary,
    Text(String),
}

/// Read a file for classification. Empty check before mmap, since mmap on a
/// 0-byte file may fail on some platforms.
pub fn read_contents(path: &Path) -> Result<Contents, GenmarkError> {
    let meta = fs::metadata(path).map_err(|e| GenmarkError::from_io(path, e))?;
    if meta.len() == 0 {
        return Ok(Contents::Empty);
    }

    let file = fs::File::open(path).map_err(|e| GenmarkError::from_io(path, e))?;
    let mmap = unsafe { Mmap::map(&file) }.map_err(|e| GenmarkError::from_io(path, e))?;
    let buf = &mmap[..];

    if is_binary(buf) {
        return Ok(Contents::Binary);
    }

    let text = String::from_utf8_lossy(buf);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&*text);
    Ok(Contents::Text(text.to_owned()))
}

/// Any null byte in the first 512 bytes → binary.
/// Uses memchr for the scan — single SIMD pass, no branching.
pub fn is_binary(buf: &[u8]) -> bool {
    let window = &buf[..buf.len().min(512)];
    memchr::memchr(0, window).is_some()
}

/// A file path plus its text. Parsing happens on demand, only when the
/// trivia heuristic actually needs the tree.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    name: String,
    text: String,
    lang: Option<Lang>,
}

impl SourceFile {
    /// Language is detected from the path's extension.
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            name: path.to_string_lossy().into_owned(),
            lang: Lang::from_path(&path),
            text: text.into(),
            path,
        }
    }

    /// Load from disk. Empty and binary files have no text to parse and
    /// come back as `None`.
    pub fn load(path: &Path) -> Result<Option<Self>, GenmarkError> {
        match read_contents(path)? {
            Contents::Text(text) => Ok(Some(Self::new(path, text))),
            Contents::Empty | Contents::Binary => Ok(None),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn lang(&self) -> Option<Lang> {
        self.lang
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Which rule, if any, marks this file as generated.
    pub fn detect(&self, cancel: &CancellationToken) -> Result<Option<Evidence>, GenmarkError> {
        generated::detect(&self.name, self, cancel)
    }

    pub fn is_from_generated_code(&self, cancel: &CancellationToken) -> Result<bool, GenmarkError> {
        generated::is_from_generated_code(&self.name, self, cancel)
    }
}

impl ParsedUnit for SourceFile {
    fn first_token_leading_trivia(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Option<Vec<Trivia<'_>>>, GenmarkError> {
        let Some(lang) = self.lang else {
            return Ok(None);
        };

        cancel.check()?;
        let Some(tree) = SyntaxTree::parse(&self.text, lang) else {
            tracing::debug!(path = %self.path.display(), %lang, "parser produced no tree");
            return Ok(None);
        };
        cancel.check()?;

        tree.leading_trivia(cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_detection() {
        assert!(is_binary(b"MZ\x90\x00\x03"));
        assert!(!is_binary(b"// <auto-generated>\n"));
        let mut late_nul = vec![b'a'; 600];
        late_nul[550] = 0;
        assert!(!is_binary(&late_nul));
    }

    #[test]
    fn parses_on_demand() {
        let cancel = CancellationToken::new();
        let file = SourceFile::new("src/Program.cs", "// <auto-generated>\nclass P {}\n");
        assert_eq!(file.lang(), Some(Lang::CSharp));
        assert!(file.is_from_generated_code(&cancel).unwrap());
        assert_eq!(
            file.detect(&cancel).unwrap(),
            Some(Evidence::Marker {
                marker: "// <auto-generated>"
            })
        );
    }

    #[test]
    fn name_match_skips_parsing() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let file = SourceFile::new("Properties/AssemblyInfo.cs", "using System;\n");
        assert_eq!(file.detect(&cancel).unwrap(), Some(Evidence::FileName));
    }

    #[test]
    fn unknown_language_is_not_generated_by_trivia() {
        let file = SourceFile::new("notes.txt", "// <auto-generated>\n");
        assert_eq!(file.lang(), None);
        assert!(!file.is_from_generated_code(&CancellationToken::new()).unwrap());
    }

    #[test]
    fn cancelled_before_parse() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let file = SourceFile::new("Program.cs", "// <auto-generated>\nclass P {}\n");
        assert!(matches!(file.detect(&cancel), Err(GenmarkError::Cancelled)));
    }

    #[test]
    fn load_strips_bom_and_reports_empty_or_binary() {
        let dir = tempfile::tempdir().unwrap();

        let text = dir.path().join("Gen.cs");
        fs::write(&text, "\u{feff}// <autogenerated>\nclass G {}\n").unwrap();
        let file = SourceFile::load(&text).unwrap().unwrap();
        assert!(file.text().starts_with("// <autogenerated>"));
        assert!(file.is_from_generated_code(&CancellationToken::new()).unwrap());

        let empty = dir.path().join("Empty.cs");
        fs::write(&empty, "").unwrap();
        assert!(matches!(read_contents(&empty).unwrap(), Contents::Empty));
        assert!(SourceFile::load(&empty).unwrap().is_none());

        let binary = dir.path().join("blob.cs");
        fs::write(&binary, b"\x00\x01\x02").unwrap();
        assert!(matches!(read_contents(&binary).unwrap(), Contents::Binary));
    }

    #[test]
    fn load_missing_file_is_not_found() {
        let err = SourceFile::load(Path::new("/definitely/not/here.cs")).unwrap_err();
        assert!(matches!(err, GenmarkError::NotFound { .. }));
    }
}
