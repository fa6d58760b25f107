use std::fs;
use std::path::{Path, PathBuf};

use crate::{DomainSource, SourceError};

/// One trimmed entry per non-blank line.
#[derive(Debug, Clone)]
pub struct LineFileSource {
    path: PathBuf,
    name: String,
}

impl LineFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl DomainSource for LineFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<String>, SourceError> {
        let text = read_text(&self.path)?;
        Ok(text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Every non-blank line, sorted by code point.
#[derive(Debug, Clone)]
pub struct SortedFileSource {
    path: PathBuf,
    name: String,
}

impl SortedFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }
}

impl DomainSource for SortedFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&self) -> Result<Vec<String>, SourceError> {
        let text = read_text(&self.path)?;
        let mut lines: Vec<String> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        lines.sort();
        Ok(lines)
    }
}

/// Read a file as UTF-8, replacing invalid sequences.
pub(crate) fn read_text(path: &Path) -> Result<String, SourceError> {
    let bytes = fs::read(path).map_err(|source| SourceError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents).expect("write temp file");
        file
    }

    #[test]
    fn line_file_trims_and_drops_blanks() {
        let file = write_temp(b"  example.com  \n\nhttps://a.ir/x\r\n\t\n");
        let entries = LineFileSource::new(file.path()).read().expect("readable");
        assert_eq!(entries, vec!["example.com".to_string(), "https://a.ir/x".to_string()]);
    }

    #[test]
    fn line_file_replaces_invalid_utf8() {
        let file = write_temp(b"ok.com\n\xffbad.com\n");
        let entries = LineFileSource::new(file.path()).read().expect("readable");
        assert_eq!(entries[0], "ok.com");
        assert!(entries[1].ends_with("bad.com"));
    }

    #[test]
    fn sorted_file_sorts_lines() {
        let file = write_temp(b"zeta.com\nalpha.com\n\nmid.com");
        let entries = SortedFileSource::new(file.path()).read().expect("readable");
        assert_eq!(
            entries,
            vec!["alpha.com".to_string(), "mid.com".to_string(), "zeta.com".to_string()]
        );
    }

    #[test]
    fn missing_file_is_file_access_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("missing.txt");

        let err = LineFileSource::new(&path).read().unwrap_err();
        match err {
            SourceError::FileAccess { path: failed, .. } => assert_eq!(failed, path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(SortedFileSource::new(&path).read().is_err());
    }
}
