//! Filesystem access behind a trait, so the assembly pipeline can be
//! exercised in tests without touching disk.
//!
//! There is no `.include` directive in this assembler (see SPEC_FULL.md
//! Non-goals), so unlike the teacher's recursive-include reader this one
//! only ever reads a single top-level source file.

use anyhow::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Production reader: delegates straight to `std::fs`.
pub struct AsmFileReader;

impl FileReader for AsmFileReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(fs::read_to_string(path)?)
    }
}

/// In-memory reader for tests.
#[derive(Default)]
pub struct MockFileReader {
    files: HashMap<PathBuf, String>,
}

impl MockFileReader {
    pub fn add_file(&mut self, path: &str, content: &str) {
        self.files.insert(PathBuf::from(path), content.to_string());
    }
}

impl FileReader for MockFileReader {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("mock file not found: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reader_returns_added_file() {
        let mut mock = MockFileReader::default();
        mock.add_file("prog.s", ".text\nnop\n");
        assert_eq!(mock.read_to_string(Path::new("prog.s")).unwrap(), ".text\nnop\n");
    }

    #[test]
    fn mock_reader_errors_on_missing_file() {
        let mock = MockFileReader::default();
        assert!(mock.read_to_string(Path::new("missing.s")).is_err());
    }

    #[test]
    fn asm_file_reader_round_trips_through_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prog.s");
        fs::write(&path, ".text\nnop\n").unwrap();

        let reader = AsmFileReader;
        assert_eq!(reader.read_to_string(&path).unwrap(), ".text\nnop\n");
    }
}
