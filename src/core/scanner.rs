use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{PydepsError, Result};

/// Full text of one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    pub text: String,
    /// True iff the file had zero bytes
    pub is_empty: bool,
}

impl SourceText {
    pub fn new(text: String) -> Self {
        let is_empty = text.is_empty();
        Self { text, is_empty }
    }
}

/// File-system collaborator used by the catalog builder.
pub trait SourceTree {
    /// Lists every file below `root` whose name ends in `.{suffix}`, in a stable order.
    fn source_files(&self, root: &Path, suffix: &str) -> Result<Vec<PathBuf>>;

    /// Reads a whole file; the handle is closed before this returns.
    fn read_source(&self, path: &Path) -> Result<SourceText>;
}

/// `SourceTree` over the real file system
pub struct FileScanner;

impl FileScanner {
    pub fn new() -> Self {
        Self
    }

    fn has_suffix(path: &Path, suffix: &str) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(suffix))
            .and_then(|stem| stem.strip_suffix('.'))
            .is_some()
    }

    /// Buffered read sized to the file, decoded as UTF-8
    fn read_file_optimized(path: &Path) -> std::io::Result<String> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len() as usize;

        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut content = Vec::with_capacity(file_size);
        reader.read_to_end(&mut content)?;

        String::from_utf8(content)
            .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    }
}

impl SourceTree for FileScanner {
    fn source_files(&self, root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            return Err(PydepsError::InvalidArguments(format!(
                "{} is not a directory",
                root.display()
            )));
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && Self::has_suffix(entry.path(), suffix) {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn read_source(&self, path: &Path) -> Result<SourceText> {
        Self::read_file_optimized(path)
            .map(SourceText::new)
            .map_err(|err| PydepsError::file_read(path, err))
    }
}

impl Default for FileScanner {
    fn default() -> Self {
        Self::new()
    }
}
