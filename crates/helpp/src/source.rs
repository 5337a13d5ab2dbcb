// src/source.rs
//
// Whole-file loading and storing, behind a trait so the engine can run
// against an in-memory file set in tests.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::HelppError;

pub trait SourceLoader {
    /// Reads the whole text at `path`.
    fn load(&self, path: &Path) -> Result<String, HelppError>;

    /// Whether `path` names something loadable.
    fn exists(&self, path: &Path) -> bool;

    /// Writes `content` to `path`, replacing what was there.
    fn store(&mut self, path: &Path, content: &str) -> Result<(), HelppError>;
}

/// Reads and writes the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<String, HelppError> {
        fs::read_to_string(path).map_err(|source| HelppError::Load {
            path: path.to_path_buf(),
            source,
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn store(&mut self, path: &Path, content: &str) -> Result<(), HelppError> {
        fs::write(path, content).map_err(|source| HelppError::Store {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// A file set held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<PathBuf, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }

    pub fn get(&self, path: &Path) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }
}

impl SourceLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<String, HelppError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| HelppError::Load {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn store(&mut self, path: &Path, content: &str) -> Result<(), HelppError> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}
