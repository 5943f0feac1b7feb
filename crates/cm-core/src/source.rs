//! Named inputs of a merge run.

use std::path::{Path, PathBuf};

/// One input to be merged: a file on disk or text already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceUnit {
    File(PathBuf),
    Memory { name: String, text: String },
}

impl SourceUnit {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    pub fn memory(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::Memory {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Display name used in logs and error messages.
    pub fn name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Memory { name, .. } => name.clone(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            Self::Memory { .. } => None,
        }
    }
}

impl From<PathBuf> for SourceUnit {
    fn from(path: PathBuf) -> Self {
        Self::File(path)
    }
}

impl From<&Path> for SourceUnit {
    fn from(path: &Path) -> Self {
        Self::File(path.to_path_buf())
    }
}
