use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// One source file's text, kept together with the path it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    path: PathBuf,
    text: String,
}

impl SourceUnit {
    /// Reads the whole file. Non-UTF-8 content is a file error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_error = |source| Error::File { path: path.to_path_buf(), source };

        let bytes = fs::read(path).map_err(file_error)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| file_error(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        Ok(Self { path: path.to_path_buf(), text })
    }

    #[cfg(test)]
    pub(crate) fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self { path: path.into(), text: text.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Länge in Bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
