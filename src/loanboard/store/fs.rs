use super::{DataStore, DocumentKey};
use crate::error::{CatalogError, Result};
use std::fs;
use std::path::PathBuf;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, key: DocumentKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(CatalogError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn read(&self, key: DocumentKey) -> Result<Option<String>> {
        let path = self.document_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(CatalogError::Io)?;
        Ok(Some(content))
    }

    fn write(&mut self, key: DocumentKey, content: &str) -> Result<()> {
        self.ensure_dir()?;

        // Write to a sibling temp file, then rename over the document.
        let path = self.document_path(key);
        let tmp = self.root.join(format!(".{}.tmp", key.file_name()));
        fs::write(&tmp, content).map_err(CatalogError::Io)?;
        fs::rename(&tmp, &path).map_err(CatalogError::Io)?;

        tracing::debug!(path = %path.display(), bytes = content.len(), "document written");
        Ok(())
    }
}
