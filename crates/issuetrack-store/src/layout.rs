use std::path::{Path, PathBuf};

use crate::StoreError;

#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("issuetrack.toml")
    }

    pub fn db_file(&self) -> PathBuf {
        self.root.join("issues.redb")
    }

    pub fn is_initialized(&self) -> bool {
        self.config_file().is_file()
    }

    pub fn create_dirs(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.root)?;
        Ok(())
    }

    pub fn ensure_initialized(&self) -> Result<(), StoreError> {
        if !self.is_initialized() {
            return Err(StoreError::NotInitialized(self.root.clone()));
        }
        Ok(())
    }
}
