use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::CartItem;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("cart storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cart storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Where cart contents survive between sessions. Implementations must not
/// block for long: `save` runs inline on every cart mutation.
pub trait CartStorage: Send {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError>;
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
}

/// Cart persistence as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonCartFile {
    path: PathBuf,
}

impl JsonCartFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonCartFile {
    fn load(&self) -> Result<Option<Vec<CartItem>>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let items = serde_json::from_str(&content)?;
        Ok(Some(items))
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(items)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_no_saved_cart() {
        let path = std::env::temp_dir().join(format!("cart-{}.json", uuid::Uuid::new_v4()));
        let storage = JsonCartFile::new(&path);
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_file_surfaces_a_serde_error() {
        let path = std::env::temp_dir().join(format!("cart-{}.json", uuid::Uuid::new_v4()));
        fs::write(&path, "not json").unwrap();
        let storage = JsonCartFile::new(&path);
        assert!(matches!(storage.load(), Err(StorageError::Serde(_))));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn save_writes_the_configured_path() {
        let path = std::env::temp_dir().join(format!("cart-{}.json", uuid::Uuid::new_v4()));
        let storage = JsonCartFile::new(&path);
        storage.save(&[]).unwrap();
        assert!(storage.path().exists());
        assert_eq!(storage.load().unwrap(), Some(Vec::new()));
        fs::remove_file(storage.path()).ok();
    }
}
