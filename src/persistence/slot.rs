//! Storage backends for the save slot

use crate::error::GameError;

/// Somewhere one JSON save can live
pub trait SaveSlot {
    /// Saved JSON, or None when the slot is empty
    fn read(&self) -> Result<Option<String>, GameError>;
    fn write(&mut self, json: &str) -> Result<(), GameError>;
    fn clear(&mut self) -> Result<(), GameError>;
}

/// In-process slot (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    data: Option<String>,
}

impl SaveSlot for MemorySlot {
    fn read(&self) -> Result<Option<String>, GameError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, json: &str) -> Result<(), GameError> {
        self.data = Some(json.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), GameError> {
        self.data = None;
        Ok(())
    }
}

/// One JSON file on disk. Writes go to a temp file first and are renamed
/// into place, so a crash mid-write leaves the previous save intact.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileSlot {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn tmp_path(&self) -> std::path::PathBuf {
        self.path.with_extension("tmp")
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveSlot for FileSlot {
    fn read(&self) -> Result<Option<String>, GameError> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, json: &str) -> Result<(), GameError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), GameError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Browser LocalStorage under a fixed key (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageSlot {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageSlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageSlot {
    fn default() -> Self {
        Self::new(super::SAVE_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl SaveSlot for LocalStorageSlot {
    fn read(&self) -> Result<Option<String>, GameError> {
        Ok(Self::storage().and_then(|s| s.get_item(&self.key).ok().flatten()))
    }

    fn write(&mut self, json: &str) -> Result<(), GameError> {
        if let Some(storage) = Self::storage() {
            let _ = storage.set_item(&self.key, json);
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), GameError> {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
        Ok(())
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("balls-game-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_memory_slot() {
        let mut slot = MemorySlot::default();
        assert_eq!(slot.read().unwrap(), None);
        slot.write("{}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{}"));
        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);
    }

    #[test]
    fn test_file_slot() {
        let mut slot = FileSlot::new(scratch_path("save.json"));
        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);

        slot.write(r#"{"level":1}"#).unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"{"level":1}"#));
        assert!(!slot.tmp_path().exists());

        slot.write(r#"{"level":2}"#).unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some(r#"{"level":2}"#));

        slot.clear().unwrap();
        assert_eq!(slot.read().unwrap(), None);
        // Clearing an empty slot is fine
        slot.clear().unwrap();
    }
}
