//! Browser LocalStorage backend (wasm32)

use super::{HIGHSCORE_KEY, HighScoreStore};
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| SimError::PersistenceUnavailable("LocalStorage not available".into()))
    }
}

impl HighScoreStore for LocalStorageStore {
    fn read(&self) -> Result<u64> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(HIGHSCORE_KEY)
            .map_err(|e| SimError::PersistenceUnavailable(format!("{:?}", e)))?;

        match raw {
            Some(text) => text.trim().parse::<u64>().map_err(|e| {
                SimError::PersistenceUnavailable(format!("stored high score {:?}: {}", text, e))
            }),
            None => Ok(0),
        }
    }

    fn write(&mut self, value: u64) -> Result<()> {
        Self::storage()?
            .set_item(HIGHSCORE_KEY, &value.to_string())
            .map_err(|e| SimError::PersistenceUnavailable(format!("{:?}", e)))?;
        log::info!("High score {} saved", value);
        Ok(())
    }
}
