//! High score persistence
//!
//! A single scalar stored under the `"highscore"` key:
//! - `MemoryStore`: process-local, used by tests and as a fallback
//! - `FileStore`: JSON file with tmp → rename writes (native)
//! - `LocalStorageStore`: browser LocalStorage (wasm32)

mod file;
#[cfg(target_arch = "wasm32")]
mod local_storage;

pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use crate::error::{Result, SimError};

/// Storage key shared by every backend
pub const HIGHSCORE_KEY: &str = "highscore";

/// Durable best-score storage
pub trait HighScoreStore {
    /// Stored best score, 0 if nothing was ever written
    fn read(&self) -> Result<u64>;
    fn write(&mut self, value: u64) -> Result<()>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn read(&self) -> Result<u64> {
        (**self).read()
    }

    fn write(&mut self, value: u64) -> Result<()> {
        (**self).write(value)
    }
}

/// In-memory store that records every write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u64>,
    writes: Vec<u64>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A store whose every operation fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Values passed to `write`, oldest first
    pub fn writes(&self) -> &[u64] {
        &self.writes
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(SimError::PersistenceUnavailable(
                "memory store marked unavailable".into(),
            ));
        }
        Ok(())
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> Result<u64> {
        self.check()?;
        Ok(self.value.unwrap_or(0))
    }

    fn write(&mut self, value: u64) -> Result<()> {
        self.check()?;
        self.value = Some(value);
        self.writes.push(value);
        Ok(())
    }
}
