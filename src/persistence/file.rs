//! JSON file backend
//!
//! The file holds a one-entry object, `{"highscore": 123}`. Writes go to a
//! sibling `.tmp` file first and are renamed over the old save.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HIGHSCORE_KEY, HighScoreStore};
use crate::error::{Result, SimError};

#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn load_map(&self) -> Result<BTreeMap<String, u64>> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl HighScoreStore for FileStore {
    fn read(&self) -> Result<u64> {
        Ok(self.load_map()?.get(HIGHSCORE_KEY).copied().unwrap_or(0))
    }

    fn write(&mut self, value: u64) -> Result<()> {
        let mut map = BTreeMap::new();
        map.insert(HIGHSCORE_KEY.to_string(), value);
        let json = serde_json::to_string(&map)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            SimError::PersistenceUnavailable(format!(
                "could not replace {}: {}",
                self.path.display(),
                e
            ))
        })?;

        log::info!("High score {} saved to {}", value, self.path.display());
        Ok(())
    }
}
