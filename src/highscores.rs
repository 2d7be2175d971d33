//! Best-score tracking on top of a [`HighScoreStore`]
//!
//! Storage failures never stop the game: the tracker keeps its in-memory
//! best (0 if the store was unreadable from the start) and logs a warning.

use crate::persistence::HighScoreStore;

#[derive(Debug)]
pub struct HighScoreTracker<S> {
    store: S,
    best: u64,
}

impl<S: HighScoreStore> HighScoreTracker<S> {
    /// Load the persisted best score
    pub fn new(store: S) -> Self {
        let best = match store.read() {
            Ok(value) => {
                log::info!("Loaded high score {}", value);
                value
            }
            Err(e) => {
                log::warn!("High score unavailable, starting from 0: {}", e);
                0
            }
        };
        Self { store, best }
    }

    /// Best score seen this process (never decreases)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Record a finished run's score
    ///
    /// Writes to the store only when `score` beats the stored value. Returns
    /// true when the score is a new best.
    pub fn submit(&mut self, score: u64) -> bool {
        let stored = match self.store.read() {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Could not read high score, using cached {}: {}", self.best, e);
                self.best
            }
        };

        if score > stored {
            if let Err(e) = self.store.write(score) {
                log::warn!("Could not save high score {}: {}", score, e);
            }
        }

        let new_record = score > self.best;
        if new_record {
            log::info!("New high score: {} (was {})", score, self.best);
            self.best = score;
        }
        // Another writer may have raised the stored value
        self.best = self.best.max(stored);
        new_record
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
