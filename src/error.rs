//! Error taxonomy for the simulation and its storage backends

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Error, Debug)]
pub enum SimError {
    /// Every slot of a bounded pool is in use
    #[error("The {pool} pool is exhausted ({capacity} slots in use)")]
    PoolExhausted { pool: &'static str, capacity: usize },
    #[error("High score storage is unavailable: {0}")]
    PersistenceUnavailable(String),
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl SimError {
    /// True for failures of the high score backend (the game keeps running on these)
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            SimError::PersistenceUnavailable(_) | SimError::Io(_) | SimError::Json(_)
        )
    }
}
