use thiserror::Error;

use crate::models::PlayerId;

/// Errors that reject a match generation run as a whole
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchingError {
    #[error("Invalid player {player_id}: {reason}")]
    InvalidPlayer { player_id: PlayerId, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}
