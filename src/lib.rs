//! Doubles Matcher - match composer for club doubles tournament sessions
//!
//! This library assigns participating players to 2-vs-2 matches. Players are
//! split by gender, paired by skill level with a widening tolerance window,
//! and pairs of pairs become matches. Players who cannot be placed are
//! reported as unpaired.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{generate_matches, generate_matches_with_rng, Matcher, MatchingError};
pub use models::{Gender, Match, MatchConfig, MatchResult, Player, Strategy};
