// Core algorithm exports
pub mod composer;
pub mod errors;
pub mod filters;
pub mod matcher;
pub mod pairing;
pub mod strategies;

pub use composer::{compose_matches, Composition};
pub use errors::MatchingError;
pub use filters::{participating_players, partition_by_gender, validate_player, GenderPools};
pub use matcher::{aggregate, generate_matches, generate_matches_with_rng, Matcher};
pub use pairing::{pair_by_level, Pair, Pairing};
pub use strategies::{compose_fixed_band, compose_simple_random};
