// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BandDefinition, CrossBandRule, Gender, LevelBand, LevelBounds, Match, MatchConfig, MatchResult,
    Player, PlayerId, Strategy,
};
pub use requests::{ComposeMatchesRequest, GenerateMatchesRequest, MatchConfigOverrides, PlayerRequest};
pub use responses::{ErrorResponse, HealthResponse, MatchesResponse, PlayerListResponse};
