use crate::core::MatchingError;
use crate::models::{Gender, LevelBounds, Player};

/// Players flagged as participating in this session
///
/// This is the roster boundary of the pipeline; input order is kept.
#[inline]
pub fn participating_players(roster: &[Player]) -> Vec<&Player> {
    roster.iter().filter(|player| player.participating).collect()
}

/// Reject records the pairing stages cannot handle
pub fn validate_player(player: &Player, bounds: &LevelBounds) -> Result<(), MatchingError> {
    if player.gender == Gender::Unrecognized {
        return Err(MatchingError::InvalidPlayer {
            player_id: player.id,
            reason: "gender must be male or female".to_string(),
        });
    }

    if !bounds.contains(player.level) {
        return Err(MatchingError::InvalidPlayer {
            player_id: player.id,
            reason: format!(
                "level {} outside {}..={}",
                player.level, bounds.min, bounds.max
            ),
        });
    }

    Ok(())
}

/// Eligible players split by gender
#[derive(Debug, Default)]
pub struct GenderPools<'a> {
    pub male: Vec<&'a Player>,
    pub female: Vec<&'a Player>,
}

impl<'a> GenderPools<'a> {
    pub fn pool(&self, gender: Gender) -> &[&'a Player] {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
            Gender::Unrecognized => &[],
        }
    }
}

/// Split players into disjoint per-gender pools, keeping input order
pub fn partition_by_gender<'a, I>(players: I) -> Result<GenderPools<'a>, MatchingError>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut pools = GenderPools::default();

    for player in players {
        match player.gender {
            Gender::Male => pools.male.push(player),
            Gender::Female => pools.female.push(player),
            Gender::Unrecognized => {
                return Err(MatchingError::InvalidPlayer {
                    player_id: player.id,
                    reason: "gender must be male or female".to_string(),
                });
            }
        }
    }

    Ok(pools)
}
