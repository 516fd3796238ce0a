use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::MatchingError;

/// Stable roster identifier
pub type PlayerId = u64;

/// Match-legal gender categories
///
/// Roster values outside the two recognized categories deserialize to
/// `Unrecognized` and are rejected before pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    #[serde(other)]
    Unrecognized,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unrecognized => "unrecognized",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Roster record as supplied by the roster store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub gender: Gender,
    /// School grade / year. Used for roster listing only.
    pub grade: i32,
    /// Skill rank, smaller = lower skill
    pub level: i32,
    #[serde(default = "default_true")]
    pub participating: bool,
}

fn default_true() -> bool { true }

/// One doubles match: Team A vs Team B, all four players of one gender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub gender: Gender,
    pub team_a: [Player; 2],
    pub team_b: [Player; 2],
}

impl Match {
    pub(crate) fn from_refs(gender: Gender, team_a: [&Player; 2], team_b: [&Player; 2]) -> Self {
        Self {
            gender,
            team_a: team_a.map(Player::clone),
            team_b: team_b.map(Player::clone),
        }
    }

    /// All four players, Team A first
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.team_a.iter().chain(self.team_b.iter())
    }
}

/// Output of one match generation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matches: Vec<Match>,
    pub unpaired: Vec<Player>,
}

impl MatchResult {
    pub fn matches_for(&self, gender: Gender) -> impl Iterator<Item = &Match> {
        self.matches.iter().filter(move |m| m.gender == gender)
    }

    pub fn unpaired_for(&self, gender: Gender) -> impl Iterator<Item = &Player> {
        self.unpaired.iter().filter(move |p| p.gender == gender)
    }
}

/// Match composition strategy for a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Level-tolerance pairing, then pairs of pairs become matches
    #[default]
    AdaptiveTolerance,
    /// Static level bands with a low-band cross pairing rule
    FixedBand,
    /// Two coarse bands, shuffled four at a time
    SimpleRandom,
}

impl FromStr for Strategy {
    type Err = MatchingError;

    /// Accepts `adaptive_tolerance`, `adaptive-tolerance`, `AdaptiveTolerance`
    /// and friends, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "adaptivetolerance" | "adaptive" => Ok(Strategy::AdaptiveTolerance),
            "fixedband" => Ok(Strategy::FixedBand),
            "simplerandom" => Ok(Strategy::SimpleRandom),
            _ => Err(MatchingError::Configuration(format!(
                "unrecognized strategy '{}' (expected adaptive_tolerance, fixed_band or simple_random)",
                s
            ))),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::AdaptiveTolerance => "adaptive_tolerance",
            Strategy::FixedBand => "fixed_band",
            Strategy::SimpleRandom => "simple_random",
        };
        f.write_str(name)
    }
}

/// Inclusive level range mapped to a band label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelBand {
    pub label: String,
    #[serde(alias = "min_level")]
    pub min_level: i32,
    #[serde(alias = "max_level")]
    pub max_level: i32,
}

impl LevelBand {
    pub fn new(label: &str, min_level: i32, max_level: i32) -> Self {
        Self {
            label: label.to_string(),
            min_level,
            max_level,
        }
    }

    #[inline]
    pub fn contains(&self, level: i32) -> bool {
        level >= self.min_level && level <= self.max_level
    }
}

/// Ordered band layout for the fixed-band strategy, lowest band first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BandDefinition {
    pub bands: Vec<LevelBand>,
}

impl BandDefinition {
    pub fn new(bands: Vec<LevelBand>) -> Self {
        Self { bands }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Index of the band holding `level`, if any
    pub fn band_of(&self, level: i32) -> Option<usize> {
        self.bands.iter().position(|band| band.contains(level))
    }

    /// Bands must be non-empty, well-formed and strictly ascending
    pub fn validate(&self) -> Result<(), MatchingError> {
        if self.bands.is_empty() {
            return Err(MatchingError::Configuration(
                "band definition must contain at least one band".to_string(),
            ));
        }

        for band in &self.bands {
            if band.min_level > band.max_level {
                return Err(MatchingError::Configuration(format!(
                    "band '{}' has min level {} above max level {}",
                    band.label, band.min_level, band.max_level
                )));
            }
        }

        for window in self.bands.windows(2) {
            if window[1].min_level <= window[0].max_level {
                return Err(MatchingError::Configuration(format!(
                    "band '{}' overlaps or precedes band '{}'",
                    window[1].label, window[0].label
                )));
            }
        }

        Ok(())
    }
}

impl Default for BandDefinition {
    fn default() -> Self {
        Self::new(vec![
            LevelBand::new("low", 1, 2),
            LevelBand::new("mid", 3, 4),
            LevelBand::new("high", 5, 7),
            LevelBand::new("top", 8, 10),
        ])
    }
}

/// Constraint on the lowest fixed band
///
/// When enabled, every team holding a lowest-band player is completed by a
/// player from one of the `partner_band_count` highest bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossBandRule {
    pub enabled: bool,
    #[serde(default = "default_partner_band_count", alias = "partner_band_count")]
    pub partner_band_count: usize,
}

fn default_partner_band_count() -> usize { 2 }

impl CrossBandRule {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn validate(&self, bands: &BandDefinition) -> Result<(), MatchingError> {
        if !self.enabled {
            return Ok(());
        }
        if self.partner_band_count == 0 || self.partner_band_count >= bands.len() {
            return Err(MatchingError::Configuration(format!(
                "cross-band rule needs 1..{} partner bands for {} bands, got {}",
                bands.len().saturating_sub(1),
                bands.len(),
                self.partner_band_count
            )));
        }
        Ok(())
    }
}

impl Default for CrossBandRule {
    fn default() -> Self {
        Self {
            enabled: true,
            partner_band_count: default_partner_band_count(),
        }
    }
}

/// Inclusive range of legal player levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelBounds {
    pub min: i32,
    pub max: i32,
}

impl LevelBounds {
    #[inline]
    pub fn contains(&self, level: i32) -> bool {
        level >= self.min && level <= self.max
    }
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self { min: 1, max: 10 }
    }
}

/// Options for one match generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfig {
    pub strategy: Strategy,
    /// Widest level difference the adaptive pairer accepts
    pub tolerance_max: i32,
    /// Used only by `Strategy::FixedBand`
    pub band_definition: BandDefinition,
    /// Used only by `Strategy::FixedBand`
    pub cross_band_rule: CrossBandRule,
    /// Highest level of the low band. Used only by `Strategy::SimpleRandom`.
    pub coarse_split_level: i32,
    pub level_bounds: LevelBounds,
    pub random_seed: Option<u64>,
}

impl MatchConfig {
    /// Check the configuration and return the tolerance window as unsigned
    pub fn validate(&self) -> Result<u32, MatchingError> {
        let tolerance = u32::try_from(self.tolerance_max).map_err(|_| {
            MatchingError::Configuration(format!(
                "toleranceMax must be >= 0, got {}",
                self.tolerance_max
            ))
        })?;

        if self.level_bounds.min > self.level_bounds.max {
            return Err(MatchingError::Configuration(format!(
                "level bounds are inverted: {} > {}",
                self.level_bounds.min, self.level_bounds.max
            )));
        }

        if self.strategy == Strategy::FixedBand {
            self.band_definition.validate()?;
            self.cross_band_rule.validate(&self.band_definition)?;
        }

        Ok(tolerance)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            tolerance_max: 5,
            band_definition: BandDefinition::default(),
            cross_band_rule: CrossBandRule::default(),
            coarse_split_level: 2,
            level_bounds: LevelBounds::default(),
            random_seed: None,
        }
    }
}
