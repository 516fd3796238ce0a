use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::core::MatchingError;
use crate::models::domain::{BandDefinition, CrossBandRule, Gender, MatchConfig, Player};

/// Request to add or edit a roster player
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayerRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub gender: Gender,
    pub grade: i32,
    pub level: i32,
    #[serde(default)]
    pub participating: bool,
}

/// Per-request overrides on top of the configured match defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchConfigOverrides {
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub tolerance_max: Option<i32>,
    #[serde(default)]
    pub band_definition: Option<BandDefinition>,
    #[serde(default)]
    pub cross_band_rule: Option<CrossBandRule>,
    #[serde(default)]
    pub coarse_split_level: Option<i32>,
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl MatchConfigOverrides {
    /// Merge onto `base`. The merged config is validated by the matcher.
    pub fn apply(&self, base: &MatchConfig) -> Result<MatchConfig, MatchingError> {
        let mut config = base.clone();

        if let Some(strategy) = &self.strategy {
            config.strategy = strategy.parse()?;
        }
        if let Some(tolerance_max) = self.tolerance_max {
            config.tolerance_max = tolerance_max;
        }
        if let Some(bands) = &self.band_definition {
            config.band_definition = bands.clone();
        }
        if let Some(rule) = self.cross_band_rule {
            config.cross_band_rule = rule;
        }
        if let Some(split) = self.coarse_split_level {
            config.coarse_split_level = split;
        }
        if self.random_seed.is_some() {
            config.random_seed = self.random_seed;
        }

        Ok(config)
    }
}

/// Request to compose matches for the roster's participating players
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateMatchesRequest {
    #[serde(flatten)]
    pub config: MatchConfigOverrides,
}

/// Request to compose matches for an explicit player list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeMatchesRequest {
    pub players: Vec<Player>,
    #[serde(flatten)]
    pub config: MatchConfigOverrides,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Strategy;

    #[test]
    fn test_overrides_apply() {
        let overrides: MatchConfigOverrides = serde_json::from_str(
            r#"{"strategy":"fixed_band","toleranceMax":2,"randomSeed":7}"#,
        )
        .unwrap();
        let config = overrides.apply(&MatchConfig::default()).unwrap();

        assert_eq!(config.strategy, Strategy::FixedBand);
        assert_eq!(config.tolerance_max, 2);
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.coarse_split_level, 2);
    }

    #[test]
    fn test_unknown_strategy_is_configuration_error() {
        let overrides = MatchConfigOverrides {
            strategy: Some("swiss".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            overrides.apply(&MatchConfig::default()),
            Err(MatchingError::Configuration(_))
        ));
    }

    #[test]
    fn test_player_request_validation() {
        let request = PlayerRequest {
            name: String::new(),
            gender: Gender::Male,
            grade: 2,
            level: 4,
            participating: true,
        };
        assert!(request.validate().is_err());
    }
}
