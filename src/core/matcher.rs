use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{
    composer::{compose_matches, Composition},
    filters::{participating_players, partition_by_gender, validate_player},
    pairing::pair_by_level,
    strategies::{compose_fixed_band, compose_simple_random},
    MatchingError,
};
use crate::models::{Gender, MatchConfig, MatchResult, Player, Strategy};

/// Match generation orchestrator
///
/// # Pipeline Stages
/// 1. Roster filter (participating players only)
/// 2. Player validation
/// 3. Gender partition
/// 4. Per-gender composition with the configured strategy
/// 5. Aggregation, male pool first
#[derive(Debug, Clone)]
pub struct Matcher {
    config: MatchConfig,
    tolerance: u32,
}

impl Matcher {
    /// Build a matcher, rejecting an invalid configuration up front
    pub fn new(config: MatchConfig) -> Result<Self, MatchingError> {
        let tolerance = config.validate()?;
        Ok(Self { config, tolerance })
    }

    pub fn with_default_config() -> Self {
        let config = MatchConfig::default();
        let tolerance = config.tolerance_max.unsigned_abs();
        Self { config, tolerance }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Compose matches using the configured seed, or fresh entropy without one
    pub fn generate(&self, roster: &[Player]) -> Result<MatchResult, MatchingError> {
        let mut rng = match self.config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.generate_with_rng(roster, &mut rng)
    }

    /// Compose matches drawing all randomness from `rng`
    ///
    /// The call either fails before any pairing happens or returns a result
    /// placing every participating player exactly once.
    pub fn generate_with_rng<R>(&self, roster: &[Player], rng: &mut R) -> Result<MatchResult, MatchingError>
    where
        R: Rng + ?Sized,
    {
        let eligible = participating_players(roster);
        for player in &eligible {
            validate_player(player, &self.config.level_bounds)?;
        }

        let pools = partition_by_gender(eligible.iter().copied())?;

        let mut compositions = Vec::with_capacity(2);
        for gender in [Gender::Male, Gender::Female] {
            compositions.push(self.compose_pool(gender, pools.pool(gender), rng));
        }
        let result = aggregate(compositions);

        tracing::info!(
            "Composed {} matches ({} strategy) from {} eligible players, {} unpaired",
            result.matches.len(),
            self.config.strategy,
            eligible.len(),
            result.unpaired.len()
        );

        Ok(result)
    }

    fn compose_pool<R>(&self, gender: Gender, pool: &[&Player], rng: &mut R) -> Composition
    where
        R: Rng + ?Sized,
    {
        match self.config.strategy {
            Strategy::AdaptiveTolerance => {
                let pairing = pair_by_level(pool, self.tolerance, rng);
                tracing::debug!(
                    "Paired {} {} players into {} pairs, {} without partner",
                    pool.len(),
                    gender,
                    pairing.pairs.len(),
                    pairing.unpaired.len()
                );
                compose_matches(gender, pairing)
            }
            Strategy::FixedBand => compose_fixed_band(
                gender,
                pool,
                &self.config.band_definition,
                &self.config.cross_band_rule,
                rng,
            ),
            Strategy::SimpleRandom => {
                compose_simple_random(gender, pool, self.config.coarse_split_level, rng)
            }
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_config()
    }
}

/// Merge per-gender compositions in the given order
pub fn aggregate<I>(compositions: I) -> MatchResult
where
    I: IntoIterator<Item = Composition>,
{
    compositions
        .into_iter()
        .fold(MatchResult::default(), |mut result, composition| {
            result.matches.extend(composition.matches);
            result.unpaired.extend(composition.unpaired);
            result
        })
}

/// Compose matches for `players` under `config`
pub fn generate_matches(players: &[Player], config: &MatchConfig) -> Result<MatchResult, MatchingError> {
    Matcher::new(config.clone())?.generate(players)
}

/// Compose matches for `players` under `config` with an injected RNG
pub fn generate_matches_with_rng<R>(
    players: &[Player],
    config: &MatchConfig,
    rng: &mut R,
) -> Result<MatchResult, MatchingError>
where
    R: Rng + ?Sized,
{
    Matcher::new(config.clone())?.generate_with_rng(players, rng)
}
