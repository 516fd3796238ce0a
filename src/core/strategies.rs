use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::composer::{compose_in_fours, Composition};
use crate::models::{BandDefinition, CrossBandRule, Gender, Match, Player};

/// Fixed-band composition for one gender pool
///
/// 1. Bucket players into the configured bands and shuffle each band.
/// 2. With the cross-band rule on, pair off lowest-band players against
///    partners drawn from the highest bands: each team is one low player and
///    one high player. Unused partners return to their own band. Low players
///    left without partners are unpaired; they never meet each other or the
///    middle bands.
/// 3. Every other band forms matches four at a time.
/// 4. Leftovers of all bands, plus players in no band, are shuffled and
///    matched four at a time regardless of level. The rest stay unpaired.
pub fn compose_fixed_band<R>(
    gender: Gender,
    pool: &[&Player],
    bands: &BandDefinition,
    rule: &CrossBandRule,
    rng: &mut R,
) -> Composition
where
    R: Rng + ?Sized,
{
    let mut banded: Vec<Vec<&Player>> = vec![Vec::new(); bands.len()];
    let mut leftovers: Vec<&Player> = Vec::new();

    for &player in pool {
        match bands.band_of(player.level) {
            Some(band) => banded[band].push(player),
            None => leftovers.push(player),
        }
    }
    for band in banded.iter_mut() {
        band.shuffle(rng);
    }

    let mut matches = Vec::new();
    let mut open_bands = 0..banded.len();
    let mut unmatched_low: Vec<&Player> = Vec::new();

    if rule.enabled && banded.len() > rule.partner_band_count {
        let partner_start = banded.len() - rule.partner_band_count;
        let low = std::mem::take(&mut banded[0]);

        let mut partners: Vec<(usize, &Player)> = Vec::new();
        for (band, players) in banded.iter_mut().enumerate().skip(partner_start) {
            partners.extend(players.drain(..).map(|player| (band, player)));
        }
        partners.shuffle(rng);

        let mut low_players = low.into_iter();
        let mut partner_players = partners.into_iter();
        while low_players.len() >= 2 && partner_players.len() >= 2 {
            if let (Some(l1), Some(l2), Some((_, h1)), Some((_, h2))) = (
                low_players.next(),
                low_players.next(),
                partner_players.next(),
                partner_players.next(),
            ) {
                matches.push(Match::from_refs(gender, [l1, h1], [l2, h2]));
            }
        }

        unmatched_low.extend(low_players);
        for (band, player) in partner_players {
            banded[band].push(player);
        }
        open_bands = 1..banded.len();
    }

    let cross_matches = matches.len();
    for band in open_bands {
        let rest = compose_in_fours(gender, &banded[band], &mut matches);
        leftovers.extend(rest);
    }

    leftovers.shuffle(rng);
    let in_band_matches = matches.len() - cross_matches;
    let rest = compose_in_fours(gender, &leftovers, &mut matches);

    tracing::debug!(
        "Fixed-band {} pool: {} cross-band, {} in-band, {} mixed matches, {} unpaired ({} low without partners)",
        gender,
        cross_matches,
        in_band_matches,
        matches.len() - cross_matches - in_band_matches,
        rest.len() + unmatched_low.len(),
        unmatched_low.len()
    );

    Composition {
        matches,
        unpaired: rest.into_iter().chain(unmatched_low).cloned().collect(),
    }
}

/// Simple random composition for one gender pool
///
/// Players at or below `split_level` form the low band, everyone else the
/// upper band. Bands never mix; each is shuffled and matched four at a time.
pub fn compose_simple_random<R>(
    gender: Gender,
    pool: &[&Player],
    split_level: i32,
    rng: &mut R,
) -> Composition
where
    R: Rng + ?Sized,
{
    let (mut low, mut upper): (Vec<&Player>, Vec<&Player>) =
        pool.iter().copied().partition(|player| player.level <= split_level);

    let mut composition = Composition::default();
    for band in [&mut low, &mut upper] {
        band.shuffle(rng);
        let rest = compose_in_fours(gender, &band[..], &mut composition.matches);
        composition.unpaired.extend(rest.into_iter().cloned());
    }

    composition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LevelBand;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create_pool(levels: &[i32]) -> Vec<Player> {
        levels
            .iter()
            .enumerate()
            .map(|(idx, &level)| Player {
                id: idx as u64 + 1,
                name: format!("Player {}", idx + 1),
                gender: Gender::Male,
                grade: 3,
                level,
                participating: true,
            })
            .collect()
    }

    fn band_label(bands: &BandDefinition, level: i32) -> Option<&str> {
        bands.band_of(level).map(|idx| bands.bands[idx].label.as_str())
    }

    #[test]
    fn test_low_band_teams_get_high_partners() {
        let players = create_pool(&[1, 2, 8, 9, 3, 4]);
        let pool: Vec<&Player> = players.iter().collect();
        let bands = BandDefinition::default();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let composition =
                compose_fixed_band(Gender::Male, &pool, &bands, &CrossBandRule::default(), &mut rng);

            let first = &composition.matches[0];
            for team in [&first.team_a, &first.team_b] {
                assert_eq!(band_label(&bands, team[0].level), Some("low"));
                assert!(matches!(band_label(&bands, team[1].level), Some("high") | Some("top")));
            }
            assert_eq!(composition.matches.len(), 1);
            assert_eq!(composition.unpaired.len(), 2);
        }
    }

    #[test]
    fn test_bands_match_within_themselves() {
        let players = create_pool(&[3, 3, 4, 4, 9, 9, 10, 10]);
        let pool: Vec<&Player> = players.iter().collect();
        let mut rng = StdRng::seed_from_u64(4);

        let composition = compose_fixed_band(
            Gender::Male,
            &pool,
            &BandDefinition::default(),
            &CrossBandRule::default(),
            &mut rng,
        );

        assert_eq!(composition.matches.len(), 2);
        for m in &composition.matches {
            let levels: Vec<i32> = m.players().map(|p| p.level).collect();
            let all_mid = levels.iter().all(|l| (3..=4).contains(l));
            let all_top = levels.iter().all(|l| (8..=10).contains(l));
            assert!(all_mid || all_top, "band mixed: {:?}", levels);
        }
        assert!(composition.unpaired.is_empty());
    }

    #[test]
    fn test_leftovers_mix_across_levels() {
        // One player per band plus an out-of-band player: only the mixed pass can match them
        let players = create_pool(&[1, 3, 5, 8, 12]);
        let pool: Vec<&Player> = players.iter().collect();
        let mut rng = StdRng::seed_from_u64(9);

        let composition = compose_fixed_band(
            Gender::Male,
            &pool,
            &BandDefinition::default(),
            &CrossBandRule::default(),
            &mut rng,
        );

        // The low player has no partners, so only the other four are mixed
        assert_eq!(composition.matches.len(), 1);
        assert!(composition.matches[0].players().all(|p| p.level != 1));
        assert_eq!(composition.unpaired.len(), 1);
        assert_eq!(composition.unpaired[0].level, 1);
    }

    #[test]
    fn test_low_band_without_partners_stays_unpaired() {
        let players = create_pool(&[1, 1, 2, 2, 3, 4]);
        let pool: Vec<&Player> = players.iter().collect();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let composition = compose_fixed_band(
                Gender::Male,
                &pool,
                &BandDefinition::default(),
                &CrossBandRule::default(),
                &mut rng,
            );

            assert!(composition.matches.is_empty(), "seed {}: {:?}", seed, composition.matches);
            assert_eq!(composition.unpaired.len(), 6);
        }
    }

    #[test]
    fn test_surplus_low_players_skip_mixed_pass() {
        // Two cross matches use all four partners; the extra low pair must not meet the mid band
        let players = create_pool(&[1, 1, 1, 1, 2, 2, 3, 4, 8, 9, 9, 10]);
        let pool: Vec<&Player> = players.iter().collect();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let composition = compose_fixed_band(
                Gender::Male,
                &pool,
                &BandDefinition::default(),
                &CrossBandRule::default(),
                &mut rng,
            );

            assert_eq!(composition.matches.len(), 2);
            for m in &composition.matches {
                for team in [&m.team_a, &m.team_b] {
                    assert!(team[0].level <= 2 && team[1].level >= 8);
                }
            }
            let mut unpaired: Vec<i32> = composition.unpaired.iter().map(|p| p.level).collect();
            unpaired.sort();
            assert_eq!(unpaired.len(), 4);
            assert_eq!(&unpaired[2..], &[3, 4]);
        }
    }

    #[test]
    fn test_rule_disabled_low_band_is_ordinary() {
        let players = create_pool(&[1, 1, 2, 2, 9, 9]);
        let pool: Vec<&Player> = players.iter().collect();
        let mut rng = StdRng::seed_from_u64(2);

        let composition = compose_fixed_band(
            Gender::Male,
            &pool,
            &BandDefinition::default(),
            &CrossBandRule::disabled(),
            &mut rng,
        );

        assert_eq!(composition.matches.len(), 1);
        assert!(composition.matches[0].players().all(|p| p.level <= 2));
        assert_eq!(composition.unpaired.len(), 2);
    }

    #[test]
    fn test_custom_bands() {
        let bands = BandDefinition::new(vec![
            LevelBand::new("novice", 1, 3),
            LevelBand::new("expert", 4, 10),
        ]);
        let rule = CrossBandRule {
            enabled: true,
            partner_band_count: 1,
        };
        let players = create_pool(&[1, 2, 6, 7]);
        let pool: Vec<&Player> = players.iter().collect();
        let mut rng = StdRng::seed_from_u64(0);

        let composition = compose_fixed_band(Gender::Male, &pool, &bands, &rule, &mut rng);

        assert_eq!(composition.matches.len(), 1);
        let m = &composition.matches[0];
        assert!(m.team_a[0].level <= 3 && m.team_a[1].level >= 4);
        assert!(m.team_b[0].level <= 3 && m.team_b[1].level >= 4);
    }

    #[test]
    fn test_simple_random_never_mixes_bands() {
        let players = create_pool(&[1, 1, 2, 5, 6, 7, 8, 9, 10]);
        let pool: Vec<&Player> = players.iter().collect();

        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let composition = compose_simple_random(Gender::Male, &pool, 2, &mut rng);

            // Low band has 3 players (no match), upper band 6 (one match, two left)
            assert_eq!(composition.matches.len(), 1);
            assert!(composition.matches[0].players().all(|p| p.level > 2));
            assert_eq!(composition.unpaired.len(), 5);
        }
    }
}
