use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Player;

/// Two same-gender players paired by level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pair<'a> {
    /// Lowest-level player still unpaired when the pair formed
    pub first: &'a Player,
    pub second: &'a Player,
    /// Window step at which a partner was found
    pub tolerance: u32,
}

impl Pair<'_> {
    pub fn level_gap(&self) -> u32 {
        self.first.level.abs_diff(self.second.level)
    }
}

/// Pairs in formation order plus players left without a partner
#[derive(Debug, Clone, Default)]
pub struct Pairing<'a> {
    pub pairs: Vec<Pair<'a>>,
    pub unpaired: Vec<&'a Player>,
}

/// Greedily pair a single-gender pool by level
///
/// Players are visited lowest level first (stable on input order). Each
/// visited player takes a random partner among the remaining players at the
/// smallest level gap `d` in `0..=tolerance_max` that yields any candidate.
/// A player with nobody within `tolerance_max` is shelved as unpaired, as is a
/// final odd player out.
///
/// The pool is held as an arena with a parallel `used` marker set; nothing is
/// removed from the arena while it is walked.
pub fn pair_by_level<'a, R>(pool: &[&'a Player], tolerance_max: u32, rng: &mut R) -> Pairing<'a>
where
    R: Rng + ?Sized,
{
    let mut arena: Vec<&'a Player> = pool.to_vec();
    arena.sort_by_key(|player| player.level);

    let mut used = vec![false; arena.len()];
    let mut remaining = arena.len();
    let mut candidates = Vec::new();
    let mut pairing = Pairing::default();

    for anchor in 0..arena.len() {
        if remaining <= 1 {
            break;
        }
        if used[anchor] {
            continue;
        }

        used[anchor] = true;
        remaining -= 1;
        let player = arena[anchor];

        let found = partner_candidates(&arena, &used, anchor, tolerance_max, &mut candidates);
        match (found, candidates.choose(rng)) {
            (Some(tolerance), Some(&partner)) => {
                used[partner] = true;
                remaining -= 1;
                pairing.pairs.push(Pair {
                    first: player,
                    second: arena[partner],
                    tolerance,
                });
            }
            _ => {
                tracing::debug!(
                    "No partner within {} levels for player {} (level {})",
                    tolerance_max,
                    player.id,
                    player.level
                );
                pairing.unpaired.push(player);
            }
        }
    }

    // Odd player out
    pairing.unpaired.extend(
        arena
            .iter()
            .zip(&used)
            .filter(|(_, used)| !**used)
            .map(|(player, _)| *player),
    );

    pairing
}

/// Fill `out` with arena indices of partners at the narrowest non-empty window
///
/// Everything before `anchor` is already used and the arena is sorted, so the
/// first free player after `anchor` sets the smallest gap `d`. Candidates are
/// the free players up to that gap, provided it is within `tolerance_max`.
fn partner_candidates(
    arena: &[&Player],
    used: &[bool],
    anchor: usize,
    tolerance_max: u32,
    out: &mut Vec<usize>,
) -> Option<u32> {
    out.clear();
    let level = arena[anchor].level;
    let mut free = (anchor + 1..arena.len()).filter(|&idx| !used[idx]);

    let nearest = free.next()?;
    let gap = arena[nearest].level.abs_diff(level);
    if gap > tolerance_max {
        return None;
    }

    out.push(nearest);
    out.extend(free.take_while(|&idx| arena[idx].level.abs_diff(level) <= gap));
    Some(gap)
}
