use crate::core::pairing::Pairing;
use crate::models::{Gender, Match, Player};

/// Matches and unplaced players for one gender pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Composition {
    pub matches: Vec<Match>,
    pub unpaired: Vec<Player>,
}

/// Combine consecutive pairs into doubles matches
///
/// Pairs `i` and `i + 1` become one match: the first players of both pairs
/// form Team A, the second players form Team B. A trailing odd pair is broken
/// up and its players follow the pool's already unpaired players.
pub fn compose_matches(gender: Gender, pairing: Pairing<'_>) -> Composition {
    let mut chunks = pairing.pairs.chunks_exact(2);

    let matches: Vec<Match> = chunks
        .by_ref()
        .map(|chunk| {
            let (left, right) = (&chunk[0], &chunk[1]);
            Match::from_refs(gender, [left.first, right.first], [left.second, right.second])
        })
        .collect();

    let mut unpaired: Vec<Player> = pairing.unpaired.into_iter().cloned().collect();
    for pair in chunks.remainder() {
        unpaired.push(pair.first.clone());
        unpaired.push(pair.second.clone());
    }

    Composition { matches, unpaired }
}

/// Form matches four players at a time, in slice order
///
/// Returns the fewer-than-four players left over.
pub(crate) fn compose_in_fours<'a>(
    gender: Gender,
    players: &[&'a Player],
    matches: &mut Vec<Match>,
) -> Vec<&'a Player> {
    let mut chunks = players.chunks_exact(4);
    matches.extend(
        chunks
            .by_ref()
            .map(|c| Match::from_refs(gender, [c[0], c[1]], [c[2], c[3]])),
    );
    chunks.remainder().to_vec()
}
