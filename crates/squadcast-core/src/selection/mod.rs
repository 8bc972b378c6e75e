// Constrained selection: lineups, tactic comparison, substitutes, captains
// and transfers.

pub mod advisor;
pub mod formation;
pub mod lineup;
pub mod tactics;
pub mod transfers;

use std::cmp::Ordering;

use crate::scoring::metrics::ScoredPlayer;

/// Sort players descending by `key`, keeping input order on ties, and keep
/// the first `limit`.
///
/// Callers pass players in roster order, so ties go to the first-listed
/// player.
pub(crate) fn top_by<'a, I, F>(players: I, limit: usize, key: F) -> Vec<&'a ScoredPlayer>
where
    I: IntoIterator<Item = &'a ScoredPlayer>,
    F: Fn(&ScoredPlayer) -> f64,
{
    let mut ranked: Vec<&ScoredPlayer> = players.into_iter().collect();
    ranked.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    ranked.truncate(limit);
    ranked
}
