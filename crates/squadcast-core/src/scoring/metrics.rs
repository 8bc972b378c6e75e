// Derived player metrics: adjusted score, value per cost, captain score.
//
// A metric pass always covers the whole roster at once and produces an
// immutable `ScoredRoster`. Edits go to the `Roster`, never to a snapshot,
// so derived data can only be stale by revision, never half-updated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ScoringWeights;
use crate::roster::player::{Player, Position, SquadRole};
use crate::roster::Roster;

// ---------------------------------------------------------------------------
// Range statistics
// ---------------------------------------------------------------------------

/// Minimum and maximum of a metric across the roster.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRange {
    pub min: f64,
    pub max: f64,
}

/// Compute min and max for a slice of values.
///
/// Returns `ScoreRange { min: 0.0, max: 0.0 }` for an empty slice.
pub fn compute_range(values: &[f64]) -> ScoreRange {
    if values.is_empty() {
        return ScoreRange { min: 0.0, max: 0.0 };
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    ScoreRange { min, max }
}

/// Min-max scale a value into [0, 1].
///
/// Returns 0.0 when every value in the range is equal, instead of dividing
/// by zero.
pub fn min_max_normalize(value: f64, range: &ScoreRange) -> f64 {
    let span = range.max - range.min;
    if span <= 0.0 {
        return 0.0;
    }
    ((value - range.min) / span).clamp(0.0, 1.0)
}

// ---------------------------------------------------------------------------
// Per-player formulas
// ---------------------------------------------------------------------------

/// Pre-normalization adjusted score: weighted season points, last gameweek
/// points and next-fixture ease.
pub fn raw_adjusted_score(player: &Player, weights: &ScoringWeights) -> f64 {
    let w = &weights.adjusted_score;
    player.points_total * w.points_total
        + player.points_last_gameweek * w.points_last_gameweek
        + player.fixture_ease() * w.fixture_ease
}

/// `adjusted_score / price`, with non-positive prices replaced by
/// `min_price`.
pub fn value_per_cost(adjusted_score: f64, price: f64, weights: &ScoringWeights) -> f64 {
    let divisor = if price > 0.0 {
        price
    } else {
        weights.value.min_price
    };
    adjusted_score / divisor
}

/// Captaincy blend of normalized adjusted score and fixture ease. Not
/// re-normalized.
pub fn captain_score(adjusted_score: f64, fixture_ease: f64, weights: &ScoringWeights) -> f64 {
    let w = &weights.captain_score;
    adjusted_score * w.adjusted_score + fixture_ease * w.fixture_ease
}

// ---------------------------------------------------------------------------
// Scored snapshot
// ---------------------------------------------------------------------------

/// A player together with the metrics of one scoring pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredPlayer {
    #[serde(flatten)]
    pub player: Player,
    /// Position in the source roster; the tie-breaker for every ranking.
    pub roster_index: usize,
    pub raw_score: f64,
    pub adjusted_score: f64,
    pub value_per_cost: f64,
    pub captain_score: f64,
}

impl ScoredPlayer {
    pub fn name(&self) -> &str {
        &self.player.name
    }

    pub fn position(&self) -> Position {
        self.player.position
    }

    pub fn price(&self) -> f64 {
        self.player.price
    }

    pub fn role(&self) -> SquadRole {
        self.player.squad_role
    }

    pub fn fixture_ease(&self) -> f64 {
        self.player.fixture_ease()
    }
}

/// Immutable roster-with-metrics produced by one metric pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredRoster {
    players: Vec<ScoredPlayer>,
    revision: u64,
    computed_at: DateTime<Utc>,
    #[serde(skip)]
    weights: ScoringWeights,
}

impl ScoredRoster {
    /// Scored players in source roster order.
    pub fn players(&self) -> &[ScoredPlayer] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScoredPlayer> {
        self.players.iter().find(|p| p.name() == name)
    }

    /// Roster revision this snapshot was computed from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn computed_at(&self) -> DateTime<Utc> {
        self.computed_at
    }

    /// Weights used for this pass; the tiered transfer advisor reuses them.
    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Whether no edit has been applied to `roster` since this snapshot.
    pub fn is_current_for(&self, roster: &Roster) -> bool {
        self.revision == roster.revision()
    }
}

// ---------------------------------------------------------------------------
// Top-level entry point
// ---------------------------------------------------------------------------

/// Score the whole roster with the stock weights.
pub fn compute_metrics(roster: &Roster) -> ScoredRoster {
    compute_metrics_with(roster, &ScoringWeights::default())
}

/// Score the whole roster.
///
/// Steps:
/// 1. Raw adjusted score per player.
/// 2. Min-max range of the raw scores over the entire roster.
/// 3. Normalize, then derive value per cost and captain score from the
///    normalized score.
pub fn compute_metrics_with(roster: &Roster, weights: &ScoringWeights) -> ScoredRoster {
    let raw_scores: Vec<f64> = roster
        .players()
        .iter()
        .map(|p| raw_adjusted_score(p, weights))
        .collect();
    let range = compute_range(&raw_scores);

    if roster.len() > 1 && range.max == range.min {
        debug!(
            "all {} raw scores equal ({}), adjusted scores default to 0",
            roster.len(),
            range.min
        );
    }

    let players: Vec<ScoredPlayer> = roster
        .players()
        .iter()
        .zip(raw_scores)
        .enumerate()
        .map(|(roster_index, (player, raw_score))| {
            let adjusted_score = min_max_normalize(raw_score, &range);
            ScoredPlayer {
                player: player.clone(),
                roster_index,
                raw_score,
                adjusted_score,
                value_per_cost: value_per_cost(adjusted_score, player.price, weights),
                captain_score: captain_score(adjusted_score, player.fixture_ease(), weights),
            }
        })
        .collect();

    debug!(
        "scored {} players at revision {} (raw range {:.3}..{:.3})",
        players.len(),
        roster.revision(),
        range.min,
        range.max
    );

    ScoredRoster {
        players,
        revision: roster.revision(),
        computed_at: Utc::now(),
        weights: weights.clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::tests::make_player;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn player_with(name: &str, total: f64, last: f64, difficulty: f64, price: f64) -> Player {
        let mut p = make_player(name, Position::Midfielder);
        p.points_total = total;
        p.points_last_gameweek = last;
        p.fixture_difficulty = difficulty;
        p.price = price;
        p
    }

    #[test]
    fn raw_score_formula() {
        // 100*0.5 + 10*0.3 + (1/(1+1))*0.2 = 50 + 3 + 0.1
        let p = player_with("A", 100.0, 10.0, 1.0, 5.0);
        let raw = raw_adjusted_score(&p, &ScoringWeights::default());
        assert!(approx_eq(raw, 53.1, 1e-10));
    }

    #[test]
    fn normalized_scores_span_unit_interval() {
        let roster = Roster::new(vec![
            player_with("Low", 10.0, 0.0, 3.0, 4.0),
            player_with("Mid", 50.0, 5.0, 2.0, 6.0),
            player_with("High", 120.0, 12.0, 1.0, 9.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);

        for p in scored.players() {
            assert!((0.0..=1.0).contains(&p.adjusted_score));
        }
        assert!(approx_eq(scored.get("Low").unwrap().adjusted_score, 0.0, 1e-12));
        assert!(approx_eq(scored.get("High").unwrap().adjusted_score, 1.0, 1e-12));

        let mid = scored.get("Mid").unwrap();
        let expected = (mid.raw_score - scored.get("Low").unwrap().raw_score)
            / (scored.get("High").unwrap().raw_score - scored.get("Low").unwrap().raw_score);
        assert!(approx_eq(mid.adjusted_score, expected, 1e-12));
    }

    #[test]
    fn equal_raw_scores_normalize_to_zero() {
        let roster = Roster::new(vec![
            player_with("A", 40.0, 4.0, 2.0, 5.0),
            player_with("B", 40.0, 4.0, 2.0, 7.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);
        for p in scored.players() {
            assert_eq!(p.adjusted_score, 0.0);
            assert!(!p.adjusted_score.is_nan());
            assert_eq!(p.value_per_cost, 0.0);
        }
    }

    #[test]
    fn tiny_nonzero_range_still_normalizes() {
        let range = ScoreRange {
            min: 1.0,
            max: 1.0 + 1e-13,
        };
        assert!(approx_eq(min_max_normalize(1.0 + 1e-13, &range), 1.0, 1e-9));
        assert_eq!(min_max_normalize(1.0, &range), 0.0);
    }

    #[test]
    fn single_player_roster_scores_zero() {
        let roster = Roster::new(vec![player_with("Solo", 80.0, 8.0, 1.0, 5.0)]).unwrap();
        let scored = compute_metrics(&roster);
        assert_eq!(scored.players()[0].adjusted_score, 0.0);
    }

    #[test]
    fn empty_roster_yields_empty_snapshot() {
        let scored = compute_metrics(&Roster::default());
        assert!(scored.is_empty());
    }

    #[test]
    fn zero_price_uses_floor() {
        let roster = Roster::new(vec![
            player_with("Free", 100.0, 10.0, 0.0, 0.0),
            player_with("Cheap", 0.0, 0.0, 4.0, 1.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);
        let free = scored.get("Free").unwrap();
        assert!(approx_eq(free.adjusted_score, 1.0, 1e-12));
        assert!(approx_eq(free.value_per_cost, 100.0, 1e-9));
        assert!(free.value_per_cost.is_finite());
    }

    #[test]
    fn value_per_cost_divides_by_price() {
        let roster = Roster::new(vec![
            player_with("Top", 100.0, 10.0, 1.0, 8.0),
            player_with("Bottom", 0.0, 0.0, 9.0, 4.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);
        assert!(approx_eq(scored.get("Top").unwrap().value_per_cost, 1.0 / 8.0, 1e-12));
    }

    #[test]
    fn captain_score_blends_normalized_score_and_ease() {
        let roster = Roster::new(vec![
            player_with("Top", 100.0, 10.0, 1.0, 8.0),
            player_with("Bottom", 0.0, 0.0, 3.0, 4.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);
        // 1.0*0.6 + 0.5*0.4
        assert!(approx_eq(scored.get("Top").unwrap().captain_score, 0.8, 1e-12));
        // 0.0*0.6 + 0.25*0.4
        assert!(approx_eq(scored.get("Bottom").unwrap().captain_score, 0.1, 1e-12));
    }

    #[test]
    fn injured_players_still_scored() {
        let mut hurt = player_with("Hurt", 200.0, 20.0, 1.0, 9.0);
        hurt.injured = true;
        let roster = Roster::new(vec![hurt, player_with("Fit", 10.0, 1.0, 1.0, 5.0)]).unwrap();
        let scored = compute_metrics(&roster);
        assert!(approx_eq(scored.get("Hurt").unwrap().adjusted_score, 1.0, 1e-12));
    }

    #[test]
    fn snapshot_tracks_roster_revision() {
        let mut roster = Roster::new(vec![
            player_with("A", 10.0, 1.0, 1.0, 5.0),
            player_with("B", 20.0, 2.0, 1.0, 5.0),
        ])
        .unwrap();
        let before = compute_metrics(&roster);
        assert!(before.is_current_for(&roster));

        roster.set_role("A", SquadRole::Starter).unwrap();
        assert!(!before.is_current_for(&roster));

        let after = compute_metrics(&roster);
        assert!(after.is_current_for(&roster));
        assert_eq!(after.get("A").unwrap().role(), SquadRole::Starter);
    }

    #[test]
    fn roster_index_follows_source_order() {
        let roster = Roster::new(vec![
            player_with("First", 10.0, 1.0, 1.0, 5.0),
            player_with("Second", 20.0, 2.0, 1.0, 5.0),
        ])
        .unwrap();
        let scored = compute_metrics(&roster);
        assert_eq!(scored.get("First").unwrap().roster_index, 0);
        assert_eq!(scored.get("Second").unwrap().roster_index, 1);
    }
}
