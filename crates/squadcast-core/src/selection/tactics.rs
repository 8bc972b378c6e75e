// Formation comparison.
//
// Scores every formation in the table against the squad as a whole. Unlike
// lineup selection this does not drop injured or suspended players.

use serde::Serialize;
use std::cmp::Ordering;
use tracing::debug;

use crate::roster::player::Position;
use crate::selection::formation::{Formation, Quota};
use crate::selection::top_by;
use crate::squad::Squad;

/// How many formations `compare_tactics` returns.
pub const TOP_TACTICS: usize = 3;

/// One formation's best achievable total from the squad.
#[derive(Debug, Clone, Serialize)]
pub struct TacticScore {
    pub formation: Formation,
    pub total_score: f64,
    pub quota: Quota,
}

/// Best total adjusted score a formation can field from the squad's
/// outfield players. The single goalkeeper slot is shared by every formation
/// and left out.
pub fn formation_score(squad: &Squad<'_>, formation: Formation) -> f64 {
    let quota = formation.quota();
    Position::OUTFIELD
        .into_iter()
        .map(|position| {
            top_by(
                squad.at_position(position),
                quota.for_position(position),
                |p| p.adjusted_score,
            )
            .iter()
            .map(|p| p.adjusted_score)
            .sum::<f64>()
        })
        .sum()
}

/// Rank every formation by its best total and return the top three.
///
/// Ties keep table order (3-4-3 before 3-5-2 and so on).
pub fn compare_tactics(squad: &Squad<'_>) -> Vec<TacticScore> {
    let mut scores: Vec<TacticScore> = Formation::ALL
        .into_iter()
        .map(|formation| TacticScore {
            formation,
            total_score: formation_score(squad, formation),
            quota: formation.quota(),
        })
        .collect();

    scores.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(Ordering::Equal)
    });
    scores.truncate(TOP_TACTICS);

    debug!(
        "best formations: {}",
        scores
            .iter()
            .map(|s| format!("{} ({:.3})", s.formation, s.total_score))
            .collect::<Vec<_>>()
            .join(", ")
    );
    scores
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
