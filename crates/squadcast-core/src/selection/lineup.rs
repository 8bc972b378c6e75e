// Best-lineup selection for a formation.

use serde::Serialize;
use tracing::{debug, info};

use crate::roster::player::Position;
use crate::scoring::eligibility::active_only;
use crate::scoring::metrics::ScoredPlayer;
use crate::selection::formation::Formation;
use crate::selection::top_by;
use crate::squad::{Advisory, Squad};

/// Players chosen for one formation, goalkeeper first, then defenders,
/// midfielders and forwards, each group in descending adjusted score.
#[derive(Debug, Clone, Serialize)]
pub struct Lineup<'a> {
    pub formation: Formation,
    pub players: Vec<&'a ScoredPlayer>,
}

impl<'a> Lineup<'a> {
    /// Selected players at one position.
    pub fn at_position(&self, position: Position) -> impl Iterator<Item = &'a ScoredPlayer> + '_ {
        self.players
            .iter()
            .copied()
            .filter(move |p| p.position() == position)
    }

    /// Positions filled below quota, as advisories for the presenter.
    pub fn shortfalls(&self) -> Vec<Advisory> {
        let quota = self.formation.quota();
        Position::ALL
            .into_iter()
            .filter_map(|position| {
                let required = quota.for_position(position);
                let selected = self.at_position(position).count();
                (selected < required).then_some(Advisory::IncompleteLineup {
                    position,
                    required,
                    selected,
                })
            })
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.players.len() == self.formation.quota().total()
    }

    pub fn total_score(&self) -> f64 {
        self.players.iter().map(|p| p.adjusted_score).sum()
    }
}

/// Fill the formation's quota from the active-eligible squad members.
///
/// Per position the top-N by adjusted score are taken, ties going to the
/// player listed first in the roster. A position with too few eligible
/// players is filled as far as possible; see [`Lineup::shortfalls`].
pub fn select_lineup<'a>(squad: &Squad<'a>, formation: Formation) -> Lineup<'a> {
    let available = active_only(squad.members().iter().copied());
    let quota = formation.quota();

    let mut players = Vec::with_capacity(quota.total());
    for position in Position::ALL {
        let picks = top_by(
            available.iter().copied().filter(|p| p.position() == position),
            quota.for_position(position),
            |p| p.adjusted_score,
        );
        debug!(
            "{}: {} of {} {} slots filled",
            formation,
            picks.len(),
            quota.for_position(position),
            position
        );
        players.extend(picks);
    }

    let lineup = Lineup { formation, players };
    if !lineup.is_complete() {
        info!(
            "lineup for {} is incomplete: {} of {} players",
            formation,
            lineup.players.len(),
            quota.total()
        );
    }
    lineup
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
