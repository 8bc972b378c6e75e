// Active-selection eligibility.
//
// Injured or suspended players still count for metric normalization; they
// are only kept out of the lineup, substitute and transfer candidate lists.
// The tactic comparator and captain advisor deliberately skip this filter.

use crate::roster::player::Player;
use crate::scoring::metrics::ScoredPlayer;

/// A player may be picked for active duty iff neither injured nor suspended.
pub fn is_active_eligible(player: &Player) -> bool {
    !player.injured && !player.suspended
}

/// Keep only active-eligible players, preserving order.
pub fn active_only<'a, I>(players: I) -> Vec<&'a ScoredPlayer>
where
    I: IntoIterator<Item = &'a ScoredPlayer>,
{
    players
        .into_iter()
        .filter(|p| is_active_eligible(&p.player))
        .collect()
}
