// Squad view over a scored snapshot, and the advisories raised while
// building or using it.

use serde::Serialize;
use std::fmt;
use tracing::warn;

use crate::roster::player::Position;
use crate::scoring::eligibility::is_active_eligible;
use crate::scoring::metrics::{ScoredPlayer, ScoredRoster};

// ---------------------------------------------------------------------------
// Advisories
// ---------------------------------------------------------------------------

/// Non-fatal condition reported alongside an otherwise valid result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Advisory {
    /// No player is marked starter, bench or reserve.
    EmptySquad,
    /// The squad holds no goalkeeper who is fit and not suspended.
    NoEligibleGoalkeeper,
    /// A lineup position could not be filled to its quota.
    IncompleteLineup {
        position: Position,
        required: usize,
        selected: usize,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::EmptySquad => write!(f, "no players selected in the squad"),
            Advisory::NoEligibleGoalkeeper => write!(f, "no eligible goalkeeper in the squad"),
            Advisory::IncompleteLineup {
                position,
                required,
                selected,
            } => write!(
                f,
                "incomplete lineup: {selected} of {required} {} slots filled",
                position.label().to_lowercase()
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Squad
// ---------------------------------------------------------------------------

/// Players whose role is starter, bench or reserve, in roster order.
///
/// Borrowed from a `ScoredRoster`; rebuild it after every new metric pass.
#[derive(Debug, Clone)]
pub struct Squad<'a> {
    members: Vec<&'a ScoredPlayer>,
}

impl<'a> Squad<'a> {
    /// Build a squad from an explicit member list. Order is kept as given,
    /// so pass players in roster order.
    pub fn from_members(members: Vec<&'a ScoredPlayer>) -> Self {
        Squad { members }
    }

    pub fn members(&self) -> &[&'a ScoredPlayer] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|p| p.name() == name)
    }

    /// Members at one position, in roster order.
    pub fn at_position(&self, position: Position) -> impl Iterator<Item = &'a ScoredPlayer> + '_ {
        self.members
            .iter()
            .copied()
            .filter(move |p| p.position() == position)
    }
}

/// A squad together with the advisories raised while building it.
#[derive(Debug, Clone)]
pub struct SquadBuild<'a> {
    pub squad: Squad<'a>,
    pub advisories: Vec<Advisory>,
}

/// Derive the current squad from a scored snapshot.
///
/// Never fails: an empty squad or a missing goalkeeper is reported as an
/// advisory and logged.
pub fn build_squad(scored: &ScoredRoster) -> SquadBuild<'_> {
    let members: Vec<&ScoredPlayer> = scored
        .players()
        .iter()
        .filter(|p| p.role().in_squad())
        .collect();

    let mut advisories = Vec::new();
    if members.is_empty() {
        warn!("squad is empty: no player marked starter, bench or reserve");
        advisories.push(Advisory::EmptySquad);
    }
    let has_keeper = members
        .iter()
        .any(|p| p.position() == Position::Goalkeeper && is_active_eligible(&p.player));
    if !has_keeper {
        warn!("squad has no eligible goalkeeper");
        advisories.push(Advisory::NoEligibleGoalkeeper);
    }

    SquadBuild {
        squad: Squad { members },
        advisories,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::SquadRole;
    use crate::roster::tests::make_player;
    use crate::roster::Roster;
    use crate::scoring::metrics::compute_metrics;

    fn roster_with_roles(entries: &[(&str, Position, SquadRole)]) -> Roster {
        let players = entries
            .iter()
            .map(|(name, pos, role)| {
                let mut p = make_player(name, *pos);
                p.squad_role = *role;
                p
            })
            .collect();
        Roster::new(players).unwrap()
    }

    #[test]
    fn squad_includes_every_non_none_role() {
        let roster = roster_with_roles(&[
            ("Keeper", Position::Goalkeeper, SquadRole::Starter),
            ("Outsider", Position::Defender, SquadRole::None),
            ("Sub", Position::Defender, SquadRole::Bench),
            ("Spare", Position::Forward, SquadRole::Reserve),
        ]);
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);

        let names: Vec<&str> = build.squad.members().iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["Keeper", "Sub", "Spare"]);
        assert!(build.advisories.is_empty());
        assert!(!build.squad.contains("Outsider"));
    }

    #[test]
    fn empty_squad_is_advisory_not_error() {
        let roster = roster_with_roles(&[("Outsider", Position::Goalkeeper, SquadRole::None)]);
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        assert!(build.squad.is_empty());
        assert!(build.advisories.contains(&Advisory::EmptySquad));
        assert!(build.advisories.contains(&Advisory::NoEligibleGoalkeeper));
    }

    #[test]
    fn injured_only_goalkeeper_raises_advisory() {
        let mut roster = roster_with_roles(&[
            ("Keeper", Position::Goalkeeper, SquadRole::Starter),
            ("Back", Position::Defender, SquadRole::Starter),
        ]);
        roster.set_injured("Keeper", true).unwrap();
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        assert_eq!(build.squad.len(), 2);
        assert_eq!(build.advisories, vec![Advisory::NoEligibleGoalkeeper]);
    }

    #[test]
    fn at_position_filters_in_roster_order() {
        let roster = roster_with_roles(&[
            ("D1", Position::Defender, SquadRole::Starter),
            ("M1", Position::Midfielder, SquadRole::Starter),
            ("D2", Position::Defender, SquadRole::Bench),
        ]);
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        let defenders: Vec<&str> = build
            .squad
            .at_position(Position::Defender)
            .map(|p| p.name())
            .collect();
        assert_eq!(defenders, vec!["D1", "D2"]);
    }

    #[test]
    fn advisory_display_is_readable() {
        let a = Advisory::IncompleteLineup {
            position: Position::Defender,
            required: 4,
            selected: 2,
        };
        assert_eq!(a.to_string(), "incomplete lineup: 2 of 4 defender slots filled");
    }
}
