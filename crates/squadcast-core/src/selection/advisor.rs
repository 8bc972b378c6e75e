// Substitute and captain suggestions.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::roster::player::{Position, SquadRole};
use crate::scoring::eligibility::is_active_eligible;
use crate::selection::top_by;
use crate::squad::Squad;

/// Backups suggested per position.
pub const SUBSTITUTES_PER_POSITION: usize = 3;
/// Captain candidates suggested.
pub const CAPTAIN_CANDIDATES: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubstituteSuggestion {
    pub name: String,
    pub adjusted_score: f64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptainSuggestion {
    pub name: String,
    pub position: Position,
    pub captain_score: f64,
    pub next_opponent: String,
    pub fixture_difficulty: f64,
    /// Carried so the presenter can flag an unavailable captain.
    pub injured: bool,
    pub suspended: bool,
}

/// Best three fit bench or reserve players at every position.
///
/// Every position has an entry, possibly empty.
pub fn suggest_substitutes(squad: &Squad<'_>) -> BTreeMap<Position, Vec<SubstituteSuggestion>> {
    Position::ALL
        .into_iter()
        .map(|position| {
            let backups = squad
                .at_position(position)
                .filter(|p| p.role().is_backup() && is_active_eligible(&p.player));
            let picks = top_by(backups, SUBSTITUTES_PER_POSITION, |p| p.adjusted_score)
                .into_iter()
                .map(|p| SubstituteSuggestion {
                    name: p.name().to_string(),
                    adjusted_score: p.adjusted_score,
                    price: p.price(),
                })
                .collect();
            (position, picks)
        })
        .collect()
}

/// Best five starters by captain score.
///
/// Injured and suspended starters are not filtered out; the flags are
/// reported instead.
pub fn suggest_captains(squad: &Squad<'_>) -> Vec<CaptainSuggestion> {
    let starters = squad
        .members()
        .iter()
        .copied()
        .filter(|p| p.role() == SquadRole::Starter);

    top_by(starters, CAPTAIN_CANDIDATES, |p| p.captain_score)
        .into_iter()
        .map(|p| CaptainSuggestion {
            name: p.name().to_string(),
            position: p.position(),
            captain_score: p.captain_score,
            next_opponent: p.player.next_opponent.clone(),
            fixture_difficulty: p.player.fixture_difficulty,
            injured: p.player.injured,
            suspended: p.player.suspended,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::player::{Player, SquadRole};
    use crate::roster::tests::make_player;
    use crate::roster::Roster;
    use crate::scoring::metrics::compute_metrics;
    use crate::squad::build_squad;

    fn player(name: &str, position: Position, total: f64, role: SquadRole) -> Player {
        let mut p = make_player(name, position);
        p.points_total = total;
        p.squad_role = role;
        p
    }

    #[test]
    fn substitutes_only_fit_backups_top_three() {
        let mut roster = Roster::new(vec![
            player("Starter", Position::Defender, 90.0, SquadRole::Starter),
            player("B1", Position::Defender, 10.0, SquadRole::Bench),
            player("B2", Position::Defender, 40.0, SquadRole::Reserve),
            player("B3", Position::Defender, 30.0, SquadRole::Bench),
            player("B4", Position::Defender, 20.0, SquadRole::Bench),
            player("Hurt", Position::Defender, 80.0, SquadRole::Bench),
            player("Outsider", Position::Defender, 70.0, SquadRole::None),
        ])
        .unwrap();
        roster.set_injured("Hurt", true).unwrap();
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        let subs = suggest_substitutes(&build.squad);

        let defenders: Vec<&str> = subs[&Position::Defender].iter().map(|s| s.name.as_str()).collect();
        assert_eq!(defenders, vec!["B2", "B3", "B4"]);
        assert!((subs[&Position::Defender][0].price - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn substitutes_report_every_position() {
        let roster = Roster::new(vec![player("Only", Position::Forward, 10.0, SquadRole::Bench)]).unwrap();
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        let subs = suggest_substitutes(&build.squad);
        assert_eq!(subs.len(), 4);
        assert!(subs[&Position::Goalkeeper].is_empty());
        assert_eq!(subs[&Position::Forward].len(), 1);
    }

    #[test]
    fn captains_are_starters_ranked_by_captain_score() {
        let mut players = Vec::new();
        for i in 0..7 {
            players.push(player(&format!("S{i}"), Position::Midfielder, 10.0 * i as f64, SquadRole::Starter));
        }
        players.push(player("BenchStar", Position::Forward, 500.0, SquadRole::Bench));
        let scored = compute_metrics(&Roster::new(players).unwrap());
        let build = build_squad(&scored);
        let captains = suggest_captains(&build.squad);

        let names: Vec<&str> = captains.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["S6", "S5", "S4", "S3", "S2"]);
        for pair in captains.windows(2) {
            assert!(pair[0].captain_score >= pair[1].captain_score);
        }
    }

    #[test]
    fn easy_fixture_can_outrank_higher_adjusted_score() {
        let mut a = player("Steady", Position::Forward, 100.0, SquadRole::Starter);
        a.fixture_difficulty = 5.0;
        let mut b = player("Soft", Position::Forward, 90.0, SquadRole::Starter);
        b.fixture_difficulty = 0.0;
        let c = player("Floor", Position::Defender, 0.0, SquadRole::Starter);
        let scored = compute_metrics(&Roster::new(vec![a, b, c]).unwrap());
        let build = build_squad(&scored);
        let captains = suggest_captains(&build.squad);
        assert_eq!(captains[0].name, "Soft");
        assert!((captains[0].fixture_difficulty - 0.0).abs() < f64::EPSILON);
        assert_eq!(captains[0].next_opponent, "OPP");
    }

    #[test]
    fn injured_starter_still_offered_with_flag() {
        let mut roster = Roster::new(vec![
            player("Star", Position::Forward, 100.0, SquadRole::Starter),
            player("Other", Position::Defender, 10.0, SquadRole::Starter),
        ])
        .unwrap();
        roster.set_injured("Star", true).unwrap();
        let scored = compute_metrics(&roster);
        let build = build_squad(&scored);
        let captains = suggest_captains(&build.squad);
        assert_eq!(captains[0].name, "Star");
        assert!(captains[0].injured);
        assert!(!captains[0].suspended);
    }
}
