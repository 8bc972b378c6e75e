// Role and availability edits applied to a loaded roster.
//
// Every successful edit bumps the roster revision. Scored snapshots taken
// before the edit report themselves stale via `ScoredRoster::is_current_for`.

use tracing::info;

use super::player::{Player, SquadRole};
use super::{Roster, RosterError};

impl Roster {
    /// Move a player into (or out of) the squad.
    pub fn set_role(&mut self, name: &str, role: SquadRole) -> Result<(), RosterError> {
        let player = self.player_mut(name)?;
        let previous = player.squad_role;
        player.squad_role = role;
        self.revision += 1;
        info!("role of '{}' changed: {} -> {}", name, previous, role);
        Ok(())
    }

    pub fn set_injured(&mut self, name: &str, injured: bool) -> Result<(), RosterError> {
        self.player_mut(name)?.injured = injured;
        self.revision += 1;
        info!("'{}' injured = {}", name, injured);
        Ok(())
    }

    pub fn set_suspended(&mut self, name: &str, suspended: bool) -> Result<(), RosterError> {
        self.player_mut(name)?.suspended = suspended;
        self.revision += 1;
        info!("'{}' suspended = {}", name, suspended);
        Ok(())
    }

    fn player_mut(&mut self, name: &str) -> Result<&mut Player, RosterError> {
        self.players
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| RosterError::UnknownPlayer {
                name: name.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::super::player::Position;
    use super::super::tests::make_player;
    use super::*;

    fn two_player_roster() -> Roster {
        Roster::new(vec![
            make_player("Alpha", Position::Defender),
            make_player("Beta", Position::Forward),
        ])
        .unwrap()
    }

    #[test]
    fn set_role_updates_player_and_revision() {
        let mut roster = two_player_roster();
        roster.set_role("Beta", SquadRole::Bench).unwrap();
        assert_eq!(roster.get("Beta").unwrap().squad_role, SquadRole::Bench);
        assert_eq!(roster.get("Alpha").unwrap().squad_role, SquadRole::None);
        assert_eq!(roster.revision(), 1);
    }

    #[test]
    fn set_role_unknown_player_errors_without_bump() {
        let mut roster = two_player_roster();
        let err = roster.set_role("Gamma", SquadRole::Starter).unwrap_err();
        match err {
            RosterError::UnknownPlayer { name } => assert_eq!(name, "Gamma"),
            other => panic!("expected UnknownPlayer, got: {other}"),
        }
        assert_eq!(roster.revision(), 0);
    }

    #[test]
    fn availability_edits_bump_revision() {
        let mut roster = two_player_roster();
        roster.set_injured("Alpha", true).unwrap();
        roster.set_suspended("Beta", true).unwrap();
        assert!(roster.get("Alpha").unwrap().injured);
        assert!(roster.get("Beta").unwrap().suspended);
        assert_eq!(roster.revision(), 2);
    }
}
