// Player records and the closed position / squad-role categories.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Football positions used for formation quotas.
///
/// Declaration order is the display order of a lineup (goalkeeper first),
/// and the derived `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Position {
    /// Every position, in lineup order.
    pub const ALL: [Position; 4] = [
        Position::Goalkeeper,
        Position::Defender,
        Position::Midfielder,
        Position::Forward,
    ];

    /// The positions a formation varies.
    pub const OUTFIELD: [Position; 3] = [Position::Defender, Position::Midfielder, Position::Forward];

    /// Parse a position string into a Position enum.
    ///
    /// Accepts full English names, the usual fantasy abbreviations
    /// (GK/GKP, DEF, MID, FWD/FW) and the Portuguese names used by
    /// spreadsheet exports ("Goleiro", "Defesa", "Médio", "Avançado").
    pub fn from_str_pos(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "goalkeeper" | "gk" | "gkp" | "goleiro" | "guarda-redes" | "gr" => {
                Some(Position::Goalkeeper)
            }
            "defender" | "def" | "d" | "defesa" => Some(Position::Defender),
            "midfielder" | "mid" | "m" | "médio" | "medio" => Some(Position::Midfielder),
            "forward" | "fwd" | "fw" | "f" | "avançado" | "avancado" => Some(Position::Forward),
            _ => None,
        }
    }

    /// Return the display string for this position.
    pub fn display_str(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "GK",
            Position::Defender => "DEF",
            Position::Midfielder => "MID",
            Position::Forward => "FWD",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Position::Goalkeeper => "Goalkeeper",
            Position::Defender => "Defender",
            Position::Midfielder => "Midfielder",
            Position::Forward => "Forward",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_str())
    }
}

/// A player's membership of the manager's squad.
///
/// A single field rather than three flags, so a player can never be a
/// starter and on the bench at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SquadRole {
    Starter,
    Bench,
    Reserve,
    #[default]
    None,
}

impl SquadRole {
    /// Collapse the three spreadsheet flags into one role.
    ///
    /// Precedence is starter, then bench, then reserve.
    pub fn from_flags(starter: bool, bench: bool, reserve: bool) -> Self {
        if starter {
            SquadRole::Starter
        } else if bench {
            SquadRole::Bench
        } else if reserve {
            SquadRole::Reserve
        } else {
            SquadRole::None
        }
    }

    /// Parse a role name from the roster's optional `role` column.
    pub fn from_str_role(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "starter" | "titular" => Some(SquadRole::Starter),
            "bench" | "suplente" => Some(SquadRole::Bench),
            "reserve" | "reserva" => Some(SquadRole::Reserve),
            "none" | "" => Some(SquadRole::None),
            _ => None,
        }
    }

    /// Whether this role puts the player in the squad.
    pub fn in_squad(&self) -> bool {
        !matches!(self, SquadRole::None)
    }

    /// Whether the player sits on the bench or in reserve.
    pub fn is_backup(&self) -> bool {
        matches!(self, SquadRole::Bench | SquadRole::Reserve)
    }

    pub fn label(&self) -> &'static str {
        match self {
            SquadRole::Starter => "starter",
            SquadRole::Bench => "bench",
            SquadRole::Reserve => "reserve",
            SquadRole::None => "none",
        }
    }
}

impl fmt::Display for SquadRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One athlete as loaded from the roster source.
///
/// Only `squad_role`, `injured` and `suspended` change after loading, and
/// only through [`crate::roster::Roster`]'s editor methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub position: Position,
    pub team: String,
    pub next_opponent: String,
    pub price: f64,
    pub points_total: f64,
    pub points_last_gameweek: f64,
    pub fixture_difficulty: f64,
    pub injured: bool,
    pub suspended: bool,
    pub squad_role: SquadRole,
}

impl Player {
    /// `1 / (fixture_difficulty + 1)`: 1.0 for the easiest fixture,
    /// approaching 0 as difficulty grows.
    pub fn fixture_ease(&self) -> f64 {
        1.0 / (self.fixture_difficulty + 1.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_parses_english_and_abbreviations() {
        assert_eq!(Position::from_str_pos("Goalkeeper"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("gkp"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos(" DEF "), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("mid"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("FW"), Some(Position::Forward));
    }

    #[test]
    fn position_parses_portuguese_names() {
        assert_eq!(Position::from_str_pos("Goleiro"), Some(Position::Goalkeeper));
        assert_eq!(Position::from_str_pos("Defesa"), Some(Position::Defender));
        assert_eq!(Position::from_str_pos("Médio"), Some(Position::Midfielder));
        assert_eq!(Position::from_str_pos("Avançado"), Some(Position::Forward));
    }

    #[test]
    fn unknown_position_is_none() {
        assert_eq!(Position::from_str_pos("Sweeper"), None);
        assert_eq!(Position::from_str_pos(""), None);
    }

    #[test]
    fn positions_order_goalkeeper_first() {
        let mut shuffled = vec![
            Position::Forward,
            Position::Goalkeeper,
            Position::Midfielder,
            Position::Defender,
        ];
        shuffled.sort();
        assert_eq!(shuffled, Position::ALL.to_vec());
    }

    #[test]
    fn role_from_flags_precedence() {
        assert_eq!(SquadRole::from_flags(true, true, true), SquadRole::Starter);
        assert_eq!(SquadRole::from_flags(false, true, true), SquadRole::Bench);
        assert_eq!(SquadRole::from_flags(false, false, true), SquadRole::Reserve);
        assert_eq!(SquadRole::from_flags(false, false, false), SquadRole::None);
    }

    #[test]
    fn role_membership_predicates() {
        assert!(SquadRole::Starter.in_squad());
        assert!(!SquadRole::Starter.is_backup());
        assert!(SquadRole::Bench.is_backup());
        assert!(SquadRole::Reserve.is_backup());
        assert!(!SquadRole::None.in_squad());
    }

    #[test]
    fn role_parses_column_names() {
        assert_eq!(SquadRole::from_str_role("Bench"), Some(SquadRole::Bench));
        assert_eq!(SquadRole::from_str_role("titular"), Some(SquadRole::Starter));
        assert_eq!(SquadRole::from_str_role("captain"), None);
    }

    #[test]
    fn fixture_ease_of_zero_difficulty_is_one() {
        let p = Player {
            name: "A".into(),
            position: Position::Forward,
            team: "T".into(),
            next_opponent: "O".into(),
            price: 5.0,
            points_total: 0.0,
            points_last_gameweek: 0.0,
            fixture_difficulty: 0.0,
            injured: false,
            suspended: false,
            squad_role: SquadRole::None,
        };
        assert!((p.fixture_ease() - 1.0).abs() < f64::EPSILON);
    }
}
