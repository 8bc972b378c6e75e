// Closed formation table and positional quotas.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::warn;

use crate::roster::player::Position;

/// Slots per position for one formation. The goalkeeper slot is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Quota {
    pub defenders: usize,
    pub midfielders: usize,
    pub forwards: usize,
}

impl Quota {
    pub const GOALKEEPERS: usize = 1;

    /// Slots available at `position`.
    pub fn for_position(&self, position: Position) -> usize {
        match position {
            Position::Goalkeeper => Self::GOALKEEPERS,
            Position::Defender => self.defenders,
            Position::Midfielder => self.midfielders,
            Position::Forward => self.forwards,
        }
    }

    /// Total slots including the goalkeeper.
    pub fn total(&self) -> usize {
        Self::GOALKEEPERS + self.defenders + self.midfielders + self.forwards
    }
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GK {} / DEF {} / MID {} / FWD {}",
            Self::GOALKEEPERS,
            self.defenders,
            self.midfielders,
            self.forwards
        )
    }
}

/// The seven supported formations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formation {
    F343,
    F352,
    F433,
    F442,
    F451,
    F532,
    F541,
}

impl Formation {
    /// Table order. Tactic comparison breaks ties by this order.
    pub const ALL: [Formation; 7] = [
        Formation::F343,
        Formation::F352,
        Formation::F433,
        Formation::F442,
        Formation::F451,
        Formation::F532,
        Formation::F541,
    ];

    /// Used when a requested formation name is not in the table.
    pub const FALLBACK: Formation = Formation::F442;

    pub fn name(&self) -> &'static str {
        match self {
            Formation::F343 => "3-4-3",
            Formation::F352 => "3-5-2",
            Formation::F433 => "4-3-3",
            Formation::F442 => "4-4-2",
            Formation::F451 => "4-5-1",
            Formation::F532 => "5-3-2",
            Formation::F541 => "5-4-1",
        }
    }

    pub fn quota(&self) -> Quota {
        let (defenders, midfielders, forwards) = match self {
            Formation::F343 => (3, 4, 3),
            Formation::F352 => (3, 5, 2),
            Formation::F433 => (4, 3, 3),
            Formation::F442 => (4, 4, 2),
            Formation::F451 => (4, 5, 1),
            Formation::F532 => (5, 3, 2),
            Formation::F541 => (5, 4, 1),
        };
        Quota {
            defenders,
            midfielders,
            forwards,
        }
    }

    /// Exact lookup by name ("4-4-2"); surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Lookup by name, falling back to 4-4-2 for unknown names.
    pub fn resolve(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!(
                "unknown formation '{}', falling back to {}",
                name,
                Self::FALLBACK
            );
            Self::FALLBACK
        })
    }
}

impl fmt::Display for Formation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for Formation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_formation_fields_eleven() {
        for f in Formation::ALL {
            assert_eq!(f.quota().total(), 11, "{f} should field 11 players");
        }
    }

    #[test]
    fn names_roundtrip_through_lookup() {
        for f in Formation::ALL {
            assert_eq!(Formation::from_name(f.name()), Some(f));
        }
    }

    #[test]
    fn quota_digits_match_name() {
        let q = Formation::F352.quota();
        assert_eq!(q.for_position(Position::Goalkeeper), 1);
        assert_eq!(q.for_position(Position::Defender), 3);
        assert_eq!(q.for_position(Position::Midfielder), 5);
        assert_eq!(q.for_position(Position::Forward), 2);
    }

    #[test]
    fn unknown_name_resolves_to_442() {
        assert_eq!(Formation::from_name("4-2-4"), None);
        assert_eq!(Formation::resolve("4-2-4"), Formation::F442);
        assert_eq!(Formation::resolve(""), Formation::F442);
        assert_eq!(Formation::resolve(" 5-4-1 "), Formation::F541);
    }

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&Formation::F433).unwrap();
        assert_eq!(json, "\"4-3-3\"");
    }
}
