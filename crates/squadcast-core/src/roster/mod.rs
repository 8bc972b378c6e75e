// Roster model: the loaded players, their loader and the role editor.

pub mod editor;
pub mod loader;
pub mod player;

use std::collections::HashSet;

use player::Player;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("roster is missing required column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("duplicate player name `{name}` in roster")]
    DuplicatePlayer { name: String },

    #[error("no player named `{name}` in roster")]
    UnknownPlayer { name: String },

    #[error("validation error: {0}")]
    Validation(String),
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// The full, editable player list in source order.
///
/// Source order is significant: every ranking breaks ties by it. The
/// revision counter is bumped by each edit so scored snapshots can tell
/// whether they are stale.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    players: Vec<Player>,
    revision: u64,
}

impl Roster {
    /// Build a roster, rejecting duplicate names.
    pub fn new(players: Vec<Player>) -> Result<Self, RosterError> {
        let mut seen = HashSet::with_capacity(players.len());
        for p in &players {
            if !seen.insert(p.name.as_str()) {
                return Err(RosterError::DuplicatePlayer {
                    name: p.name.clone(),
                });
            }
        }
        Ok(Roster {
            players,
            revision: 0,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Number of edits applied since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
