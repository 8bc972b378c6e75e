// Library root: re-exports all modules so integration tests and the CLI
// can reach the engine's public API.

pub mod config;
pub mod roster;
pub mod scoring;
pub mod selection;
pub mod squad;

pub use config::{load_config, Config, ConfigError, ScoringWeights};
pub use roster::loader::{load_roster, load_roster_from_reader};
pub use roster::player::{Player, Position, SquadRole};
pub use roster::{Roster, RosterError};
pub use scoring::metrics::{compute_metrics, compute_metrics_with, ScoredPlayer, ScoredRoster};
pub use selection::advisor::{suggest_captains, suggest_substitutes, CaptainSuggestion, SubstituteSuggestion};
pub use selection::formation::{Formation, Quota};
pub use selection::lineup::{select_lineup, Lineup};
pub use selection::tactics::{compare_tactics, TacticScore};
pub use selection::transfers::{
    suggest_transfer_tiers, suggest_transfers, AdvisorError, TierOptions, TransferSuggestion,
    TransferTiers,
};
pub use squad::{build_squad, Advisory, Squad, SquadBuild};
