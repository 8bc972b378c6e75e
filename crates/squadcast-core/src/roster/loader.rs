// Roster loading and sanitization.
//
// Reads a CSV export of the player spreadsheet. Headers may be the English
// snake_case names, their Title Case forms, or the Portuguese headers used by
// the league's own exports. Cells are coerced leniently: unknown booleans are
// false, empty or unparseable numbers are 0.

use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use super::player::{Player, Position, SquadRole};
use super::{Roster, RosterError};

// ---------------------------------------------------------------------------
// Column table
// ---------------------------------------------------------------------------

/// Required columns and every header accepted for each. Must stay in sync
/// with the serde aliases on `RawPlayerRow`.
const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("name", &["name", "Name", "Nome"]),
    ("position", &["position", "Position", "Posição"]),
    ("team", &["team", "Team", "Equipa"]),
    ("price", &["price", "Price", "Preço"]),
    ("points_total", &["points_total", "Points Total", "Pontos Totais"]),
    (
        "points_last_gameweek",
        &["points_last_gameweek", "Points Last Gameweek", "Pontos Última Jornada"],
    ),
    (
        "fixture_difficulty",
        &["fixture_difficulty", "Fixture Difficulty", "Dificuldade do Jogo"],
    ),
];

// ---------------------------------------------------------------------------
// Raw CSV serde struct (private)
// ---------------------------------------------------------------------------

/// One spreadsheet row with every cell kept as text, so coercion can be
/// lenient and logged per cell rather than failing the whole row.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPlayerRow {
    #[serde(alias = "Name", alias = "Nome")]
    name: String,
    #[serde(alias = "Position", alias = "Posição")]
    position: String,
    #[serde(alias = "Team", alias = "Equipa")]
    team: String,
    #[serde(alias = "Next Opponent", alias = "Próximo Adversário")]
    next_opponent: String,
    #[serde(alias = "Price", alias = "Preço")]
    price: String,
    #[serde(alias = "Points Total", alias = "Pontos Totais")]
    points_total: String,
    #[serde(alias = "Points Last Gameweek", alias = "Pontos Última Jornada")]
    points_last_gameweek: String,
    #[serde(alias = "Fixture Difficulty", alias = "Dificuldade do Jogo")]
    fixture_difficulty: String,
    #[serde(alias = "Injured", alias = "Lesionado")]
    injured: String,
    #[serde(alias = "Suspended", alias = "Expulso")]
    suspended: String,
    #[serde(alias = "Starter", alias = "Titular")]
    starter: String,
    #[serde(alias = "Bench", alias = "Suplente")]
    bench: String,
    #[serde(alias = "Reserve", alias = "Reserva")]
    reserve: String,
    /// Optional single-column role, preferred over the three flags.
    #[serde(alias = "Role")]
    role: String,
}

// ---------------------------------------------------------------------------
// Cell coercion helpers
// ---------------------------------------------------------------------------

/// Map a spreadsheet boolean cell. Anything unrecognized (including empty)
/// is false.
pub fn parse_flag(cell: &str) -> bool {
    matches!(
        cell.trim().to_lowercase().as_str(),
        "true" | "1" | "sim" | "yes" | "y"
    )
}

/// Parse a numeric cell, coercing empty or unparseable text to 0.
///
/// Non-finite values are passed through so the caller can reject the row.
fn parse_number(cell: &str, column: &str, player: &str) -> f64 {
    let trimmed = cell.trim();
    match trimmed.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            debug!(
                "coercing {} {} for '{}' to 0",
                if trimmed.is_empty() { "empty" } else { "unparseable" },
                column,
                player
            );
            0.0
        }
    }
}

fn check_required_columns(headers: &csv::StringRecord) -> Result<(), RosterError> {
    let present: HashSet<&str> = headers.iter().collect();
    for (column, accepted) in REQUIRED_COLUMNS {
        if !accepted.iter().any(|h| present.contains(h)) {
            return Err(RosterError::MissingColumn { column });
        }
    }
    Ok(())
}

fn row_to_player(raw: RawPlayerRow) -> Option<Player> {
    let name = raw.name.trim().to_string();
    if name.is_empty() {
        warn!("skipping roster row with empty name");
        return None;
    }

    let Some(position) = Position::from_str_pos(&raw.position) else {
        warn!("skipping '{}': unknown position '{}'", name, raw.position);
        return None;
    };

    let price = parse_number(&raw.price, "price", &name);
    let points_total = parse_number(&raw.points_total, "points_total", &name);
    let points_last_gameweek =
        parse_number(&raw.points_last_gameweek, "points_last_gameweek", &name);
    let fixture_difficulty = parse_number(&raw.fixture_difficulty, "fixture_difficulty", &name);

    let numbers = [price, points_total, points_last_gameweek, fixture_difficulty];
    if !numbers.iter().all(|v| v.is_finite()) {
        warn!("skipping '{}': non-finite numeric value", name);
        return None;
    }
    if numbers.iter().any(|v| *v < 0.0) {
        warn!("skipping '{}': negative price, points or difficulty", name);
        return None;
    }

    let squad_role = match SquadRole::from_str_role(&raw.role) {
        Some(role) if !raw.role.trim().is_empty() => role,
        _ => {
            let flags = [
                parse_flag(&raw.starter),
                parse_flag(&raw.bench),
                parse_flag(&raw.reserve),
            ];
            if flags.iter().filter(|f| **f).count() > 1 {
                warn!(
                    "'{}' has more than one squad flag set, using highest precedence",
                    name
                );
            }
            SquadRole::from_flags(flags[0], flags[1], flags[2])
        }
    };

    Some(Player {
        name,
        position,
        team: raw.team.trim().to_string(),
        next_opponent: raw.next_opponent.trim().to_string(),
        price,
        points_total,
        points_last_gameweek,
        fixture_difficulty,
        injured: parse_flag(&raw.injured),
        suspended: parse_flag(&raw.suspended),
        squad_role,
    })
}

// ---------------------------------------------------------------------------
// Loaders
// ---------------------------------------------------------------------------

fn load_players_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, RosterError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(rdr);

    let headers = reader
        .headers()
        .map_err(|e| RosterError::Csv {
            path: "<reader>".into(),
            source: e,
        })?
        .clone();
    check_required_columns(&headers)?;

    let mut players = Vec::new();
    for result in reader.deserialize::<RawPlayerRow>() {
        match result {
            Ok(raw) => {
                if let Some(player) = row_to_player(raw) {
                    players.push(player);
                }
            }
            Err(e) => {
                warn!("skipping malformed roster row: {}", e);
            }
        }
    }
    Ok(players)
}

/// Load and validate a roster from any reader. Exposed for testing and for
/// callers that already hold the CSV text.
pub fn load_roster_from_reader<R: Read>(rdr: R) -> Result<Roster, RosterError> {
    let players = load_players_from_reader(rdr)?;
    if players.is_empty() {
        return Err(RosterError::Validation(
            "roster CSV produced zero valid rows".into(),
        ));
    }
    Roster::new(players)
}

/// Load a roster from a CSV file.
pub fn load_roster(path: &Path) -> Result<Roster, RosterError> {
    let file = std::fs::File::open(path).map_err(|e| RosterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let roster = load_roster_from_reader(file).map_err(|e| match e {
        RosterError::Csv { source, .. } => RosterError::Csv {
            path: path.display().to_string(),
            source,
        },
        other => other,
    })?;
    info!("loaded {} players from {}", roster.len(), path.display());
    Ok(roster)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
