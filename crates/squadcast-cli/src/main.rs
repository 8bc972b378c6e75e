// squadcast entry point.
//
// Startup sequence:
// 1. Parse the command line
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config, copying defaults on first run
// 4. Load the roster and run one metric pass
// 5. Build the squad and dispatch the subcommand

mod render;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use squadcast_core::{
    build_squad, compare_tactics, compute_metrics_with, load_config, load_roster,
    select_lineup, suggest_captains, suggest_substitutes, suggest_transfer_tiers,
    suggest_transfers, Advisory, CaptainSuggestion, Config, Formation, Lineup, Position,
    ScoredRoster, SubstituteSuggestion, SquadBuild, TacticScore, TierOptions,
    TransferSuggestion,
};

use render::OutputMode;

/// Fantasy-football squad advisor
#[derive(Parser, Debug)]
#[command(name = "squadcast")]
#[command(version, about = "Lineup, tactics, captain and transfer advice for a fantasy squad")]
struct Cli {
    /// Roster CSV (defaults to data_paths.roster from strategy.toml)
    #[arg(long, global = true, env = "SQUADCAST_ROSTER")]
    roster: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Directory holding config/, defaults/ and logs/
    #[arg(long, global = true, default_value = ".")]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Best lineup for a formation, plus suggested substitutes
    Lineup {
        /// Formation name, e.g. 4-4-2 (defaults to the configured one)
        #[arg(long)]
        formation: Option<String>,
    },
    /// Top three formations for the current squad
    Tactics,
    /// Top five captain options among the starters
    Captain,
    /// Transfer suggestions for one position
    Transfers {
        #[arg(long, value_parser = parse_position)]
        position: Position,
        /// Available budget (defaults to the configured one)
        #[arg(long)]
        budget: Option<f64>,
        /// Rank candidates into top-performer and cost-benefit tiers
        #[arg(long)]
        tiers: bool,
        /// With --tiers, keep only clear upgrades on the weakest incumbent
        #[arg(long, requires = "tiers")]
        upgrades_only: bool,
    },
    /// Everything above, with transfers for every position
    Report,
}

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_str_pos(s).ok_or_else(|| format!("unknown position '{s}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli.base_dir)?;
    info!("squadcast starting: {:?}", cli.command);

    let config = load_config(&cli.base_dir).context("failed to load configuration")?;

    let roster_path = cli
        .roster
        .clone()
        .unwrap_or_else(|| cli.base_dir.join(&config.data_paths.roster));
    let roster = load_roster(&roster_path)
        .with_context(|| format!("failed to load roster from {}", roster_path.display()))?;

    let scored = compute_metrics_with(&roster, &config.scoring);
    let build = build_squad(&scored);
    let mode = OutputMode::from_json_flag(cli.json);

    match cli.command {
        Commands::Lineup { formation } => {
            let formation = pick_formation(formation.as_deref(), &config);
            run_lineup(&scored, &build, formation, mode)
        }
        Commands::Tactics => run_tactics(&scored, &build, mode),
        Commands::Captain => run_captain(&scored, &build, mode),
        Commands::Transfers {
            position,
            budget,
            tiers,
            upgrades_only,
        } => {
            let budget = budget.unwrap_or(config.strategy.default_budget);
            if tiers {
                run_transfer_tiers(&scored, &build, budget, position, upgrades_only, mode)
            } else {
                run_transfers(&scored, &build, budget, position, mode)
            }
        }
        Commands::Report => run_report(&scored, &build, &config, mode),
    }
}

fn pick_formation(requested: Option<&str>, config: &Config) -> Formation {
    match requested {
        None => config.strategy.default_formation,
        Some(name) => {
            if Formation::from_name(name).is_none() {
                eprintln!(
                    "unknown formation '{}', using {}",
                    name,
                    Formation::FALLBACK
                );
            }
            Formation::resolve(name)
        }
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct LineupOutput<'a> {
    lineup: Lineup<'a>,
    substitutes: BTreeMap<Position, Vec<SubstituteSuggestion>>,
    advisories: Vec<Advisory>,
}

fn lineup_output<'a>(build: &SquadBuild<'a>, formation: Formation) -> LineupOutput<'a> {
    let lineup = select_lineup(&build.squad, formation);
    let mut advisories = build.advisories.clone();
    advisories.extend(lineup.shortfalls());
    LineupOutput {
        substitutes: suggest_substitutes(&build.squad),
        lineup,
        advisories,
    }
}

fn run_lineup(
    scored: &ScoredRoster,
    build: &SquadBuild<'_>,
    formation: Formation,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let output = lineup_output(build, formation);
    match mode {
        OutputMode::Json => render::print_json(&output),
        OutputMode::Text => {
            render::header("Lineup", scored);
            render::advisories(&build.advisories);
            render::lineup(&output.lineup);
            println!();
            render::substitutes(&output.substitutes);
            Ok(())
        }
    }
}

fn run_tactics(scored: &ScoredRoster, build: &SquadBuild<'_>, mode: OutputMode) -> anyhow::Result<()> {
    let ranked = compare_tactics(&build.squad);
    match mode {
        OutputMode::Json => render::print_json(&ranked),
        OutputMode::Text => {
            render::header("Tactics", scored);
            render::advisories(&build.advisories);
            render::tactics(&ranked);
            Ok(())
        }
    }
}

fn run_captain(scored: &ScoredRoster, build: &SquadBuild<'_>, mode: OutputMode) -> anyhow::Result<()> {
    let captains = suggest_captains(&build.squad);
    match mode {
        OutputMode::Json => render::print_json(&captains),
        OutputMode::Text => {
            render::header("Captain", scored);
            render::captains(&captains);
            Ok(())
        }
    }
}

fn run_transfers(
    scored: &ScoredRoster,
    build: &SquadBuild<'_>,
    budget: f64,
    position: Position,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let suggestions = suggest_transfers(scored, &build.squad, budget, position)
        .context("failed to compute transfer suggestions")?;
    match mode {
        OutputMode::Json => render::print_json(&suggestions),
        OutputMode::Text => {
            render::header("Transfers", scored);
            render::transfers(position, &suggestions);
            Ok(())
        }
    }
}

fn run_transfer_tiers(
    scored: &ScoredRoster,
    build: &SquadBuild<'_>,
    budget: f64,
    position: Position,
    upgrades_only: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let options = TierOptions {
        require_upgrade: upgrades_only,
    };
    let tiers = suggest_transfer_tiers(scored, &build.squad, budget, position, options)
        .context("failed to compute transfer tiers")?;
    match mode {
        OutputMode::Json => render::print_json(&tiers),
        OutputMode::Text => {
            render::header("Transfer tiers", scored);
            render::transfer_tiers(position, &tiers);
            Ok(())
        }
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    generated_at: DateTime<Utc>,
    scored_at: DateTime<Utc>,
    budget: f64,
    #[serde(flatten)]
    lineup: LineupOutput<'a>,
    tactics: Vec<TacticScore>,
    captains: Vec<CaptainSuggestion>,
    transfers: BTreeMap<Position, Vec<TransferSuggestion>>,
}

fn run_report(
    scored: &ScoredRoster,
    build: &SquadBuild<'_>,
    config: &Config,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let budget = config.strategy.default_budget;
    let mut transfers = BTreeMap::new();
    for position in Position::ALL {
        let suggestions = suggest_transfers(scored, &build.squad, budget, position)
            .with_context(|| format!("failed to compute transfers for {}", position.label()))?;
        transfers.insert(position, suggestions);
    }

    let report = ReportOutput {
        generated_at: Utc::now(),
        scored_at: scored.computed_at(),
        budget,
        lineup: lineup_output(build, config.strategy.default_formation),
        tactics: compare_tactics(&build.squad),
        captains: suggest_captains(&build.squad),
        transfers,
    };
    if report.lineup.advisories.iter().any(|a| *a == Advisory::EmptySquad) {
        warn!("report generated for an empty squad");
    }

    match mode {
        OutputMode::Json => render::print_json(&report),
        OutputMode::Text => {
            render::header("Squad report", scored);
            render::advisories(&build.advisories);
            render::lineup(&report.lineup.lineup);
            println!();
            render::substitutes(&report.lineup.substitutes);
            println!();
            render::tactics(&report.tactics);
            println!();
            render::captains(&report.captains);
            for (position, suggestions) in &report.transfers {
                println!();
                render::transfers(*position, suggestions);
            }
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let log_file = std::fs::File::create(log_dir.join("squadcast.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("squadcast=info,squadcast_core=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
