// Plain-text and JSON output for the squadcast commands.

use std::collections::BTreeMap;

use serde::Serialize;
use squadcast_core::{
    Advisory, CaptainSuggestion, Lineup, Position, ScoredRoster, SubstituteSuggestion,
    TacticScore, TransferSuggestion, TransferTiers,
};

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

impl OutputMode {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputMode::Json
        } else {
            OutputMode::Text
        }
    }
}

pub fn print_json<T: Serialize>(item: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(item)?);
    Ok(())
}

pub fn header(title: &str, scored: &ScoredRoster) {
    println!(
        "== {} ({} players, scored {}) ==",
        title,
        scored.len(),
        scored.computed_at().format("%Y-%m-%d %H:%M:%S UTC")
    );
}

pub fn advisories(advisories: &[Advisory]) {
    for a in advisories {
        println!("! {a}");
    }
}

pub fn lineup(lineup: &Lineup<'_>) {
    println!("Lineup {} (total {:.3})", lineup.formation, lineup.total_score());
    println!("{:<4} {:<24} {:<6} {:>7} {:>7}", "POS", "NAME", "TEAM", "SCORE", "PRICE");
    for p in &lineup.players {
        println!(
            "{:<4} {:<24} {:<6} {:>7.3} {:>7.2}",
            p.position().display_str(),
            p.name(),
            p.player.team,
            p.adjusted_score,
            p.price()
        );
    }
    advisories(&lineup.shortfalls());
}

pub fn substitutes(subs: &BTreeMap<Position, Vec<SubstituteSuggestion>>) {
    println!("Suggested substitutes");
    for (position, picks) in subs {
        if picks.is_empty() {
            println!("  {:<4} (none available)", position.display_str());
            continue;
        }
        for s in picks {
            println!(
                "  {:<4} {:<24} {:>7.3} {:>7.2}",
                position.display_str(),
                s.name,
                s.adjusted_score,
                s.price
            );
        }
    }
}

pub fn tactics(ranked: &[TacticScore]) {
    println!("Best formations");
    for (i, t) in ranked.iter().enumerate() {
        println!(
            "  {}. {:<6} {:>7.3}  {}",
            i + 1,
            t.formation.name(),
            t.total_score,
            t.quota
        );
    }
}

pub fn captains(captains: &[CaptainSuggestion]) {
    println!("Captain options");
    if captains.is_empty() {
        println!("  (no starters selected)");
    }
    for c in captains {
        let mut flags = Vec::new();
        if c.injured {
            flags.push("INJURED");
        }
        if c.suspended {
            flags.push("SUSPENDED");
        }
        println!(
            "  {:<24} {:<4} {:>7.3}  vs {:<12} difficulty {:.1} {}",
            c.name,
            c.position.display_str(),
            c.captain_score,
            c.next_opponent,
            c.fixture_difficulty,
            flags.join(" ")
        );
    }
}

pub fn transfers(position: Position, suggestions: &[TransferSuggestion]) {
    println!("Transfers for {}", position.label());
    if suggestions.is_empty() {
        println!("  (no affordable transfer found)");
    }
    for s in suggestions {
        match s {
            TransferSuggestion::Substitution {
                sell,
                buy,
                net_cost,
                score_gain,
            } => println!(
                "  sell {} ({:.2}) -> buy {} ({:.2}) vs {}: net {:+.2}, gain {:+.3}",
                sell.name, sell.price, buy.name, buy.price, buy.next_opponent, net_cost, score_gain
            ),
            TransferSuggestion::Signing {
                buy,
                cost,
                score_gain,
            } => println!(
                "  sign {} vs {}: cost {:.2}, gain {:+.3}",
                buy.name, buy.next_opponent, cost, score_gain
            ),
        }
    }
}

pub fn transfer_tiers(position: Position, tiers: &TransferTiers) {
    println!("Transfer tiers for {}", position.label());
    for (label, tier) in [
        ("Top performers", &tiers.top_performers),
        ("Cost-benefit", &tiers.cost_benefit),
    ] {
        println!("  {label}");
        if tier.is_empty() {
            println!("    (none)");
        }
        for c in tier {
            println!(
                "    {:<24} {:>7.2} advanced {:>7.3} score {:>6.3}",
                c.buy.name, c.buy.price, c.advanced_score, c.buy.adjusted_score
            );
        }
    }
}
