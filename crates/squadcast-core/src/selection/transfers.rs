// Transfer advisor: budget-aware swaps and signings at one position, plus the
// tiered variant ranked by advanced score.

use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ScoringWeights;
use crate::roster::player::Position;
use crate::scoring::eligibility::is_active_eligible;
use crate::scoring::metrics::{ScoredPlayer, ScoredRoster};
use crate::selection::top_by;
use crate::squad::Squad;

/// Suggestions returned per request, and per tier.
pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("budget must be a finite number, got {0}")]
    InvalidBudget(f64),
}

// ---------------------------------------------------------------------------
// Suggestion types
// ---------------------------------------------------------------------------

/// The squad member that would be sold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleDetails {
    pub name: String,
    pub price: f64,
    pub adjusted_score: f64,
}

/// The player that would be bought.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseDetails {
    pub name: String,
    pub price: f64,
    pub adjusted_score: f64,
    pub next_opponent: String,
    pub fixture_difficulty: f64,
}

impl PurchaseDetails {
    fn from_scored(p: &ScoredPlayer) -> Self {
        PurchaseDetails {
            name: p.name().to_string(),
            price: p.price(),
            adjusted_score: p.adjusted_score,
            next_opponent: p.player.next_opponent.clone(),
            fixture_difficulty: p.player.fixture_difficulty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferSuggestion {
    /// Sell the weakest incumbent and buy the candidate.
    Substitution {
        sell: SaleDetails,
        buy: PurchaseDetails,
        net_cost: f64,
        score_gain: f64,
    },
    /// No incumbent at the position; buy outright.
    Signing {
        buy: PurchaseDetails,
        cost: f64,
        score_gain: f64,
    },
}

impl TransferSuggestion {
    pub fn score_gain(&self) -> f64 {
        match self {
            TransferSuggestion::Substitution { score_gain, .. }
            | TransferSuggestion::Signing { score_gain, .. } => *score_gain,
        }
    }

    pub fn purchase(&self) -> &PurchaseDetails {
        match self {
            TransferSuggestion::Substitution { buy, .. } | TransferSuggestion::Signing { buy, .. } => buy,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn check_budget(budget: f64) -> Result<(), AdvisorError> {
    if budget.is_finite() {
        Ok(())
    } else {
        Err(AdvisorError::InvalidBudget(budget))
    }
}

/// Weakest squad member at `position`, regardless of eligibility. Ties go to
/// the first listed.
fn weakest_incumbent<'a>(squad: &Squad<'a>, position: Position) -> Option<&'a ScoredPlayer> {
    squad.at_position(position).fold(None, |weakest, p| match weakest {
        Some(w) if p.adjusted_score >= w.adjusted_score => Some(w),
        _ => Some(p),
    })
}

// ---------------------------------------------------------------------------
// Base advisor
// ---------------------------------------------------------------------------

/// Up to three transfers at `position`, best score gain first.
///
/// With an incumbent at the position, the weakest one is offered for sale and
/// its price extends the budget. Without one, suggestions are direct signings
/// within `budget`. Candidates are fit players outside the squad.
pub fn suggest_transfers(
    scored: &ScoredRoster,
    squad: &Squad<'_>,
    budget: f64,
    position: Position,
) -> Result<Vec<TransferSuggestion>, AdvisorError> {
    check_budget(budget)?;

    let sale = weakest_incumbent(squad, position);
    let extended_budget = sale.map_or(budget, |s| budget + s.price());

    let candidates = top_by(
        scored.players().iter().filter(|p| {
            p.position() == position
                && !squad.contains(p.name())
                && is_active_eligible(&p.player)
                && p.price() <= extended_budget
        }),
        usize::MAX,
        |p| p.adjusted_score,
    );

    let mut suggestions = Vec::with_capacity(MAX_SUGGESTIONS);
    for candidate in candidates {
        let suggestion = match sale {
            Some(sale) if candidate.price() <= extended_budget => TransferSuggestion::Substitution {
                sell: SaleDetails {
                    name: sale.name().to_string(),
                    price: sale.price(),
                    adjusted_score: sale.adjusted_score,
                },
                buy: PurchaseDetails::from_scored(candidate),
                net_cost: candidate.price() - sale.price(),
                score_gain: candidate.adjusted_score - sale.adjusted_score,
            },
            None if candidate.price() <= budget => TransferSuggestion::Signing {
                buy: PurchaseDetails::from_scored(candidate),
                cost: candidate.price(),
                score_gain: candidate.adjusted_score,
            },
            _ => continue,
        };
        suggestions.push(suggestion);
        if suggestions.len() == MAX_SUGGESTIONS {
            break;
        }
    }

    suggestions.sort_by(|a, b| {
        b.score_gain()
            .partial_cmp(&a.score_gain())
            .unwrap_or(Ordering::Equal)
    });

    info!(
        "{} transfer suggestions for {} (budget {:.2}, extended {:.2}, selling {})",
        suggestions.len(),
        position,
        budget,
        extended_budget,
        sale.map_or("nobody", |s| s.name())
    );
    Ok(suggestions)
}

// ---------------------------------------------------------------------------
// Tiered advisor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
pub struct TierOptions {
    /// Keep only candidates clearly better than the weakest incumbent.
    pub require_upgrade: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierCandidate {
    pub buy: PurchaseDetails,
    pub advanced_score: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TransferTiers {
    /// Best advanced score within the extended budget.
    pub top_performers: Vec<TierCandidate>,
    /// Best advanced score within the plain budget.
    pub cost_benefit: Vec<TierCandidate>,
}

/// Request-time blend of recent form, fixture ease and adjusted score.
pub fn advanced_score(player: &ScoredPlayer, weights: &ScoringWeights) -> f64 {
    let w = &weights.advanced_score;
    player.player.points_last_gameweek * w.points_last_gameweek
        + player.fixture_ease() * w.fixture_ease
        + player.adjusted_score * w.adjusted_score
}

/// Two ranked tiers of candidates from outside the squad at `position`.
///
/// Weights come from the snapshot, so the advanced score and upgrade factor
/// match the pass that produced the adjusted scores.
pub fn suggest_transfer_tiers(
    scored: &ScoredRoster,
    squad: &Squad<'_>,
    budget: f64,
    position: Position,
    options: TierOptions,
) -> Result<TransferTiers, AdvisorError> {
    check_budget(budget)?;
    let weights = scored.weights();

    let incumbent = weakest_incumbent(squad, position);
    let extended_budget = incumbent.map_or(budget, |s| budget + s.price());

    let upgrade_floor = if options.require_upgrade {
        incumbent.map(|w| w.adjusted_score * weights.transfers.upgrade_factor)
    } else {
        None
    };

    let pool: Vec<&ScoredPlayer> = scored
        .players()
        .iter()
        .filter(|p| {
            p.position() == position
                && !squad.contains(p.name())
                && is_active_eligible(&p.player)
                && p.price() <= extended_budget
                && upgrade_floor.map_or(true, |floor| p.adjusted_score > floor)
        })
        .collect();

    let rank = |within: f64| -> Vec<TierCandidate> {
        top_by(
            pool.iter().copied().filter(|p| p.price() <= within),
            MAX_SUGGESTIONS,
            |p| advanced_score(p, weights),
        )
        .into_iter()
        .map(|p| TierCandidate {
            buy: PurchaseDetails::from_scored(p),
            advanced_score: advanced_score(p, weights),
        })
        .collect()
    };

    let tiers = TransferTiers {
        top_performers: rank(extended_budget),
        cost_benefit: rank(budget),
    };

    debug!(
        "tiers for {}: pool {}, top performers {}, cost-benefit {}, upgrade floor {:?}",
        position,
        pool.len(),
        tiers.top_performers.len(),
        tiers.cost_benefit.len(),
        upgrade_floor
    );
    Ok(tiers)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
