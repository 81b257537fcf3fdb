//! Derived business calculations: audience-reach estimation, budget
//! suggestions, budget/schedule cross-derivation, and channel budget
//! splits. All pure except the overlap strategy, which is injected so
//! tests can pin it.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::warn;

use wizard_core::config::{ReachConfig, SuggestionConfig};
use wizard_core::types::{Audience, CampaignType, ChannelPlan, SchedulePlan};

// ─── Overlap model ─────────────────────────────────────────────────────────

/// Strategy supplying the audience-overlap discount applied to summed
/// audience sizes. The discount is a heuristic placeholder — there is
/// no intersection data behind it — so it is injectable and seedable.
pub trait OverlapModel: Send + Sync {
    /// Fraction in 0.0..1.0 to shave off the summed size. Only called
    /// when two or more audiences are selected.
    fn discount(&self, audience_count: usize) -> f64;
}

/// Draws a uniform discount from the configured band with a seedable
/// generator, so a fixed seed reproduces the same estimates.
pub struct SeededOverlap {
    rng: Mutex<StdRng>,
    min: f64,
    max: f64,
}

impl SeededOverlap {
    pub fn new(seed: u64, config: &ReachConfig) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            min: config.min_overlap_discount,
            max: config.max_overlap_discount,
        }
    }
}

impl OverlapModel for SeededOverlap {
    fn discount(&self, _audience_count: usize) -> f64 {
        self.rng
            .lock()
            .expect("overlap rng mutex poisoned")
            .gen_range(self.min..=self.max)
    }
}

/// Pins the discount to a constant. Used by tests and callers that
/// want deterministic estimates.
pub struct FixedOverlap(pub f64);

impl OverlapModel for FixedOverlap {
    fn discount(&self, _audience_count: usize) -> f64 {
        self.0
    }
}

/// Estimates unique reach across the selected audiences. A single
/// audience is taken at face value; two or more get the overlap
/// discount applied to the sum.
pub fn estimate_reach(audiences: &[Audience], model: &dyn OverlapModel) -> u64 {
    let sum: u64 = audiences.iter().map(|a| a.size).sum();
    if audiences.len() < 2 {
        return sum;
    }
    let discount = model.discount(audiences.len()).clamp(0.0, 1.0);
    (sum as f64 * (1.0 - discount)).round() as u64
}

// ─── Budget suggestions ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetPair {
    pub daily: f64,
    pub total: f64,
}

/// The named suggestion tiers offered on the budget step. Applying one
/// overwrites `budget.daily`/`budget.total` only.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetSuggestions {
    pub conservative: BudgetPair,
    pub recommended: BudgetPair,
    pub aggressive: BudgetPair,
}

/// CPM-style suggestion: recommended daily spend is `reach / 1000`
/// times the per-type rate; the outer tiers scale that by the
/// configured factors, and totals assume the configured plan duration.
pub fn budget_suggestions(
    reach: u64,
    campaign_type: CampaignType,
    config: &SuggestionConfig,
) -> BudgetSuggestions {
    let days = config.plan_duration_days as f64;
    let pair = |daily: f64| {
        let daily = daily.round();
        BudgetPair {
            daily,
            total: daily * days,
        }
    };

    let recommended_daily = reach as f64 / 1000.0 * config.rate_for(campaign_type);
    BudgetSuggestions {
        conservative: pair(recommended_daily * config.conservative_scale),
        recommended: pair(recommended_daily),
        aggressive: pair(recommended_daily * config.aggressive_scale),
    }
}

// ─── Budget / schedule cross-derivation ────────────────────────────────────

/// Flight length in days, `ceil` of the start..end span. `None` when
/// either date is missing; a zero-length flight counts as one day so
/// the daily division below stays defined.
pub fn schedule_days(schedule: &SchedulePlan) -> Option<i64> {
    let start = schedule.start_date?;
    let end = schedule.end_date?;
    let ms = end.signed_duration_since(start).num_milliseconds();
    if ms < 0 {
        warn!(start = %start, end = %end, "Schedule ends before it starts");
        return None;
    }
    const DAY_MS: i64 = 86_400_000;
    Some(((ms + DAY_MS - 1) / DAY_MS).max(1))
}

/// Total edited with a known flight length: spread it evenly.
pub fn daily_from_total(total: f64, days: i64) -> f64 {
    (total / days as f64).floor()
}

/// Daily edited with a known flight length: extrapolate the total.
pub fn total_from_daily(daily: f64, days: i64) -> f64 {
    daily * days as f64
}

// ─── Channel budgets ───────────────────────────────────────────────────────

/// Absolute budget carved out for one channel from its allocation
/// percentage.
pub fn channel_budget(total: f64, allocation: f64) -> f64 {
    total * allocation / 100.0
}

/// Allocation assigned to a channel at the moment it is enabled,
/// given how many channels were already enabled. Existing channels are
/// deliberately not renormalized, so the sum can drift off 100.
pub fn default_allocation(enabled_count: usize) -> f64 {
    (100 / (enabled_count + 1)) as f64
}

/// Advisory sum of allocations over enabled channels. Surfaced so the
/// UI can warn about drift; the engine never corrects it.
pub fn allocation_sum(channels: &[ChannelPlan]) -> f64 {
    channels
        .iter()
        .filter(|c| c.enabled)
        .map(|c| c.budget_allocation)
        .sum()
}
