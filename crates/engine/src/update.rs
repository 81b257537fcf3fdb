//! Field-wise update patches for the wizard aggregate.
//!
//! Nested plans (`budget`, `schedule`, `targeting`) are merged per
//! field through dedicated patch types rather than whole-object
//! replacement, so editing one nested field can never drop a sibling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use wizard_core::types::{
    CampaignType, ChannelPlan, CreativeSpec, Demographics, Objective, OptimizationGoal,
    WizardData,
};

use crate::calculator;

/// Partial update for [`WizardData`]. `None` fields are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub campaign_type: Option<CampaignType>,
    pub objectives: Option<Vec<Objective>>,
    pub selected_audiences: Option<Vec<String>>,
    pub estimated_reach: Option<u64>,
    pub budget: Option<BudgetPatch>,
    pub schedule: Option<SchedulePatch>,
    pub channels: Option<Vec<ChannelPlan>>,
    pub creatives: Option<Vec<CreativeSpec>>,
    pub targeting: Option<TargetingPatch>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BudgetPatch {
    pub total: Option<f64>,
    pub daily: Option<f64>,
    pub currency: Option<String>,
    pub optimization_goal: Option<OptimizationGoal>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulePatch {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub timezone: Option<String>,
    pub frequency_impressions: Option<u32>,
    pub frequency_period: Option<wizard_core::types::FrequencyPeriod>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingPatch {
    pub locations: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub devices: Option<Vec<String>>,
    pub demographics: Option<Demographics>,
    pub interests: Option<Vec<String>>,
    pub behaviors: Option<Vec<String>>,
}

impl WizardPatch {
    pub fn name(value: impl Into<String>) -> Self {
        Self {
            name: Some(value.into()),
            ..Default::default()
        }
    }

    pub fn campaign_type(value: CampaignType) -> Self {
        Self {
            campaign_type: Some(value),
            ..Default::default()
        }
    }

    pub fn budget_total(value: f64) -> Self {
        Self {
            budget: Some(BudgetPatch {
                total: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn budget_daily(value: f64) -> Self {
        Self {
            budget: Some(BudgetPatch {
                daily: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn start_date(value: DateTime<Utc>) -> Self {
        Self {
            schedule: Some(SchedulePatch {
                start_date: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    pub fn end_date(value: DateTime<Utc>) -> Self {
        Self {
            schedule: Some(SchedulePatch {
                end_date: Some(value),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Which budget/schedule fields a patch touched; drives the
/// cross-derivation order in [`apply`].
#[derive(Debug, Clone, Copy, Default)]
struct PatchEffects {
    total_edited: bool,
    daily_edited: bool,
    end_date_edited: bool,
}

/// Applies a patch to the aggregate, enforcing the data invariants
/// (non-negative budgets, unique audiences and platforms, ordered
/// schedule) and running the budget/schedule cross-derivation for the
/// fields the patch touched.
pub fn apply(data: &mut WizardData, patch: &WizardPatch) {
    let mut effects = PatchEffects::default();

    if let Some(name) = &patch.name {
        data.name = name.clone();
    }
    if let Some(description) = &patch.description {
        data.description = description.clone();
    }
    if let Some(campaign_type) = patch.campaign_type {
        data.campaign_type = Some(campaign_type);
    }
    if let Some(objectives) = &patch.objectives {
        data.objectives = objectives.clone();
    }
    if let Some(audiences) = &patch.selected_audiences {
        data.selected_audiences = dedupe_preserving_order(audiences);
    }
    if let Some(reach) = patch.estimated_reach {
        data.estimated_reach = reach;
    }

    if let Some(budget) = &patch.budget {
        if let Some(total) = budget.total {
            data.budget.total = total.max(0.0);
            effects.total_edited = true;
        }
        if let Some(daily) = budget.daily {
            data.budget.daily = daily.max(0.0);
            effects.daily_edited = true;
        }
        if let Some(currency) = &budget.currency {
            data.budget.currency = currency.clone();
        }
        if let Some(goal) = budget.optimization_goal {
            data.budget.optimization_goal = goal;
        }
    }

    if let Some(schedule) = &patch.schedule {
        if let Some(start) = schedule.start_date {
            data.schedule.start_date = Some(start);
            // Moving the start past an existing end would invert the
            // schedule; drop the stale end instead.
            if let Some(end) = data.schedule.end_date {
                if end < start {
                    warn!(start = %start, end = %end, "Start moved past end date, clearing end");
                    data.schedule.end_date = None;
                }
            }
        }
        if let Some(end) = schedule.end_date {
            // An end before the start violates the schedule invariant;
            // the edit is dropped and the previous end kept.
            match data.schedule.start_date {
                Some(start) if end < start => {
                    warn!(start = %start, end = %end, "Ignoring end date before start date");
                }
                _ => {
                    data.schedule.end_date = Some(end);
                    effects.end_date_edited = true;
                }
            }
        }
        if let Some(timezone) = &schedule.timezone {
            data.schedule.timezone = timezone.clone();
        }
        if let Some(impressions) = schedule.frequency_impressions {
            data.schedule.frequency.impressions = impressions;
        }
        if let Some(period) = schedule.frequency_period {
            data.schedule.frequency.period = period;
        }
    }

    if let Some(channels) = &patch.channels {
        data.channels = dedupe_channels(channels);
    }
    if let Some(creatives) = &patch.creatives {
        data.creatives = creatives.clone();
    }

    if let Some(targeting) = &patch.targeting {
        if let Some(locations) = &targeting.locations {
            data.targeting.locations = locations.clone();
        }
        if let Some(languages) = &targeting.languages {
            data.targeting.languages = languages.clone();
        }
        if let Some(devices) = &targeting.devices {
            data.targeting.devices = devices.clone();
        }
        if let Some(demographics) = &targeting.demographics {
            data.targeting.demographics = demographics.clone();
        }
        if let Some(interests) = &targeting.interests {
            data.targeting.interests = interests.clone();
        }
        if let Some(behaviors) = &targeting.behaviors {
            data.targeting.behaviors = behaviors.clone();
        }
    }

    cross_derive(data, effects);
}

/// With an end date on file the budget fields are coupled: an edited
/// total respreads the daily amount, an edited daily extrapolates the
/// total, and a moved end date respreads from the total. Without an
/// end date the fields stay independent.
fn cross_derive(data: &mut WizardData, effects: PatchEffects) {
    let Some(days) = calculator::schedule_days(&data.schedule) else {
        return;
    };
    if effects.total_edited {
        data.budget.daily = calculator::daily_from_total(data.budget.total, days);
    } else if effects.daily_edited {
        data.budget.total = calculator::total_from_daily(data.budget.daily, days);
    } else if effects.end_date_edited {
        data.budget.daily = calculator::daily_from_total(data.budget.total, days);
    }
}

fn dedupe_preserving_order(ids: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(id) {
            seen.push(id.clone());
        }
    }
    seen
}

/// Keeps the first entry per platform.
fn dedupe_channels(channels: &[ChannelPlan]) -> Vec<ChannelPlan> {
    let mut out: Vec<ChannelPlan> = Vec::with_capacity(channels.len());
    for channel in channels {
        if !out.iter().any(|c| c.platform == channel.platform) {
            out.push(channel.clone());
        }
    }
    out
}
