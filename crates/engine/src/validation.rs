//! Per-step validation rules. Pure functions from wizard data to a
//! field -> message map; failures are advisory and gate navigation and
//! launch, they are never errors.

use std::collections::BTreeMap;

use wizard_core::types::WizardData;

use crate::steps::{StepId, STEPS};

/// Validates a single step against the current data. Optional steps
/// (`Creative`, `Targeting`) are always valid; `Review` aggregates all
/// required steps and is used only to gate the launch action.
pub fn validate_step(step: StepId, data: &WizardData) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    match step {
        StepId::BasicInfo => {
            if data.name.trim().is_empty() {
                errors.insert("name".to_string(), "Campaign name is required".to_string());
            }
            if data.campaign_type.is_none() {
                errors.insert("type".to_string(), "Campaign type is required".to_string());
            }
        }
        StepId::Objectives => {
            if data.objectives.is_empty() {
                errors.insert(
                    "objectives".to_string(),
                    "At least one objective is required".to_string(),
                );
            }
        }
        StepId::Audience => {
            if data.selected_audiences.is_empty() {
                errors.insert(
                    "audiences".to_string(),
                    "Select at least one audience".to_string(),
                );
            }
        }
        StepId::BudgetSchedule => {
            if data.budget.total <= 0.0 {
                errors.insert(
                    "budget".to_string(),
                    "Total budget must be greater than zero".to_string(),
                );
            }
            if data.schedule.start_date.is_none() {
                errors.insert(
                    "startDate".to_string(),
                    "Start date is required".to_string(),
                );
            }
        }
        StepId::Channels => {
            if !data.channels.iter().any(|c| c.enabled) {
                errors.insert(
                    "channels".to_string(),
                    "Enable at least one channel".to_string(),
                );
            }
        }
        // Optional steps never block.
        StepId::Creative | StepId::Targeting => {}
        StepId::Review => {
            for def in STEPS.iter().filter(|d| !d.optional) {
                if def.id != StepId::Review {
                    errors.extend(validate_step(def.id, data));
                }
            }
        }
    }
    errors
}

/// True iff the step has no validation errors.
pub fn step_is_valid(step: StepId, data: &WizardData) -> bool {
    validate_step(step, data).is_empty()
}

/// Aggregate gate for the launch action: every required step valid.
pub fn ready_to_launch(data: &WizardData) -> bool {
    step_is_valid(StepId::Review, data)
}

/// Error-map keys owned by a step. Used by the state machine to
/// re-derive only the active step's entries on each edit while the
/// rest of the accumulated map is left alone.
pub fn step_error_keys(step: StepId) -> &'static [&'static str] {
    match step {
        StepId::BasicInfo => &["name", "type"],
        StepId::Objectives => &["objectives"],
        StepId::Audience => &["audiences"],
        StepId::BudgetSchedule => &["budget", "startDate"],
        StepId::Channels => &["channels"],
        StepId::Creative | StepId::Targeting => &[],
        StepId::Review => &[
            "name",
            "type",
            "objectives",
            "audiences",
            "budget",
            "startDate",
            "channels",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::types::{CampaignType, ChannelPlan, Objective, Platform, Priority};

    fn valid_data() -> WizardData {
        let mut data = WizardData::default();
        data.name = "Holiday Sale".to_string();
        data.campaign_type = Some(CampaignType::Conversion);
        data.objectives.push(Objective {
            objective_type: "conversions".to_string(),
            unit: "purchases".to_string(),
            priority: Priority::Primary,
            target: 500.0,
        });
        data.selected_audiences = vec!["aud-1".to_string()];
        data.budget.total = 5000.0;
        data.schedule.start_date = Some(chrono::Utc::now());
        data.channels.push(ChannelPlan {
            enabled: true,
            budget_allocation: 100.0,
            ..ChannelPlan::new(Platform::Facebook)
        });
        data
    }

    #[test]
    fn test_empty_data_fails_basic_info() {
        let errors = validate_step(StepId::BasicInfo, &WizardData::default());
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("type"));
    }

    #[test]
    fn test_whitespace_name_is_rejected() {
        let mut data = valid_data();
        data.name = "   ".to_string();
        assert!(validate_step(StepId::BasicInfo, &data).contains_key("name"));
    }

    #[test]
    fn test_budget_schedule_rules() {
        let mut data = valid_data();
        data.budget.total = 0.0;
        data.schedule.start_date = None;
        let errors = validate_step(StepId::BudgetSchedule, &data);
        assert!(errors.contains_key("budget"));
        assert!(errors.contains_key("startDate"));
    }

    #[test]
    fn test_disabled_channels_do_not_count() {
        let mut data = valid_data();
        data.channels[0].enabled = false;
        assert!(validate_step(StepId::Channels, &data).contains_key("channels"));
    }

    #[test]
    fn test_optional_steps_always_valid() {
        let data = WizardData::default();
        assert!(step_is_valid(StepId::Creative, &data));
        assert!(step_is_valid(StepId::Targeting, &data));
    }

    #[test]
    fn test_review_aggregates_required_steps() {
        assert!(ready_to_launch(&valid_data()));

        let mut data = valid_data();
        data.selected_audiences.clear();
        let errors = validate_step(StepId::Review, &data);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("audiences"));
        assert!(!ready_to_launch(&data));
    }

    #[test]
    fn test_allocation_sum_is_not_a_rule() {
        // Allocations far from 100% must not block any step.
        let mut data = valid_data();
        data.channels[0].budget_allocation = 10.0;
        data.channels.push(ChannelPlan {
            enabled: true,
            budget_allocation: 10.0,
            ..ChannelPlan::new(Platform::Google)
        });
        assert!(step_is_valid(StepId::Channels, &data));
        assert!(ready_to_launch(&data));
    }
}
