//! Final assembly of wizard data into a persistable draft campaign.

use wizard_core::types::{
    CampaignDraft, CampaignPerformance, CampaignStatus, CreativePerformance, DraftChannel,
    DraftCreative, WizardData,
};
use wizard_core::{WizardError, WizardResult};

use crate::calculator;

/// Deterministic transform from finished wizard data to the creation
/// payload. Disabled channels are dropped, enabled ones get their
/// absolute budget carved out of the total, and all performance
/// counters start at zero. `id`/`created`/`updated`/`created_by` are
/// the persistence collaborator's job and are never set here.
pub fn assemble(data: &WizardData) -> WizardResult<CampaignDraft> {
    let campaign_type = data
        .campaign_type
        .ok_or_else(|| WizardError::NotReady("campaign type not selected".to_string()))?;

    let channels = data
        .channels
        .iter()
        .filter(|c| c.enabled)
        .map(|c| DraftChannel {
            id: c.platform.as_str().to_string(),
            platform: c.platform,
            enabled: c.enabled,
            budget: calculator::channel_budget(data.budget.total, c.budget_allocation),
            budget_type: "total".to_string(),
            bid_strategy: c.bid_strategy,
            targeting: c.targeting.clone(),
        })
        .collect();

    let creatives = data
        .creatives
        .iter()
        .map(|c| DraftCreative {
            creative: c.clone(),
            performance: CreativePerformance::default(),
        })
        .collect();

    Ok(CampaignDraft {
        name: data.name.clone(),
        description: data.description.clone(),
        campaign_type,
        status: CampaignStatus::Draft,
        objectives: data.objectives.clone(),
        audiences: data.selected_audiences.clone(),
        budget: data.budget.clone(),
        schedule: data.schedule.clone(),
        channels,
        creatives,
        targeting: data.targeting.clone(),
        performance: CampaignPerformance::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::types::{
        CampaignType, ChannelPlan, CreativeSpec, CreativeType, Platform,
    };

    fn wizard_data() -> WizardData {
        let mut data = WizardData::default();
        data.name = "Holiday Sale".to_string();
        data.campaign_type = Some(CampaignType::Conversion);
        data.selected_audiences = vec!["aud-1".to_string(), "aud-2".to_string()];
        data.budget.total = 1000.0;
        data.channels.push(ChannelPlan {
            enabled: true,
            budget_allocation: 100.0,
            ..ChannelPlan::new(Platform::Facebook)
        });
        data
    }

    #[test]
    fn test_assemble_is_deterministic_draft() {
        let draft = assemble(&wizard_data()).unwrap();
        assert_eq!(draft.status, CampaignStatus::Draft);
        assert_eq!(draft.channels.len(), 1);
        assert_eq!(draft.channels[0].id, "facebook");
        assert_eq!(draft.channels[0].budget, 1000.0);
        assert_eq!(draft.channels[0].budget_type, "total");
        assert_eq!(draft.performance, CampaignPerformance::default());

        // Serialized performance carries all 14 zeroed metrics.
        let perf = serde_json::to_value(&draft.performance).unwrap();
        let map = perf.as_object().unwrap();
        assert_eq!(map.len(), 14);
        assert!(map.values().all(|v| v.as_f64() == Some(0.0)));
    }

    #[test]
    fn test_disabled_channels_are_dropped() {
        let mut data = wizard_data();
        data.channels.push(ChannelPlan {
            enabled: false,
            budget_allocation: 50.0,
            ..ChannelPlan::new(Platform::Google)
        });
        let draft = assemble(&data).unwrap();
        assert_eq!(draft.channels.len(), 1);
        assert_eq!(draft.channels[0].platform, Platform::Facebook);
    }

    #[test]
    fn test_channel_budgets_follow_allocations() {
        let mut data = wizard_data();
        data.budget.total = 5000.0;
        data.channels[0].budget_allocation = 60.0;
        data.channels.push(ChannelPlan {
            enabled: true,
            budget_allocation: 40.0,
            ..ChannelPlan::new(Platform::Google)
        });
        let draft = assemble(&data).unwrap();
        assert_eq!(draft.channels[0].budget, 3000.0);
        assert_eq!(draft.channels[1].budget, 2000.0);
    }

    #[test]
    fn test_creatives_get_zeroed_performance() {
        let mut data = wizard_data();
        data.creatives.push(CreativeSpec {
            id: "cr-1".to_string(),
            creative_type: CreativeType::Image,
            name: "Hero".to_string(),
            headline: "Big savings".to_string(),
            description: String::new(),
            call_to_action: "Shop now".to_string(),
            url: "https://example.com".to_string(),
            assets: vec![],
            channels: vec![Platform::Facebook],
        });
        let draft = assemble(&data).unwrap();
        assert_eq!(draft.creatives.len(), 1);
        assert_eq!(
            draft.creatives[0].performance,
            CreativePerformance::default()
        );
    }

    #[test]
    fn test_passthrough_fields_survive_unchanged() {
        let data = wizard_data();
        let draft = assemble(&data).unwrap();
        assert_eq!(draft.name, "Holiday Sale");
        assert_eq!(draft.audiences, data.selected_audiences);
        assert_eq!(draft.budget.total, data.budget.total);
    }

    #[test]
    fn test_missing_campaign_type_is_an_error() {
        let mut data = wizard_data();
        data.campaign_type = None;
        assert!(assemble(&data).is_err());
    }
}
