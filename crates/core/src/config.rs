use serde::Deserialize;

use crate::types::CampaignType;

/// Root wizard configuration. Loaded from environment variables with
/// the prefix `CAMPAIGN_WIZARD__`; every field has a serde default so a
/// bare environment yields a fully usable config.
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub reach: ReachConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Band for the audience-overlap discount heuristic. The discount is a
/// placeholder with no intersection data behind it; the band is kept
/// configurable so product can retune it without a release.
#[derive(Debug, Clone, Deserialize)]
pub struct ReachConfig {
    #[serde(default = "default_min_overlap")]
    pub min_overlap_discount: f64,
    #[serde(default = "default_max_overlap")]
    pub max_overlap_discount: f64,
}

/// Inputs to the budget-suggestion calculator: a CPM-style daily rate
/// per campaign type, tier scaling factors, and the plan duration used
/// when no end date is set yet.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_awareness_rate")]
    pub awareness_rate: f64,
    #[serde(default = "default_consideration_rate")]
    pub consideration_rate: f64,
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: f64,
    #[serde(default = "default_retention_rate")]
    pub retention_rate: f64,
    #[serde(default = "default_conservative_scale")]
    pub conservative_scale: f64,
    #[serde(default = "default_aggressive_scale")]
    pub aggressive_scale: f64,
    #[serde(default = "default_plan_duration_days")]
    pub plan_duration_days: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

// Default functions
fn default_min_overlap() -> f64 {
    0.05
}
fn default_max_overlap() -> f64 {
    0.25
}
fn default_awareness_rate() -> f64 {
    5.0
}
fn default_consideration_rate() -> f64 {
    8.0
}
fn default_conversion_rate() -> f64 {
    15.0
}
fn default_retention_rate() -> f64 {
    6.0
}
fn default_conservative_scale() -> f64 {
    0.5
}
fn default_aggressive_scale() -> f64 {
    2.0
}
fn default_plan_duration_days() -> u32 {
    30
}
fn default_currency() -> String {
    "USD".to_string()
}
fn default_timezone() -> String {
    "UTC".to_string()
}

impl Default for ReachConfig {
    fn default() -> Self {
        Self {
            min_overlap_discount: default_min_overlap(),
            max_overlap_discount: default_max_overlap(),
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            awareness_rate: default_awareness_rate(),
            consideration_rate: default_consideration_rate(),
            conversion_rate: default_conversion_rate(),
            retention_rate: default_retention_rate(),
            conservative_scale: default_conservative_scale(),
            aggressive_scale: default_aggressive_scale(),
            plan_duration_days: default_plan_duration_days(),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            timezone: default_timezone(),
        }
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            reach: ReachConfig::default(),
            suggestions: SuggestionConfig::default(),
            defaults: DefaultsConfig::default(),
        }
    }
}

impl SuggestionConfig {
    /// Daily spend rate per 1000 reached people for the given type.
    pub fn rate_for(&self, campaign_type: CampaignType) -> f64 {
        match campaign_type {
            CampaignType::Awareness => self.awareness_rate,
            CampaignType::Consideration => self.consideration_rate,
            CampaignType::Conversion => self.conversion_rate,
            CampaignType::Retention => self.retention_rate,
        }
    }
}

impl WizardConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_WIZARD")
                .separator("__")
                .try_parsing(true)
                .list_separator(","),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let cfg = WizardConfig::default();
        assert!(cfg.reach.min_overlap_discount < cfg.reach.max_overlap_discount);
        assert_eq!(cfg.defaults.currency, "USD");
        assert_eq!(cfg.suggestions.plan_duration_days, 30);
    }

    #[test]
    fn test_rate_for_covers_all_types() {
        let cfg = SuggestionConfig::default();
        assert_eq!(cfg.rate_for(CampaignType::Conversion), 15.0);
        assert!(cfg.rate_for(CampaignType::Awareness) > 0.0);
        assert!(cfg.rate_for(CampaignType::Consideration) > 0.0);
        assert!(cfg.rate_for(CampaignType::Retention) > 0.0);
    }
}
