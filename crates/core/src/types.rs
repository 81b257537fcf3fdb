//! Wizard domain types — campaign data aggregate, channels, creatives,
//! targeting, and the assembled draft-campaign payload.
//!
//! Everything here is plain serde data: the JSON shape is the stable
//! contract for persistence, test fixtures, and any future auto-save.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ─── Campaign basics ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    Awareness,
    Consideration,
    Conversion,
    Retention,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Primary,
    Secondary,
}

/// A single campaign objective, e.g. "conversions / purchases / 500".
/// The type/unit vocabulary is open — the dashboard supplies free-form
/// labels — so these stay strings rather than closed enums.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Objective {
    pub objective_type: String,
    pub unit: String,
    pub priority: Priority,
    pub target: f64,
}

// ─── Audiences ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AudienceStatus {
    Active,
    Processing,
    Archived,
}

/// An addressable audience exposed by the audience directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Audience {
    pub id: String,
    pub name: String,
    pub size: u64,
    /// Lookalike similarity score in 0.0..=1.0.
    pub similarity: f64,
    pub status: AudienceStatus,
    /// Historical performance index (1.0 = baseline).
    pub performance: f64,
    pub source: String,
}

// ─── Budget & schedule ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationGoal {
    Impressions,
    Clicks,
    Conversions,
    Reach,
}

impl Default for OptimizationGoal {
    fn default() -> Self {
        OptimizationGoal::Conversions
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub total: f64,
    pub daily: f64,
    pub currency: String,
    pub optimization_goal: OptimizationGoal,
}

impl Default for BudgetPlan {
    fn default() -> Self {
        Self {
            total: 0.0,
            daily: 0.0,
            currency: "USD".to_string(),
            optimization_goal: OptimizationGoal::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FrequencyPeriod {
    Day,
    Week,
    Month,
}

/// Cap on how often one person sees the campaign.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyCap {
    pub impressions: u32,
    pub period: FrequencyPeriod,
}

impl Default for FrequencyCap {
    fn default() -> Self {
        Self {
            impressions: 3,
            period: FrequencyPeriod::Week,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePlan {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub timezone: String,
    pub frequency: FrequencyCap,
}

impl Default for SchedulePlan {
    fn default() -> Self {
        Self {
            start_date: None,
            end_date: None,
            timezone: "UTC".to_string(),
            frequency: FrequencyCap::default(),
        }
    }
}

// ─── Channels ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    Google,
    Youtube,
    Tiktok,
    Linkedin,
    Email,
    Display,
}

impl Platform {
    /// Wire name, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Google => "google",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Linkedin => "linkedin",
            Platform::Email => "email",
            Platform::Display => "display",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BidStrategy {
    LowestCost,
    CostCap,
    BidCap,
    TargetRoas,
}

impl Default for BidStrategy {
    fn default() -> Self {
        BidStrategy::LowestCost
    }
}

/// Per-channel plan inside the wizard. `budget_allocation` is a percent
/// of the total budget (0..=100); the sum across enabled channels is an
/// advisory value only and is never renormalized by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelPlan {
    pub platform: Platform,
    pub enabled: bool,
    pub budget_allocation: f64,
    #[serde(default)]
    pub bid_strategy: BidStrategy,
    /// Platform-specific targeting overrides, opaque to the engine.
    #[serde(default = "empty_object")]
    pub targeting: serde_json::Value,
}

fn empty_object() -> serde_json::Value {
    serde_json::json!({})
}

impl ChannelPlan {
    pub fn new(platform: Platform) -> Self {
        Self {
            platform,
            enabled: false,
            budget_allocation: 0.0,
            bid_strategy: BidStrategy::default(),
            targeting: empty_object(),
        }
    }
}

// ─── Creatives ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CreativeType {
    Image,
    Video,
    Carousel,
    Text,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreativeSpec {
    pub id: String,
    pub creative_type: CreativeType,
    pub name: String,
    pub headline: String,
    pub description: String,
    pub call_to_action: String,
    pub url: String,
    #[serde(default)]
    pub assets: Vec<String>,
    /// Platforms this creative runs on.
    #[serde(default)]
    pub channels: Vec<Platform>,
}

// ─── Targeting ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub age_min: u32,
    pub age_max: u32,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub incomes: Vec<String>,
}

impl Default for Demographics {
    fn default() -> Self {
        Self {
            age_min: 18,
            age_max: 65,
            genders: Vec::new(),
            incomes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetingSpec {
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub demographics: Demographics,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub behaviors: Vec<String>,
}

// ─── Wizard data aggregate ─────────────────────────────────────────────────

/// The single source of truth accumulated across wizard steps.
///
/// Invariants maintained by the engine's update helpers:
/// no duplicate audience ids, at most one channel per platform,
/// non-negative budgets, and `end_date >= start_date` when both set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardData {
    pub name: String,
    pub description: String,
    pub campaign_type: Option<CampaignType>,
    pub objectives: Vec<Objective>,
    /// Audience ids in selection order.
    pub selected_audiences: Vec<String>,
    /// Cached output of the reach estimator.
    pub estimated_reach: u64,
    pub budget: BudgetPlan,
    pub schedule: SchedulePlan,
    pub channels: Vec<ChannelPlan>,
    pub creatives: Vec<CreativeSpec>,
    pub targeting: TargetingSpec,
}

// ─── Draft campaign (assembler output) ─────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CreativePerformance {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cost: f64,
}

/// Top-level campaign performance record, zero-initialized at assembly.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CampaignPerformance {
    pub impressions: u64,
    pub reach: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
    pub roas: f64,
    pub ctr: f64,
    pub cpm: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub conversion_rate: f64,
    pub frequency: f64,
    pub quality_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftChannel {
    /// Channel id within the draft; equal to the platform wire name.
    pub id: String,
    pub platform: Platform,
    pub enabled: bool,
    /// Absolute amount carved out of the total budget.
    pub budget: f64,
    pub budget_type: String,
    pub bid_strategy: BidStrategy,
    pub targeting: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftCreative {
    #[serde(flatten)]
    pub creative: CreativeSpec,
    pub performance: CreativePerformance,
}

/// The assembled, not-yet-persisted campaign. `id`, `created`,
/// `updated`, and `created_by` are assigned by the persistence
/// collaborator, never by the assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignDraft {
    pub name: String,
    pub description: String,
    pub campaign_type: CampaignType,
    pub status: CampaignStatus,
    pub objectives: Vec<Objective>,
    pub audiences: Vec<String>,
    pub budget: BudgetPlan,
    pub schedule: SchedulePlan,
    pub channels: Vec<DraftChannel>,
    pub creatives: Vec<DraftCreative>,
    pub targeting: TargetingSpec,
    pub performance: CampaignPerformance,
}
