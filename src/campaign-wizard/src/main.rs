//! Campaign Wizard — headless shell for the campaign-creation wizard
//! engine.
//!
//! Drives a complete wizard run from the command line and prints the
//! assembled draft campaign, standing in for the dashboard UI during
//! development.

use chrono::{Duration, Utc};
use clap::Parser;
use tracing::info;

use wizard_audiences::AudienceStore;
use wizard_core::config::WizardConfig;
use wizard_core::directory::{AudienceFilter, AudienceLookup};
use wizard_core::types::{CampaignType, Objective, Platform, Priority};
use wizard_engine::calculator::SeededOverlap;
use wizard_engine::{WizardPatch, WizardSession};

#[derive(Parser, Debug)]
#[command(name = "campaign-wizard")]
#[command(about = "Headless campaign-creation wizard shell")]
#[command(version)]
struct Cli {
    /// Campaign name
    #[arg(long, default_value = "Holiday Sale")]
    name: String,

    /// Total budget
    #[arg(long, default_value_t = 5000.0)]
    budget: f64,

    /// Flight length in days
    #[arg(long, default_value_t = 14)]
    days: i64,

    /// Seed for the overlap-discount heuristic
    #[arg(long, env = "CAMPAIGN_WIZARD__SEED", default_value_t = 0)]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campaign_wizard=info,wizard_engine=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = WizardConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        WizardConfig::default()
    });

    info!(name = %cli.name, budget = cli.budget, "Campaign Wizard starting");

    let directory = AudienceStore::with_demo_data();
    let overlap = SeededOverlap::new(cli.seed, &config.reach);
    let mut session = WizardSession::new();

    // Step 1: basic info.
    session.update(&WizardPatch::name(cli.name.clone()));
    session.update(&WizardPatch::campaign_type(CampaignType::Conversion));
    session.next_step();

    // Step 2: objectives.
    session.apply(|s| {
        s.add_objective(Objective {
            objective_type: "conversions".to_string(),
            unit: "purchases".to_string(),
            priority: Priority::Primary,
            target: 500.0,
        })
    });
    session.next_step();

    // Step 3: pick the two largest demo audiences.
    for audience in directory
        .list_audiences(&AudienceFilter::default())
        .iter()
        .take(2)
    {
        session.apply(|s| s.select_audience(audience.id.clone()));
    }
    let reach = session.estimate_reach(&directory, &overlap);
    info!(reach, "Estimated audience reach");
    session.next_step();

    // Step 4: budget and schedule; suggestions are advisory.
    if let Some(suggestions) = session.budget_suggestions(&config.suggestions) {
        info!(
            conservative = suggestions.conservative.daily,
            recommended = suggestions.recommended.daily,
            aggressive = suggestions.aggressive.daily,
            "Daily budget suggestions"
        );
    }
    let start = Utc::now();
    session.update(&WizardPatch::start_date(start));
    session.update(&WizardPatch::end_date(start + Duration::days(cli.days)));
    session.update(&WizardPatch::budget_total(cli.budget));
    info!(
        total = session.data().budget.total,
        daily = session.data().budget.daily,
        "Budget after cross-derivation"
    );
    session.next_step();

    // Step 5: channels, then skip the optional steps to review.
    session.apply(|s| s.enable_channel(Platform::Facebook));
    session.apply(|s| s.enable_channel(Platform::Google));
    info!(
        allocation_sum = session.state().allocation_sum(),
        "Channel allocations (advisory sum)"
    );
    session.go_to_step(7);

    info!(
        step = session.current_step(),
        completion = session.completion_percentage(),
        "Reached review"
    );

    // Launch: the creation sink here just pretty-prints the payload.
    let draft = session
        .launch(|draft| async move {
            println!("{}", serde_json::to_string_pretty(&draft)?);
            Ok(())
        })
        .await?;

    info!(campaign = %draft.name, "Draft campaign assembled");
    Ok(())
}
