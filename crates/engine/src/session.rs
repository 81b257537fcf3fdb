//! Mutable facade over the reducer-style state machine, plus the one
//! asynchronous boundary: handing the assembled draft to the external
//! creation collaborator.

use std::future::Future;
use std::sync::Arc;

use tracing::{info, warn};

use wizard_core::config::SuggestionConfig;
use wizard_core::directory::AudienceLookup;
use wizard_core::notify::{noop_sink, NotificationLevel, NotificationSink};
use wizard_core::types::{CampaignDraft, WizardData};
use wizard_core::{WizardError, WizardResult};

use crate::assembler;
use crate::calculator::{self, BudgetSuggestions, OverlapModel};
use crate::state::WizardState;
use crate::steps::{StepDefinition, STEPS};
use crate::update::WizardPatch;
use crate::validation;

/// One campaign-creation session: owns the current [`WizardState`] and
/// applies reducer transitions in place for shell callers. Single
/// actor, fully synchronous except [`WizardSession::launch`].
pub struct WizardSession {
    state: WizardState,
    notifier: Arc<dyn NotificationSink>,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            state: WizardState::new(),
            notifier: noop_sink(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationSink>) -> Self {
        self.notifier = notifier;
        self
    }

    // ─── Snapshot accessors ────────────────────────────────────────────────

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn data(&self) -> &WizardData {
        &self.state.data
    }

    pub fn current_step(&self) -> usize {
        self.state.current_step
    }

    /// The static step catalog, for rendering progress chrome.
    pub fn steps(&self) -> &'static [StepDefinition] {
        &STEPS
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// Accumulated field -> message validation errors.
    pub fn errors(&self) -> &std::collections::BTreeMap<String, String> {
        &self.state.errors
    }

    pub fn can_go_next(&self) -> bool {
        self.state.can_go_next()
    }

    pub fn can_go_previous(&self) -> bool {
        self.state.can_go_previous()
    }

    pub fn is_last_step(&self) -> bool {
        self.state.is_last_step()
    }

    pub fn completion_percentage(&self) -> f64 {
        self.state.completion_percentage()
    }

    // ─── Transitions ───────────────────────────────────────────────────────

    pub fn next_step(&mut self) {
        self.state = self.state.next_step();
    }

    pub fn previous_step(&mut self) {
        self.state = self.state.previous_step();
    }

    pub fn go_to_step(&mut self, target: usize) {
        self.state = self.state.go_to_step(target);
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset();
    }

    pub fn update(&mut self, patch: &WizardPatch) {
        self.state = self.state.update(patch);
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.state = self.state.set_loading(loading);
    }

    /// Applies any reducer transition to the owned state, e.g.
    /// `session.apply(|s| s.enable_channel(Platform::Facebook))`.
    pub fn apply(&mut self, f: impl FnOnce(&WizardState) -> WizardState) {
        self.state = f(&self.state);
    }

    // ─── Derived calculations ──────────────────────────────────────────────

    /// Resolves the selected audience ids against the directory,
    /// estimates reach with the injected overlap model, and caches the
    /// result on the aggregate. Ids the directory no longer knows are
    /// skipped with a warning rather than failing the wizard.
    pub fn estimate_reach(
        &mut self,
        directory: &dyn AudienceLookup,
        model: &dyn OverlapModel,
    ) -> u64 {
        let mut audiences = Vec::with_capacity(self.state.data.selected_audiences.len());
        for id in &self.state.data.selected_audiences {
            match directory.get_audience(id) {
                Some(audience) => audiences.push(audience),
                None => warn!(audience_id = %id, "Selected audience not in directory"),
            }
        }
        let reach = calculator::estimate_reach(&audiences, model);
        self.state = self.state.set_estimated_reach(reach);
        reach
    }

    /// Suggestion tiers for the budget step. `None` until a campaign
    /// type is chosen on basic-info.
    pub fn budget_suggestions(&self, config: &SuggestionConfig) -> Option<BudgetSuggestions> {
        let campaign_type = self.state.data.campaign_type?;
        Some(calculator::budget_suggestions(
            self.state.data.estimated_reach,
            campaign_type,
            config,
        ))
    }

    // ─── Launch & close ────────────────────────────────────────────────────

    /// Assembles the draft and hands it to the creation collaborator.
    /// `is_loading` is set for the duration and always reset; on
    /// failure the wizard data stays intact and editable so the user
    /// can retry manually. No automatic retries, no partial campaigns.
    pub async fn launch<F, Fut>(&mut self, create: F) -> WizardResult<CampaignDraft>
    where
        F: FnOnce(CampaignDraft) -> Fut,
        Fut: Future<Output = anyhow::Result<()>>,
    {
        if !validation::ready_to_launch(&self.state.data) {
            return Err(WizardError::NotReady(
                "required steps have validation errors".to_string(),
            ));
        }

        let draft = assembler::assemble(&self.state.data)?;
        info!(campaign = %draft.name, channels = draft.channels.len(), "Launching campaign");

        self.set_loading(true);
        let result = create(draft.clone()).await;
        self.set_loading(false);

        match result {
            Ok(()) => {
                self.notifier
                    .notify(NotificationLevel::Success, "Campaign created as draft");
                Ok(draft)
            }
            Err(e) => {
                warn!(error = %e, "Campaign creation failed; wizard data kept");
                self.notifier
                    .notify(NotificationLevel::Error, "Campaign creation failed");
                Err(WizardError::Launch(e.to_string()))
            }
        }
    }

    /// Closes the wizard. With any progress made, an explicit discard
    /// confirmation is required before the state is thrown away;
    /// returns whether the session was actually reset.
    pub fn close(&mut self, confirm_discard: bool) -> bool {
        if self.completion_percentage() > 0.0 && !confirm_discard {
            return false;
        }
        self.reset();
        true
    }
}
