//! Wizard state machine. Every transition is a pure reducer returning
//! a fresh [`WizardState`]; callers hold the current value and replace
//! it, which keeps transitions trivially testable and leaves the door
//! open for undo/redo.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use wizard_core::types::{ChannelPlan, Objective, Platform, WizardData};

use crate::calculator;
use crate::steps::{StepId, STEP_COUNT};
use crate::update::{self, WizardPatch};
use crate::validation;

/// Snapshot of the whole wizard: step cursor, data aggregate,
/// per-step completion flags, accumulated error map, and the advisory
/// loading flag toggled around the launch boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub current_step: usize,
    pub data: WizardData,
    pub completed: [bool; STEP_COUNT],
    /// field -> message, accumulated across visited steps; only the
    /// active step's keys are re-derived on each edit.
    pub errors: BTreeMap<String, String>,
    pub is_loading: bool,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// Initial state: first step, empty data, nothing completed.
    pub fn new() -> Self {
        Self {
            current_step: 0,
            data: WizardData::default(),
            completed: [false; STEP_COUNT],
            errors: BTreeMap::new(),
            is_loading: false,
        }
    }

    // ─── Queries ───────────────────────────────────────────────────────────

    pub fn step_id(&self) -> StepId {
        StepId::from_index(self.current_step).unwrap_or(StepId::Review)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step == STEP_COUNT - 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_step > 0
    }

    /// True iff the active step currently validates clean.
    pub fn can_go_next(&self) -> bool {
        validation::step_is_valid(self.step_id(), &self.data)
    }

    /// Share of completed steps in percent. Exact (multiples of 12.5),
    /// monotonic under forward navigation, and untouched by going back.
    pub fn completion_percentage(&self) -> f64 {
        let done = self.completed.iter().filter(|c| **c).count();
        100.0 * done as f64 / STEP_COUNT as f64
    }

    /// Advisory allocation sum over enabled channels (display only).
    pub fn allocation_sum(&self) -> f64 {
        calculator::allocation_sum(&self.data.channels)
    }

    // ─── Navigation ────────────────────────────────────────────────────────

    /// Advances one step. No-op while the active step fails validation;
    /// otherwise marks it completed and moves on (clamped at the last
    /// step).
    pub fn next_step(&self) -> Self {
        if !self.can_go_next() {
            return self.clone();
        }
        let mut next = self.clone();
        next.completed[next.current_step] = true;
        next.current_step = (next.current_step + 1).min(STEP_COUNT - 1);
        next.refresh_active_errors();
        debug!(step = ?next.step_id(), "Wizard advanced");
        next
    }

    /// Steps back, clamped at the first step. Never touches completion
    /// flags and never re-validates.
    pub fn previous_step(&self) -> Self {
        let mut prev = self.clone();
        prev.current_step = prev.current_step.saturating_sub(1);
        prev
    }

    /// Jumps to a step. Revisiting (`target <= current`) is always
    /// allowed. A forward jump is allowed only when the active step is
    /// completed or currently valid AND every skipped step is optional;
    /// the active step is marked completed on the way out. Anything
    /// else is a no-op — the UI hides such controls, but the state
    /// machine re-checks independently.
    pub fn go_to_step(&self, target: usize) -> Self {
        if target >= STEP_COUNT || target == self.current_step {
            return self.clone();
        }
        if target < self.current_step {
            let mut state = self.clone();
            state.current_step = target;
            state.refresh_active_errors();
            return state;
        }

        let skipped_required = (self.current_step + 1..target)
            .filter_map(StepId::from_index)
            .any(|id| !id.is_optional());
        let gate_open = self.completed[self.current_step] || self.can_go_next();
        if skipped_required || !gate_open {
            return self.clone();
        }

        let mut state = self.clone();
        if state.can_go_next() {
            state.completed[state.current_step] = true;
        }
        state.current_step = target;
        state.refresh_active_errors();
        state
    }

    /// Restores the initial state atomically (cancel/discard).
    pub fn reset(&self) -> Self {
        Self::new()
    }

    pub fn set_loading(&self, loading: bool) -> Self {
        let mut state = self.clone();
        state.is_loading = loading;
        state
    }

    // ─── Data updates ──────────────────────────────────────────────────────

    /// Merges a patch into the data and re-derives errors for the
    /// active step only (validation is for gating, not a global sweep
    /// on every keystroke).
    pub fn update(&self, patch: &WizardPatch) -> Self {
        let mut state = self.clone();
        update::apply(&mut state.data, patch);
        state.refresh_active_errors();
        state
    }

    pub fn add_objective(&self, objective: Objective) -> Self {
        let mut state = self.clone();
        state.data.objectives.push(objective);
        state.refresh_active_errors();
        state
    }

    pub fn remove_objective(&self, index: usize) -> Self {
        let mut state = self.clone();
        if index < state.data.objectives.len() {
            state.data.objectives.remove(index);
        }
        state.refresh_active_errors();
        state
    }

    /// Adds an audience id; duplicates are ignored, order preserved.
    pub fn select_audience(&self, id: impl Into<String>) -> Self {
        let id = id.into();
        let mut state = self.clone();
        if !state.data.selected_audiences.contains(&id) {
            state.data.selected_audiences.push(id);
        }
        state.refresh_active_errors();
        state
    }

    pub fn deselect_audience(&self, id: &str) -> Self {
        let mut state = self.clone();
        state.data.selected_audiences.retain(|a| a != id);
        state.refresh_active_errors();
        state
    }

    /// Caches a computed reach estimate on the aggregate.
    pub fn set_estimated_reach(&self, reach: u64) -> Self {
        let mut state = self.clone();
        state.data.estimated_reach = reach;
        state
    }

    /// Enables a channel, adding it to the plan if needed. A channel
    /// that transitions to enabled gets the default allocation
    /// `floor(100 / (enabled + 1))`; already-enabled channels keep
    /// their allocations untouched, so the sum may drift off 100.
    pub fn enable_channel(&self, platform: Platform) -> Self {
        let mut state = self.clone();
        let enabled_before = state.data.channels.iter().filter(|c| c.enabled).count();

        match state
            .data
            .channels
            .iter_mut()
            .find(|c| c.platform == platform)
        {
            Some(channel) if channel.enabled => {}
            Some(channel) => {
                channel.enabled = true;
                channel.budget_allocation = calculator::default_allocation(enabled_before);
            }
            None => {
                let mut channel = ChannelPlan::new(platform);
                channel.enabled = true;
                channel.budget_allocation = calculator::default_allocation(enabled_before);
                state.data.channels.push(channel);
            }
        }
        state.refresh_active_errors();
        state
    }

    /// Disables a channel, keeping its allocation for re-enabling UIs.
    pub fn disable_channel(&self, platform: Platform) -> Self {
        let mut state = self.clone();
        if let Some(channel) = state
            .data
            .channels
            .iter_mut()
            .find(|c| c.platform == platform)
        {
            channel.enabled = false;
        }
        state.refresh_active_errors();
        state
    }

    pub fn set_channel_allocation(&self, platform: Platform, allocation: f64) -> Self {
        let mut state = self.clone();
        if let Some(channel) = state
            .data
            .channels
            .iter_mut()
            .find(|c| c.platform == platform)
        {
            channel.budget_allocation = allocation.clamp(0.0, 100.0);
        }
        state
    }

    /// Overwrites `budget.daily`/`budget.total` from a suggestion;
    /// currency and optimization goal are untouched.
    pub fn apply_budget_suggestion(&self, suggestion: &calculator::BudgetPair) -> Self {
        let mut state = self.clone();
        state.data.budget.daily = suggestion.daily;
        state.data.budget.total = suggestion.total;
        state.refresh_active_errors();
        state
    }

    /// Drops the active step's keys from the error map and re-inserts
    /// whatever currently fails. Other steps' entries stay as last
    /// derived.
    fn refresh_active_errors(&mut self) {
        let step = self.step_id();
        for key in validation::step_error_keys(step) {
            self.errors.remove(*key);
        }
        self.errors.extend(validation::validate_step(step, &self.data));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wizard_core::types::{CampaignType, Priority};

    fn objective() -> Objective {
        Objective {
            objective_type: "conversions".to_string(),
            unit: "purchases".to_string(),
            priority: Priority::Primary,
            target: 100.0,
        }
    }

    /// State advanced through basic-info with valid data.
    fn after_basic_info() -> WizardState {
        WizardState::new()
            .update(&WizardPatch::name("Holiday Sale"))
            .update(&WizardPatch::campaign_type(CampaignType::Conversion))
            .next_step()
    }

    #[test]
    fn test_initial_state() {
        let state = WizardState::new();
        assert_eq!(state.current_step, 0);
        assert!(!state.can_go_previous());
        assert!(!state.is_last_step());
        assert_eq!(state.completion_percentage(), 0.0);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_invalid_advance_is_a_no_op() {
        let state = WizardState::new();
        assert!(!state.can_go_next());
        let after = state.next_step();
        assert_eq!(after.current_step, 0);
        assert_eq!(after.completed, [false; STEP_COUNT]);
        assert_eq!(
            serde_json::to_value(&after.data).unwrap(),
            serde_json::to_value(&state.data).unwrap()
        );
    }

    #[test]
    fn test_valid_advance_completes_step() {
        let state = after_basic_info();
        assert_eq!(state.current_step, 1);
        assert!(state.completed[0]);
        assert_eq!(state.completion_percentage(), 12.5);
    }

    #[test]
    fn test_previous_never_touches_completion() {
        let state = after_basic_info();
        let back = state.previous_step();
        assert_eq!(back.current_step, 0);
        assert!(back.completed[0]);
        assert_eq!(back.completion_percentage(), 12.5);

        // Clamped at the first step.
        assert_eq!(back.previous_step().current_step, 0);
    }

    #[test]
    fn test_go_to_step_gating() {
        let state = after_basic_info();

        // Revisit is always allowed.
        assert_eq!(state.go_to_step(0).current_step, 0);

        // Forward past a required, incomplete step is a no-op.
        assert_eq!(state.go_to_step(3).current_step, 1);
        assert_eq!(state.go_to_step(7).current_step, 1);

        // Next step requires the active step to validate.
        assert_eq!(state.go_to_step(2).current_step, 1);
        let with_objective = state.add_objective(objective());
        let jumped = with_objective.go_to_step(2);
        assert_eq!(jumped.current_step, 2);
        assert!(jumped.completed[1]);
    }

    #[test]
    fn test_go_to_step_skips_only_optional_steps() {
        // Drive a fully valid wizard to the channels step.
        let mut state = after_basic_info().add_objective(objective()).next_step();
        state = state.select_audience("aud-1").next_step();
        state = state
            .update(&WizardPatch::budget_total(5000.0))
            .update(&WizardPatch::start_date(chrono::Utc::now()))
            .next_step();
        state = state.enable_channel(Platform::Facebook);
        assert_eq!(state.current_step, 4);

        // Creative (5) and targeting (6) are optional: review reachable.
        let review = state.go_to_step(7);
        assert_eq!(review.current_step, 7);
        assert!(review.completed[4]);
        assert!(!review.completed[5]);
        assert!(!review.completed[6]);
        // 0..=4 completed -> 5 of 8.
        assert_eq!(review.completion_percentage(), 62.5);
    }

    #[test]
    fn test_completion_is_monotonic_under_back_navigation() {
        let state = after_basic_info().add_objective(objective()).next_step();
        let pct = state.completion_percentage();
        assert_eq!(pct, 25.0);
        assert!(state.previous_step().completion_percentage() >= pct);
        assert!(state.go_to_step(0).completion_percentage() >= pct);
    }

    #[test]
    fn test_update_refreshes_only_active_step_errors() {
        let state = WizardState::new().update(&WizardPatch::name("x"));
        // basic-info re-derived: name fixed, type still missing.
        assert!(!state.errors.contains_key("name"));
        assert!(state.errors.contains_key("type"));
        // Other steps' keys are not derived while they are inactive.
        assert!(!state.errors.contains_key("objectives"));
    }

    #[test]
    fn test_enable_channel_assigns_default_allocation() {
        let state = WizardState::new()
            .enable_channel(Platform::Facebook)
            .enable_channel(Platform::Google)
            .enable_channel(Platform::Tiktok);
        let allocations: Vec<f64> = state
            .data
            .channels
            .iter()
            .map(|c| c.budget_allocation)
            .collect();
        assert_eq!(allocations, vec![100.0, 50.0, 33.0]);
        assert_eq!(state.allocation_sum(), 183.0);

        // Re-enabling an already-enabled channel changes nothing.
        let again = state.enable_channel(Platform::Facebook);
        assert_eq!(again.data.channels[0].budget_allocation, 100.0);
    }

    #[test]
    fn test_disable_keeps_allocation_and_reenable_reassigns() {
        let state = WizardState::new()
            .enable_channel(Platform::Facebook)
            .disable_channel(Platform::Facebook);
        assert!(!state.data.channels[0].enabled);
        assert_eq!(state.data.channels[0].budget_allocation, 100.0);

        let back = state.enable_channel(Platform::Facebook);
        assert!(back.data.channels[0].enabled);
        assert_eq!(back.data.channels[0].budget_allocation, 100.0);
    }

    #[test]
    fn test_select_audience_dedupes() {
        let state = WizardState::new()
            .select_audience("a")
            .select_audience("b")
            .select_audience("a");
        assert_eq!(state.data.selected_audiences, vec!["a", "b"]);
    }

    #[test]
    fn test_apply_budget_suggestion_leaves_currency_alone() {
        let state = WizardState::new().update(&WizardPatch {
            budget: Some(crate::update::BudgetPatch {
                currency: Some("EUR".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let applied = state.apply_budget_suggestion(&calculator::BudgetPair {
            daily: 200.0,
            total: 6000.0,
        });
        assert_eq!(applied.data.budget.daily, 200.0);
        assert_eq!(applied.data.budget.total, 6000.0);
        assert_eq!(applied.data.budget.currency, "EUR");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let state = after_basic_info().reset();
        assert_eq!(state.current_step, 0);
        assert_eq!(state.completion_percentage(), 0.0);
        assert!(state.data.name.is_empty());
    }

    #[test]
    fn test_set_loading_is_isolated() {
        let state = after_basic_info().set_loading(true);
        assert!(state.is_loading);
        assert_eq!(state.current_step, 1);
        assert!(!state.set_loading(false).is_loading);
    }
}
