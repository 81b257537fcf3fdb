//! Static ordered catalog of wizard steps.

use serde::{Deserialize, Serialize};

/// Number of steps in the wizard. Fixed; the registry below is the
/// single definition of order.
pub const STEP_COUNT: usize = 8;

/// Identifier of one wizard step. Serializes to the dashboard's
/// kebab-case step ids (`basic-info`, `budget-schedule`, ...).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    BasicInfo,
    Objectives,
    Audience,
    BudgetSchedule,
    Channels,
    Creative,
    Targeting,
    Review,
}

/// One entry of the static step registry.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepDefinition {
    pub id: StepId,
    pub title: &'static str,
    pub description: &'static str,
    pub optional: bool,
}

/// The ordered, fixed step list. Index in this array is the state
/// machine's step index.
pub const STEPS: [StepDefinition; STEP_COUNT] = [
    StepDefinition {
        id: StepId::BasicInfo,
        title: "Basic Info",
        description: "Name the campaign and pick its type",
        optional: false,
    },
    StepDefinition {
        id: StepId::Objectives,
        title: "Objectives",
        description: "Define what success looks like",
        optional: false,
    },
    StepDefinition {
        id: StepId::Audience,
        title: "Audience",
        description: "Select who the campaign reaches",
        optional: false,
    },
    StepDefinition {
        id: StepId::BudgetSchedule,
        title: "Budget & Schedule",
        description: "Set spend limits and flight dates",
        optional: false,
    },
    StepDefinition {
        id: StepId::Channels,
        title: "Channels",
        description: "Choose platforms and split the budget",
        optional: false,
    },
    StepDefinition {
        id: StepId::Creative,
        title: "Creative",
        description: "Attach ads and copy",
        optional: true,
    },
    StepDefinition {
        id: StepId::Targeting,
        title: "Targeting",
        description: "Refine locations, devices, and demographics",
        optional: true,
    },
    StepDefinition {
        id: StepId::Review,
        title: "Review",
        description: "Check everything and launch",
        optional: false,
    },
];

impl StepId {
    /// Position of this step in the fixed order.
    pub fn index(&self) -> usize {
        STEPS
            .iter()
            .position(|s| s.id == *self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<StepId> {
        STEPS.get(index).map(|s| s.id)
    }

    pub fn is_optional(&self) -> bool {
        STEPS[self.index()].optional
    }

    pub fn is_last(&self) -> bool {
        self.index() == STEP_COUNT - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_is_fixed() {
        let ids: Vec<StepId> = STEPS.iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                StepId::BasicInfo,
                StepId::Objectives,
                StepId::Audience,
                StepId::BudgetSchedule,
                StepId::Channels,
                StepId::Creative,
                StepId::Targeting,
                StepId::Review,
            ]
        );
    }

    #[test]
    fn test_only_creative_and_targeting_are_optional() {
        for step in STEPS.iter() {
            let expected = matches!(step.id, StepId::Creative | StepId::Targeting);
            assert_eq!(step.optional, expected, "step {:?}", step.id);
        }
    }

    #[test]
    fn test_index_roundtrip() {
        for (i, step) in STEPS.iter().enumerate() {
            assert_eq!(step.id.index(), i);
            assert_eq!(StepId::from_index(i), Some(step.id));
        }
        assert_eq!(StepId::from_index(STEP_COUNT), None);
    }

    #[test]
    fn test_step_ids_serialize_kebab_case() {
        assert_eq!(
            serde_json::to_string(&StepId::BasicInfo).unwrap(),
            "\"basic-info\""
        );
        assert_eq!(
            serde_json::to_string(&StepId::BudgetSchedule).unwrap(),
            "\"budget-schedule\""
        );
    }
}
