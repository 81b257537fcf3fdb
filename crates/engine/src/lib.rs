//! Campaign-creation wizard engine — ordered-step state machine,
//! per-step validation, derived budget/reach calculations, and final
//! assembly of wizard state into a draft campaign.

pub mod assembler;
pub mod calculator;
pub mod session;
pub mod state;
pub mod steps;
pub mod update;
pub mod validation;

pub use session::WizardSession;
pub use state::WizardState;
pub use steps::{StepId, StepDefinition, STEP_COUNT};
pub use update::WizardPatch;
