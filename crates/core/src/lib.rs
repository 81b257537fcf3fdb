//! Shared domain types, configuration, errors, and collaborator traits
//! for the CampaignWizard engine.

pub mod config;
pub mod directory;
pub mod error;
pub mod notify;
pub mod types;

pub use config::WizardConfig;
pub use error::{WizardError, WizardResult};
