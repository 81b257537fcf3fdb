//! In-memory audience directory — the audience-lookup collaborator
//! consumed by the wizard's reach estimator and review summary.

pub mod store;

pub use store::AudienceStore;
