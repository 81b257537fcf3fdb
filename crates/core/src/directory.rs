//! Audience-lookup collaborator trait. The wizard engine consumes this
//! to resolve selected audience ids into sizes for reach estimation and
//! the review summary; the `wizard-audiences` crate provides the
//! in-memory implementation.

use serde::{Deserialize, Serialize};

use crate::types::{Audience, AudienceStatus};

/// Read-only audience directory.
pub trait AudienceLookup: Send + Sync {
    fn get_audience(&self, id: &str) -> Option<Audience>;
    fn list_audiences(&self, filter: &AudienceFilter) -> Vec<Audience>;
}

/// Filter for directory queries. All criteria are conjunctive; a
/// default filter matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AudienceFilter {
    pub status: Option<AudienceStatus>,
    pub source: Option<String>,
    pub min_size: Option<u64>,
    /// Case-insensitive substring match on the audience name.
    pub query: Option<String>,
}

impl AudienceFilter {
    pub fn matches(&self, audience: &Audience) -> bool {
        if let Some(status) = self.status {
            if audience.status != status {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if &audience.source != source {
                return false;
            }
        }
        if let Some(min_size) = self.min_size {
            if audience.size < min_size {
                return false;
            }
        }
        if let Some(query) = &self.query {
            if !audience
                .name
                .to_lowercase()
                .contains(&query.to_lowercase())
            {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_audience() -> Audience {
        Audience {
            id: "aud-1".to_string(),
            name: "High Intent Shoppers".to_string(),
            size: 200_000,
            similarity: 0.82,
            status: AudienceStatus::Active,
            performance: 1.1,
            source: "crm".to_string(),
        }
    }

    #[test]
    fn test_default_filter_matches_everything() {
        assert!(AudienceFilter::default().matches(&sample_audience()));
    }

    #[test]
    fn test_filter_criteria_are_conjunctive() {
        let filter = AudienceFilter {
            status: Some(AudienceStatus::Active),
            min_size: Some(500_000),
            ..Default::default()
        };
        // Status matches but size does not.
        assert!(!filter.matches(&sample_audience()));
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let filter = AudienceFilter {
            query: Some("SHOPPERS".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&sample_audience()));
    }
}
