//! In-memory audience store backed by DashMap.
//!
//! Production: replace with the real CDP-backed directory service.
//! This provides the same API surface for development and testing.

use dashmap::DashMap;
use tracing::info;

use wizard_core::directory::{AudienceFilter, AudienceLookup};
use wizard_core::types::{Audience, AudienceStatus};

/// Thread-safe audience directory.
pub struct AudienceStore {
    audiences: DashMap<String, Audience>,
}

impl AudienceStore {
    pub fn new() -> Self {
        Self {
            audiences: DashMap::new(),
        }
    }

    /// A store pre-populated with demo audiences for development and
    /// the headless shell.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        store.seed_demo_audiences();
        store
    }

    pub fn upsert(&self, audience: Audience) {
        self.audiences.insert(audience.id.clone(), audience);
    }

    pub fn remove(&self, id: &str) -> bool {
        self.audiences.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.audiences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.audiences.is_empty()
    }

    fn seed_demo_audiences(&self) {
        info!("Seeding demo audiences");
        let demo = [
            ("aud-cart-abandoners", "Cart Abandoners 30d", 200_000, 0.92, "crm", 1.25),
            ("aud-high-intent", "High Intent Shoppers", 150_000, 0.85, "web", 1.4),
            ("aud-lookalike-buyers", "Lookalike: Past Buyers", 480_000, 0.71, "platform", 1.0),
            ("aud-newsletter", "Newsletter Subscribers", 95_000, 0.88, "crm", 1.1),
            ("aud-lapsed", "Lapsed Customers 180d", 310_000, 0.64, "crm", 0.8),
        ];
        for (id, name, size, similarity, source, performance) in demo {
            self.upsert(Audience {
                id: id.to_string(),
                name: name.to_string(),
                size,
                similarity,
                status: AudienceStatus::Active,
                performance,
                source: source.to_string(),
            });
        }
        info!(count = self.len(), "Seeded demo audiences");
    }
}

impl Default for AudienceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AudienceLookup for AudienceStore {
    fn get_audience(&self, id: &str) -> Option<Audience> {
        self.audiences.get(id).map(|r| r.value().clone())
    }

    /// Filtered listing, largest audiences first.
    fn list_audiences(&self, filter: &AudienceFilter) -> Vec<Audience> {
        let mut audiences: Vec<Audience> = self
            .audiences
            .iter()
            .filter(|r| filter.matches(r.value()))
            .map(|r| r.value().clone())
            .collect();
        audiences.sort_by(|a, b| b.size.cmp(&a.size));
        audiences
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_upsert() {
        let store = AudienceStore::new();
        assert!(store.is_empty());
        store.upsert(Audience {
            id: "aud-1".to_string(),
            name: "Testers".to_string(),
            size: 1_000,
            similarity: 1.0,
            status: AudienceStatus::Active,
            performance: 1.0,
            source: "crm".to_string(),
        });
        assert_eq!(store.get_audience("aud-1").unwrap().name, "Testers");
        assert!(store.get_audience("aud-2").is_none());
    }

    #[test]
    fn test_list_sorted_by_size_desc() {
        let store = AudienceStore::with_demo_data();
        let all = store.list_audiences(&AudienceFilter::default());
        assert_eq!(all.len(), 5);
        assert!(all.windows(2).all(|w| w[0].size >= w[1].size));
    }

    #[test]
    fn test_list_applies_filter() {
        let store = AudienceStore::with_demo_data();
        let filter = AudienceFilter {
            source: Some("crm".to_string()),
            min_size: Some(100_000),
            ..Default::default()
        };
        let matches = store.list_audiences(&filter);
        assert!(!matches.is_empty());
        assert!(matches
            .iter()
            .all(|a| a.source == "crm" && a.size >= 100_000));
    }

    #[test]
    fn test_remove() {
        let store = AudienceStore::with_demo_data();
        assert!(store.remove("aud-newsletter"));
        assert!(!store.remove("aud-newsletter"));
        assert!(store.get_audience("aud-newsletter").is_none());
    }
}
