use async_trait::async_trait;
use models::{Scholarship, Scholarships};
use serde::Serialize;

use crate::errors::ServiceError;
use crate::storage::memory_map_store::MemoryMapStore;

/// Result of a read: the named record, or the whole store when there is none.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Lookup {
    One(Scholarship),
    All(Scholarships),
}

/// Storage seam for scholarships. Each method is a single critical section.
#[async_trait]
pub trait ScholarshipRepository: Send + Sync {
    async fn list(&self) -> Result<Scholarships, ServiceError>;
    /// The record under `name`, or a snapshot of everything if it is absent.
    async fn get_or_all(&self, name: &str) -> Result<Lookup, ServiceError>;
    async fn upsert(&self, scholarship: Scholarship) -> Result<Scholarship, ServiceError>;
    /// If `name` exists, optionally replace its value and return what is stored afterwards.
    async fn update_existing(
        &self,
        name: &str,
        replacement: Option<Scholarship>,
    ) -> Result<Option<Scholarship>, ServiceError>;
    async fn delete(&self, name: &str) -> Result<bool, ServiceError>;
}

/// Process-lifetime repository backed by [`MemoryMapStore`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryScholarshipRepository {
    store: MemoryMapStore<String, Scholarship>,
}

impl InMemoryScholarshipRepository {
    pub fn new<I>(seed: I) -> Self
    where
        I: IntoIterator<Item = Scholarship>,
    {
        let store = MemoryMapStore::new(seed.into_iter().map(|s| (s.name.clone(), s)));
        Self { store }
    }
}

#[async_trait]
impl ScholarshipRepository for InMemoryScholarshipRepository {
    async fn list(&self) -> Result<Scholarships, ServiceError> {
        Ok(self.store.snapshot().await)
    }

    async fn get_or_all(&self, name: &str) -> Result<Lookup, ServiceError> {
        let found = self
            .store
            .with_map(|m| match m.get(name) {
                Some(s) => Lookup::One(s.clone()),
                None => Lookup::All(m.clone()),
            })
            .await;
        Ok(found)
    }

    async fn upsert(&self, scholarship: Scholarship) -> Result<Scholarship, ServiceError> {
        self.store.insert(scholarship.name.clone(), scholarship.clone()).await;
        Ok(scholarship)
    }

    async fn update_existing(
        &self,
        name: &str,
        replacement: Option<Scholarship>,
    ) -> Result<Option<Scholarship>, ServiceError> {
        let current = self
            .store
            .with_map(|m| {
                let slot = m.get_mut(name)?;
                if let Some(next) = replacement {
                    *slot = next;
                }
                Some(slot.clone())
            })
            .await;
        Ok(current)
    }

    async fn delete(&self, name: &str) -> Result<bool, ServiceError> {
        Ok(self.store.remove(&name.to_string()).await)
    }
}
