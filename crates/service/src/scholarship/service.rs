use std::sync::Arc;

use models::{Scholarship, Scholarships};
use tracing::{debug, info, instrument};

use crate::errors::ServiceError;
use crate::scholarship::repository::{Lookup, ScholarshipRepository};

/// Application service holding the scholarship rules on top of a repository.
///
/// Two behaviours are kept on purpose:
/// - reading an unknown name yields the full listing instead of an error;
/// - an update whose amount is zero leaves the stored record alone.
pub struct ScholarshipService<R: ScholarshipRepository> {
    repo: Arc<R>,
}

impl<R: ScholarshipRepository> ScholarshipService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Scholarships, ServiceError> {
        self.repo.list().await
    }

    /// `None` means no identifier was supplied.
    pub async fn lookup(&self, name: Option<&str>) -> Result<Lookup, ServiceError> {
        match name {
            Some(name) => self.repo.get_or_all(name).await,
            None => self.repo.list().await.map(Lookup::All),
        }
    }

    #[instrument(skip(self, scholarship), fields(name = %scholarship.name))]
    pub async fn create(&self, scholarship: Scholarship) -> Result<Scholarship, ServiceError> {
        let stored = self.repo.upsert(scholarship).await?;
        info!(amount = stored.amount, "scholarship_stored");
        Ok(stored)
    }

    #[instrument(skip(self, scholarship))]
    pub async fn update(&self, name: &str, scholarship: Scholarship) -> Result<Scholarship, ServiceError> {
        let replacement = if scholarship.amount != 0 {
            Some(scholarship)
        } else {
            debug!("zero amount, keeping stored value");
            None
        };
        self.repo
            .update_existing(name, replacement)
            .await?
            .ok_or_else(|| ServiceError::not_found(name))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, name: &str) -> Result<(), ServiceError> {
        if self.repo.delete(name).await? {
            info!("scholarship_deleted");
            Ok(())
        } else {
            Err(ServiceError::not_found(name))
        }
    }
}
