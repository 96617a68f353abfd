use std::sync::Arc;

use configs::{AppConfig, SeedRecord};
use models::Scholarship;
use service::scholarship::{InMemoryScholarshipRepository, ScholarshipService};

pub type AppScholarshipService = ScholarshipService<InMemoryScholarshipRepository>;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct ServerState {
    pub scholarships: Arc<AppScholarshipService>,
    /// Upper bound when buffering request bodies.
    pub max_body_bytes: usize,
}

impl ServerState {
    pub fn new(scholarships: Arc<AppScholarshipService>, max_body_bytes: usize) -> Self {
        Self { scholarships, max_body_bytes }
    }

    /// State with the configured seed records loaded into a fresh store.
    pub fn from_config(cfg: &AppConfig) -> Self {
        let repo = InMemoryScholarshipRepository::new(cfg.store.seed.iter().map(seed_to_record));
        Self::new(Arc::new(ScholarshipService::new(Arc::new(repo))), cfg.server.max_body_bytes)
    }
}

fn seed_to_record(seed: &SeedRecord) -> Scholarship {
    Scholarship::new(seed.name.clone(), seed.amount)
}
