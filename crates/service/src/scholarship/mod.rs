pub mod repository;
pub mod service;

pub use repository::{InMemoryScholarshipRepository, Lookup, ScholarshipRepository};
pub use service::ScholarshipService;
