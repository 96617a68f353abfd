use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("scholarship {0:?} not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(name: &str) -> Self {
        Self::NotFound(name.to_string())
    }
}
