//! Service layer for the scholarship store.
//! - `storage` holds the lock-guarded map.
//! - `scholarship` holds the repository seam and the business rules on top of it.

pub mod errors;
pub mod storage;
pub mod scholarship;
