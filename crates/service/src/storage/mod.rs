//! Storage abstractions for service layer
//!
//! Holds the in-memory map store used as the backing of the repositories.

pub mod memory_map_store;
