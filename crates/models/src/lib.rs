//! Record types shared by the service and HTTP layers.

pub mod scholarship;

pub use scholarship::{Scholarship, Scholarships};
