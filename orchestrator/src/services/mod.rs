//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod random_org;

// Re-export service implementations
pub use random_org::RealRandomnessSource;
