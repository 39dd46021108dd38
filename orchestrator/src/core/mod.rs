//! Core business logic modules
//!
//! Pure data transformations with no I/O dependencies

pub mod parser;
pub mod request_builder;
pub mod stats;

// Re-export commonly used items
pub use parser::parse_integers;
pub use request_builder::build_upstream_url;
pub use stats::{EMPTY_SAMPLE_VALUE, mean, sample_result, standard_deviation};
