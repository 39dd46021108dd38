//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod assembler;

// Re-export commonly used types
pub use assembler::ResponseAssembler;
