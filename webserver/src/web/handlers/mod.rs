//! Request handlers

pub mod api;

pub use api::{health_check, random_mean};
