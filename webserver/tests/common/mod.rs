//! Common test utilities for the webserver suites

#![allow(dead_code)]

pub mod helpers;

pub use helpers::{FakeSource, TestHelpers};
