//! Common test utilities for store integration tests
//!
//! This module provides shared test infrastructure for integration tests,
//! including database fixtures, seed helpers, and store bootstrap.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
