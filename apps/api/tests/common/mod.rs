//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests,
//! including the in-memory store, fixtures and helper functions.

#![allow(unused_imports)]

pub mod fixtures;
pub mod helpers;
pub mod mocks;

pub use fixtures::*;
pub use helpers::*;
pub use mocks::*;
