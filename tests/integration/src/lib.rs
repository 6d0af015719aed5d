//! Integration test utilities for the photo reactions workspace
//!
//! Provides fixtures and a harness that wires the engines to a live
//! in-process store or to the inert store.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
