//! # photo-app
//!
//! Composition root: resolves the device identity, selects the live or
//! inert store, loads the first gallery page, and follows the live feed and
//! badge counts until interrupted.

pub mod runtime;
pub mod state;

pub use runtime::{create_app_state, run};
pub use state::AppState;
