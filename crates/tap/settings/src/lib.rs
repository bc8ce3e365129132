//! Tapthrough Settings
//!
//! File-backed store for the app's notification open settings.

mod store;

pub use store::*;
