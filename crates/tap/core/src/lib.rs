//! Tapthrough Core Types
//!
//! Push payload model and the open-action decision produced when a user taps
//! a notification.

mod action;
mod payload;
mod settings;

pub use action::*;
pub use payload::*;
pub use settings::*;
