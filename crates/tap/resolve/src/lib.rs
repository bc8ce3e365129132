//! Tapthrough Resolver
//!
//! Decides what a notification tap should do and hands the decision to a
//! dispatcher.

mod click;
mod resolver;
mod traits;

pub use click::*;
pub use resolver::*;
pub use traits::*;
