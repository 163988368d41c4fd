//! # System Module
//!
//! The stage sequence of the journey.
//!
//! Stage definitions are pure data; the controller owns the current stage
//! and decides when it changes.

mod stage;

pub use stage::*;
