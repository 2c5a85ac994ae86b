//! Platform abstraction layer
//!
//! Turns raw browser signals into deterministic simulation input:
//! - Keyboard codes into held actions and fire presses
//! - Variable frame times into whole fixed ticks

pub mod clock;
pub mod input;

pub use clock::FixedTimestep;
pub use input::{Action, InputTracker};
