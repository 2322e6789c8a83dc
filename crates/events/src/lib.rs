//! Event system for phishing checks
//!
//! This crate provides the event bus and event types a presentation
//! adapter consumes to follow a run phase by phase.

mod bus;
mod types;

pub use bus::{EventBus, RunEvents};
pub use types::*;
