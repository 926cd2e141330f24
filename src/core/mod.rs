//! Game state, timers, and the orchestration engine.

pub mod constants;
pub mod engine;
pub mod frontend;
pub mod session;
pub mod timer;
