//! Arithmancer - Terminal Multiplication Combat Trainer
//!
//! This module exposes the game logic for testing and external use.

// Allow dead code in library - some functions are only used by the binary
#![allow(dead_code)]

pub mod audio;
pub mod build_info;
pub mod core;
pub mod curriculum;
pub mod input;
pub mod storage;
pub mod ui;

pub use crate::core::engine::GameEngine;
pub use crate::core::session::{GameSession, Phase};
pub use crate::curriculum::Curriculum;
