//! Presentation seam between the game engine and whatever draws it.

use crate::curriculum::Difficulty;

/// Tone of a message line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// Everything the engine tells the presentation layer. All methods default
/// to no-ops so test doubles only override what they observe.
pub trait Renderer {
    fn show_problem(&mut self, _text: &str) {}
    fn hide_problem(&mut self) {}
    fn show_keyboard(&mut self) {}
    fn hide_keyboard(&mut self) {}
    fn update_score(&mut self, _score: i64) {}
    fn update_timer(&mut self, _seconds_left: u32) {}
    fn update_health(&mut self, _hp: u32, _max: u32) {}
    fn update_group(&mut self, _sum: u8, _difficulty: Difficulty) {}
    fn show_message(&mut self, _text: &str, _severity: Severity) {}
    /// The player lands a hit on the monster.
    fn attack(&mut self) {}
    /// The monster lands a hit on the player.
    fn take_damage(&mut self) {}
    fn show_victory(&mut self, _points: i64) {}
    fn show_defeat(&mut self) {}
    fn spawn_monster(&mut self, _difficulty: Difficulty) {}
    fn dismiss_monster(&mut self) {}
    /// One heartbeat of monster motion while combat is live.
    fn monster_step(&mut self) {}
    fn clear_battlefield(&mut self) {}
}

/// Renderer that draws nothing.
pub struct NullRenderer;

impl Renderer for NullRenderer {}
