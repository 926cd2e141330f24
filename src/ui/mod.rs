//! Terminal presentation layer: a view model fed through `Renderer` and
//! one scene per game phase.

pub mod battle_scene;
pub mod bestiary;
pub mod menu_scene;
pub mod state;

use ratatui::style::Color;
use ratatui::Frame;

use crate::audio::AudioSink;
use crate::core::engine::GameEngine;
use crate::core::frontend::Severity;
use crate::core::session::Phase;
use crate::curriculum::Difficulty;
use crate::storage::ProgressStore;
use state::UiState;

/// Top-level draw dispatch, one scene per phase.
pub fn draw_ui<S: ProgressStore, A: AudioSink>(frame: &mut Frame, engine: &GameEngine<UiState, S, A>) {
    let area = frame.size();

    match engine.session().phase {
        Phase::Loading => menu_scene::draw_loading(frame, area),
        Phase::Menu => menu_scene::draw_menu_scene(
            frame,
            area,
            engine.renderer(),
            engine.session(),
            engine.curriculum(),
            engine.last_played(),
        ),
        Phase::Running => {
            battle_scene::draw_battle_scene(frame, area, engine.renderer(), engine.session())
        }
    }
}

/// Accent color for a difficulty tier.
pub fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Cyan,
        Difficulty::Hard => Color::Yellow,
        Difficulty::VeryHard => Color::Magenta,
        Difficulty::Expert => Color::Red,
    }
}

/// Text color for a message severity.
pub fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}
