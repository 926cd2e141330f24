//! Key dispatch for the menu and battle screens.

use crate::audio::AudioSink;
use crate::core::engine::GameEngine;
use crate::core::frontend::Renderer;
use crate::core::session::Phase;
use crate::storage::ProgressStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Result of handling one key event.
pub enum InputResult {
    /// Keep the event loop going.
    Continue,
    /// Leave the application. Any running game has already been stopped.
    Quit,
    /// The player toggled sound; the host owns the settings file.
    ToggleSound,
}

/// Routes a key event to the engine based on the current phase.
pub fn handle_key<R: Renderer, S: ProgressStore, A: AudioSink>(
    key: KeyEvent,
    engine: &mut GameEngine<R, S, A>,
) -> InputResult {
    // Ctrl+C quits from anywhere, saving first when a run is live.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        if engine.session().is_running() {
            engine.stop_game();
        }
        return InputResult::Quit;
    }

    match engine.session().phase {
        Phase::Loading => InputResult::Continue,
        Phase::Menu => handle_menu_key(key, engine),
        Phase::Running => handle_battle_key(key, engine),
    }
}

fn handle_menu_key<R: Renderer, S: ProgressStore, A: AudioSink>(
    key: KeyEvent,
    engine: &mut GameEngine<R, S, A>,
) -> InputResult {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') => {
            engine.start_game();
            InputResult::Continue
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            engine.reset_progress();
            InputResult::Continue
        }
        KeyCode::Char('m') | KeyCode::Char('M') => InputResult::ToggleSound,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputResult::Quit,
        _ => InputResult::Continue,
    }
}

fn handle_battle_key<R: Renderer, S: ProgressStore, A: AudioSink>(
    key: KeyEvent,
    engine: &mut GameEngine<R, S, A>,
) -> InputResult {
    match key.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            engine.type_digit(c);
            InputResult::Continue
        }
        KeyCode::Backspace => {
            engine.erase_digit();
            InputResult::Continue
        }
        KeyCode::Enter => {
            engine.submit_typed();
            InputResult::Continue
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            engine.show_hint();
            InputResult::Continue
        }
        KeyCode::Char('p') | KeyCode::Char('P') => {
            if engine.session().paused {
                engine.resume();
            } else {
                engine.pause();
            }
            InputResult::Continue
        }
        KeyCode::Char('m') | KeyCode::Char('M') => InputResult::ToggleSound,
        // Leaving the run goes back to the menu, not out of the app.
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
            engine.stop_game();
            InputResult::Continue
        }
        _ => InputResult::Continue,
    }
}
