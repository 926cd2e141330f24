//! Per-run session state: lifecycle phase, score, health, round flags,
//! and the typed answer buffer.

use super::constants::{ANSWER_MAX_DIGITS, PLAYER_MAX_HP, ROUND_SECONDS};

/// Top-level lifecycle of the game.
///
/// `Loading` covers startup until persisted progress is restored, after
/// which the game sits in `Menu` between runs and `Running` during one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Menu,
    Running,
}

/// Mutable state for one run plus the totals that outlive it.
#[derive(Debug, Clone)]
pub struct GameSession {
    pub phase: Phase,
    /// Run score, zeroed at start. Signed: it may dip negative transiently
    /// before the game-over check ends the run.
    pub score: i64,
    /// Lifetime score restored from disk and persisted after each round.
    pub total_score: i64,
    pub player_hp: u32,
    /// A problem is on screen and the countdown is live.
    pub combat_active: bool,
    /// A round just ended; victory/defeat presentation is playing out.
    pub resolving: bool,
    pub paused: bool,
    pub seconds_left: u32,
    pub last_answer_correct: bool,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    /// The last run ended in a game over rather than a quit to menu.
    pub game_over: bool,
    /// Digits typed toward the current answer.
    pub answer_input: String,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Loading,
            score: 0,
            total_score: 0,
            player_hp: PLAYER_MAX_HP,
            combat_active: false,
            resolving: false,
            paused: false,
            seconds_left: ROUND_SECONDS,
            last_answer_correct: false,
            rounds_won: 0,
            rounds_lost: 0,
            game_over: false,
            answer_input: String::new(),
        }
    }

    /// Resets everything a fresh run needs. Lifetime totals are untouched.
    pub fn begin_run(&mut self) {
        self.phase = Phase::Running;
        self.score = 0;
        self.player_hp = PLAYER_MAX_HP;
        self.combat_active = false;
        self.resolving = false;
        self.paused = false;
        self.seconds_left = ROUND_SECONDS;
        self.last_answer_correct = false;
        self.rounds_won = 0;
        self.rounds_lost = 0;
        self.game_over = false;
        self.answer_input.clear();
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Appends a digit to the answer buffer, capped at three digits
    /// (9 × 9 = 81 is the largest possible answer).
    pub fn push_digit(&mut self, digit: char) {
        if digit.is_ascii_digit() && self.answer_input.len() < ANSWER_MAX_DIGITS {
            self.answer_input.push(digit);
        }
    }

    pub fn pop_digit(&mut self) {
        self.answer_input.pop();
    }

    /// Takes the buffer, leaving it empty for the next round.
    pub fn take_answer(&mut self) -> String {
        std::mem::take(&mut self.answer_input)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
