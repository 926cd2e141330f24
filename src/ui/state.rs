//! View model the engine paints through the `Renderer` trait.
//!
//! Scenes read these fields every frame; the engine writes them through the
//! trait methods. Transient effects (message line, strike and victory
//! flashes) carry countdowns that `tick()` decays with wall-clock time.

use crate::core::constants::{MIN_SUM_GROUP, PLAYER_MAX_HP, ROUND_SECONDS};
use crate::core::frontend::{Renderer, Severity};
use crate::curriculum::Difficulty;
use crate::ui::bestiary::{self, MonsterSprite};

/// How long a message stays on screen, in seconds.
const NOTICE_SECONDS: f64 = 4.0;

/// Duration of the strike and hurt flashes, in seconds.
const FLASH_SECONDS: f64 = 0.35;

/// Duration of the floating points banner after a win, in seconds.
const VICTORY_SECONDS: f64 = 1.2;

/// Ground covered per combat beat as a fraction of the approach path.
const MONSTER_STEP: f64 = 0.0028;

/// Closest the monster gets to the player; it looms there until the
/// round resolves.
const MONSTER_NEAR: f64 = 0.22;

pub struct UiState {
    pub problem_text: Option<String>,
    pub keyboard_visible: bool,
    pub score: i64,
    pub seconds_left: u32,
    pub hp: u32,
    pub hp_max: u32,
    pub group_sum: u8,
    pub group_difficulty: Difficulty,
    /// Last message shown, with its tone. Cleared when `notice_ttl` runs out.
    pub notice: Option<(String, Severity)>,
    pub notice_ttl: f64,
    /// Player just landed a hit.
    pub strike_flash: f64,
    /// Player just took a hit.
    pub hurt_flash: f64,
    pub victory_flash: f64,
    pub victory_points: i64,
    pub monster: Option<MonsterSprite>,
    /// Remaining fraction of the monster's approach path. 1.0 at spawn,
    /// walked down to `MONSTER_NEAR` one combat beat at a time.
    pub monster_distance: f64,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            problem_text: None,
            keyboard_visible: false,
            score: 0,
            seconds_left: ROUND_SECONDS,
            hp: PLAYER_MAX_HP,
            hp_max: PLAYER_MAX_HP,
            group_sum: MIN_SUM_GROUP,
            group_difficulty: Difficulty::for_sum(MIN_SUM_GROUP),
            notice: None,
            notice_ttl: 0.0,
            strike_flash: 0.0,
            hurt_flash: 0.0,
            victory_flash: 0.0,
            victory_points: 0,
            monster: None,
            monster_distance: 1.0,
        }
    }

    /// Advances the transient effects by `dt` seconds of wall-clock time.
    pub fn tick(&mut self, dt: f64) {
        if self.notice.is_some() {
            self.notice_ttl -= dt;
            if self.notice_ttl <= 0.0 {
                self.notice = None;
                self.notice_ttl = 0.0;
            }
        }
        self.strike_flash = (self.strike_flash - dt).max(0.0);
        self.hurt_flash = (self.hurt_flash - dt).max(0.0);
        self.victory_flash = (self.victory_flash - dt).max(0.0);
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for UiState {
    fn show_problem(&mut self, text: &str) {
        self.problem_text = Some(text.to_string());
    }

    fn hide_problem(&mut self) {
        self.problem_text = None;
    }

    fn show_keyboard(&mut self) {
        self.keyboard_visible = true;
    }

    fn hide_keyboard(&mut self) {
        self.keyboard_visible = false;
    }

    fn update_score(&mut self, score: i64) {
        self.score = score;
    }

    fn update_timer(&mut self, seconds_left: u32) {
        self.seconds_left = seconds_left;
    }

    fn update_health(&mut self, hp: u32, max: u32) {
        self.hp = hp;
        self.hp_max = max;
    }

    fn update_group(&mut self, sum: u8, difficulty: Difficulty) {
        self.group_sum = sum;
        self.group_difficulty = difficulty;
    }

    fn show_message(&mut self, text: &str, severity: Severity) {
        self.notice = Some((text.to_string(), severity));
        self.notice_ttl = NOTICE_SECONDS;
    }

    fn attack(&mut self) {
        self.strike_flash = FLASH_SECONDS;
    }

    fn take_damage(&mut self) {
        self.hurt_flash = FLASH_SECONDS;
    }

    fn show_victory(&mut self, points: i64) {
        self.victory_flash = VICTORY_SECONDS;
        self.victory_points = points;
    }

    fn show_defeat(&mut self) {
        self.hurt_flash = FLASH_SECONDS;
    }

    fn spawn_monster(&mut self, difficulty: Difficulty) {
        self.monster = Some(bestiary::summon(&mut rand::thread_rng(), difficulty));
        self.monster_distance = 1.0;
    }

    fn dismiss_monster(&mut self) {
        self.monster = None;
    }

    fn monster_step(&mut self) {
        if self.monster.is_some() {
            self.monster_distance = (self.monster_distance - MONSTER_STEP).max(MONSTER_NEAR);
        }
    }

    fn clear_battlefield(&mut self) {
        self.monster = None;
        self.problem_text = None;
        self.keyboard_visible = false;
        self.strike_flash = 0.0;
        self.hurt_flash = 0.0;
        self.victory_flash = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_fades_after_its_ttl() {
        let mut ui = UiState::new();
        ui.show_message("Correct! 3 × 4 = 12", Severity::Success);

        ui.tick(NOTICE_SECONDS - 0.1);
        assert!(ui.notice.is_some());

        ui.tick(0.2);
        assert!(ui.notice.is_none());
        assert_eq!(ui.notice_ttl, 0.0);
    }

    #[test]
    fn newer_message_restarts_the_clock() {
        let mut ui = UiState::new();
        ui.show_message("first", Severity::Info);
        ui.tick(NOTICE_SECONDS - 0.1);
        ui.show_message("second", Severity::Warning);

        ui.tick(0.5);
        let (text, severity) = ui.notice.clone().unwrap();
        assert_eq!(text, "second");
        assert_eq!(severity, Severity::Warning);
    }

    #[test]
    fn flashes_decay_and_clamp_at_zero() {
        let mut ui = UiState::new();
        ui.attack();
        ui.take_damage();
        ui.show_victory(45);

        ui.tick(10.0);
        assert_eq!(ui.strike_flash, 0.0);
        assert_eq!(ui.hurt_flash, 0.0);
        assert_eq!(ui.victory_flash, 0.0);
        assert_eq!(ui.victory_points, 45);
    }

    #[test]
    fn monster_walks_in_and_stops_short() {
        let mut ui = UiState::new();
        ui.spawn_monster(Difficulty::Easy);
        assert_eq!(ui.monster_distance, 1.0);

        for _ in 0..10_000 {
            ui.monster_step();
        }
        assert_eq!(ui.monster_distance, MONSTER_NEAR);
        assert!(ui.monster.is_some());
    }

    #[test]
    fn steps_without_a_monster_do_nothing() {
        let mut ui = UiState::new();
        ui.monster_step();
        assert_eq!(ui.monster_distance, 1.0);
    }

    #[test]
    fn respawn_resets_the_approach() {
        let mut ui = UiState::new();
        ui.spawn_monster(Difficulty::Medium);
        for _ in 0..500 {
            ui.monster_step();
        }
        assert!(ui.monster_distance < 1.0);

        ui.dismiss_monster();
        ui.spawn_monster(Difficulty::Medium);
        assert_eq!(ui.monster_distance, 1.0);
    }

    #[test]
    fn clearing_the_battlefield_keeps_the_notice() {
        let mut ui = UiState::new();
        ui.show_problem("3 × 4");
        ui.show_keyboard();
        ui.spawn_monster(Difficulty::Easy);
        ui.show_message("The monsters got you!", Severity::Error);

        ui.clear_battlefield();
        assert!(ui.problem_text.is_none());
        assert!(!ui.keyboard_visible);
        assert!(ui.monster.is_none());
        assert!(ui.notice.is_some());
    }
}
