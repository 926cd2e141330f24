//! Full-round journeys through the game engine: spawn timing, victory
//! resolution, loss bookkeeping, timeouts, pausing, and both game-over
//! paths, observed through a recording renderer.

use arithmancer::audio::NullAudio;
use arithmancer::core::constants::{
    MIN_SUM_GROUP, MONSTER_HIT_DAMAGE, PLAYER_MAX_HP, RESOLVE_DELAY_SECONDS, ROUND_SECONDS,
    SPAWN_DELAY_SECONDS,
};
use arithmancer::core::engine::GameEngine;
use arithmancer::core::frontend::{Renderer, Severity};
use arithmancer::core::session::Phase;
use arithmancer::curriculum::{Curriculum, Difficulty};
use arithmancer::storage::MemoryStore;

// =============================================================================
// Helpers
// =============================================================================

/// Renderer that records what the engine tells it to draw.
#[derive(Default)]
struct Probe {
    messages: Vec<(String, Severity)>,
    victories: Vec<i64>,
    defeats: u32,
    spawned: u32,
    dismissed: u32,
    problem: Option<String>,
    keyboard: bool,
}

impl Probe {
    fn saw(&self, needle: &str) -> bool {
        self.messages.iter().any(|(text, _)| text.contains(needle))
    }
}

impl Renderer for Probe {
    fn show_problem(&mut self, text: &str) {
        self.problem = Some(text.to_string());
    }
    fn hide_problem(&mut self) {
        self.problem = None;
    }
    fn show_keyboard(&mut self) {
        self.keyboard = true;
    }
    fn hide_keyboard(&mut self) {
        self.keyboard = false;
    }
    fn show_message(&mut self, text: &str, severity: Severity) {
        self.messages.push((text.to_string(), severity));
    }
    fn show_victory(&mut self, points: i64) {
        self.victories.push(points);
    }
    fn show_defeat(&mut self) {
        self.defeats += 1;
    }
    fn spawn_monster(&mut self, _difficulty: Difficulty) {
        self.spawned += 1;
    }
    fn dismiss_monster(&mut self) {
        self.dismissed += 1;
    }
}

type TestEngine = GameEngine<Probe, MemoryStore, NullAudio>;

fn new_engine() -> TestEngine {
    let mut engine = GameEngine::new(
        Curriculum::new(21),
        Probe::default(),
        MemoryStore::new(),
        NullAudio,
    );
    engine.boot();
    engine
}

fn start_and_reach_combat(engine: &mut TestEngine) {
    engine.start_game();
    engine.tick(SPAWN_DELAY_SECONDS + 0.1);
    assert!(engine.session().combat_active, "no monster after the delay");
}

fn current_answer(engine: &TestEngine) -> String {
    engine
        .curriculum()
        .current_problem()
        .map(|p| p.answer.to_string())
        .unwrap_or_default()
}

/// Off by one always parses and is always wrong.
fn wrong_answer(engine: &TestEngine) -> String {
    engine
        .curriculum()
        .current_problem()
        .map(|p| (p.answer + 1).to_string())
        .unwrap_or_default()
}

/// Wins the current round and rides the delays into the next one.
fn win_round(engine: &mut TestEngine) {
    let answer = current_answer(engine);
    engine.submit_answer(&answer);
    engine.tick(RESOLVE_DELAY_SECONDS + 0.1);
    engine.tick(SPAWN_DELAY_SECONDS + 0.1);
    assert!(engine.session().combat_active);
}

// =============================================================================
// 1. Spawn timing
// =============================================================================

#[test]
fn test_the_first_monster_waits_for_the_spawn_delay() {
    let mut engine = new_engine();
    engine.start_game();
    assert_eq!(engine.session().phase, Phase::Running);

    engine.tick(SPAWN_DELAY_SECONDS - 0.1);
    assert!(!engine.session().combat_active);

    engine.tick(0.2);
    assert!(engine.session().combat_active);
    assert_eq!(engine.renderer().spawned, 1);
    assert!(engine.renderer().problem.is_some());
    assert!(engine.renderer().keyboard);
    assert_eq!(engine.session().seconds_left, ROUND_SECONDS);
}

// =============================================================================
// 2. Victory path
// =============================================================================

#[test]
fn test_a_win_scores_then_resolves_then_respawns() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    let answer = current_answer(&engine);
    engine.submit_answer(&answer);

    // Base group at a full clock: 10 base + 30 time bonus.
    assert_eq!(engine.session().score, 40);
    assert_eq!(engine.session().total_score, 40);
    assert!(engine.session().resolving);
    assert!(!engine.session().combat_active);
    assert!(engine.renderer().problem.is_none());
    assert!(!engine.renderer().keyboard);
    assert_eq!(engine.renderer().victories, vec![40]);
    assert!(engine.renderer().saw("Correct!"));

    // The beaten monster lingers through the victory window.
    engine.tick(RESOLVE_DELAY_SECONDS - 0.1);
    assert_eq!(engine.renderer().dismissed, 0);

    engine.tick(0.2);
    assert!(!engine.session().resolving);
    assert_eq!(engine.renderer().dismissed, 1);

    engine.tick(SPAWN_DELAY_SECONDS + 0.1);
    assert!(engine.session().combat_active);
    assert_eq!(engine.renderer().spawned, 2);
}

#[test]
fn test_clearing_a_group_announces_the_level_up() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    // The base group has exactly two problems.
    win_round(&mut engine);
    assert!(!engine.renderer().saw("Level up!"));
    win_round(&mut engine);

    assert!(engine.renderer().saw("Level up! Now solving sums of 4."));
    assert_eq!(engine.curriculum().group(), MIN_SUM_GROUP + 1);

    let saved = engine.store().stored().cloned().expect("level persisted");
    assert_eq!(saved.level, MIN_SUM_GROUP + 1);
}

// =============================================================================
// 3. Loss paths
// =============================================================================

#[test]
fn test_a_wrong_answer_costs_score_and_health_but_not_the_run() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    // Bank two wins so the penalty cannot push the run negative.
    win_round(&mut engine);
    win_round(&mut engine);
    let group_before = engine.curriculum().group();

    engine.submit_answer(&wrong_answer(&engine));
    assert_eq!(engine.session().score, 30);
    assert_eq!(engine.session().player_hp, PLAYER_MAX_HP - MONSTER_HIT_DAMAGE);
    assert!(!engine.session().combat_active);
    assert!(!engine.session().resolving, "losses skip the victory window");
    assert!(engine.session().is_running());
    assert!(!engine.session().game_over);
    assert_eq!(engine.renderer().defeats, 1);
    assert!(engine.renderer().saw("Not quite."));

    // The same group continues with a fresh monster.
    engine.tick(SPAWN_DELAY_SECONDS + 0.1);
    assert!(engine.session().combat_active);
    assert_eq!(engine.curriculum().group(), group_before);
}

#[test]
fn test_timeout_reveals_the_answer_and_counts_as_a_loss() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);
    win_round(&mut engine);
    win_round(&mut engine);

    let expected = current_answer(&engine);
    for _ in 0..ROUND_SECONDS {
        engine.tick(1.0);
    }

    assert!(!engine.session().combat_active);
    assert_eq!(engine.session().seconds_left, 0);
    assert_eq!(engine.session().player_hp, PLAYER_MAX_HP - MONSTER_HIT_DAMAGE);
    let (last, _) = engine
        .renderer()
        .messages
        .last()
        .cloned()
        .expect("timeout message");
    assert!(last.starts_with("Time is up!"), "got: {}", last);
    assert!(last.contains(&expected), "message must name the answer");
    assert!(engine.session().is_running(), "one timeout does not end a run");
}

// =============================================================================
// 4. Game-over paths
// =============================================================================

#[test]
fn test_a_negative_run_wipes_everything() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    // First round lost: 0 - 50 goes below zero.
    engine.submit_answer(&wrong_answer(&engine));

    assert!(engine.session().game_over);
    assert_eq!(engine.session().phase, Phase::Menu);
    assert_eq!(engine.session().total_score, 0);
    assert_eq!(engine.store().reset_count, 1);
    assert!(engine.store().stored().is_none());
    assert_eq!(engine.curriculum().group(), MIN_SUM_GROUP);
    assert!(engine.renderer().saw("Progress starts over"));
}

#[test]
fn test_running_out_of_health_keeps_progress() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    // Five cycles of two wins and a loss: each costs 20 hp and nets
    // positive points, so the run dies by damage, never by debt.
    for _ in 0..5 {
        win_round(&mut engine);
        win_round(&mut engine);
        engine.submit_answer(&wrong_answer(&engine));
        if engine.session().player_hp > 0 {
            engine.tick(SPAWN_DELAY_SECONDS + 0.1);
        }
    }

    assert_eq!(engine.session().player_hp, 0);
    assert!(engine.session().game_over);
    assert_eq!(engine.session().phase, Phase::Menu);
    assert_eq!(engine.session().rounds_won, 10);
    assert_eq!(engine.session().rounds_lost, 5);
    assert!(engine.renderer().saw("The monsters got you!"));

    // Each cycle nets two wins minus one penalty. The first three cycles
    // fight Easy problems at 40 a win, the last two Medium at 45, and the
    // wins walk the curriculum from sums of 3 up to sums of 7:
    // 30 + 30 + 30 + 40 + 40 = 170.
    let saved = engine.store().stored().cloned().expect("progress kept");
    assert_eq!(saved.total_score, 170);
    assert_eq!(saved.level, 7);
    assert_eq!(engine.store().reset_count, 0);
}

#[test]
fn test_quitting_mid_run_is_not_a_game_over() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);
    win_round(&mut engine);

    engine.stop_game();
    assert_eq!(engine.session().phase, Phase::Menu);
    assert!(!engine.session().game_over);

    let saved = engine.store().stored().cloned().expect("saved on quit");
    assert_eq!(saved.total_score, 40);
}

// =============================================================================
// 5. Pause, hints, and input discipline
// =============================================================================

#[test]
fn test_pause_freezes_the_round() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    engine.tick(1.0);
    engine.tick(1.0);
    assert_eq!(engine.session().seconds_left, ROUND_SECONDS - 2);

    engine.pause();
    engine.tick(30.0);
    assert!(engine.session().paused);
    assert_eq!(engine.session().seconds_left, ROUND_SECONDS - 2);

    engine.resume();
    engine.tick(1.0);
    assert_eq!(engine.session().seconds_left, ROUND_SECONDS - 3);
}

#[test]
fn test_hints_arrive_as_info() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    engine.show_hint();
    let (text, severity) = engine
        .renderer()
        .messages
        .last()
        .cloned()
        .expect("hint shown");
    assert!(!text.is_empty());
    assert_eq!(severity, Severity::Info);
}

#[test]
fn test_typing_builds_the_answer_and_enter_submits() {
    let mut engine = new_engine();
    start_and_reach_combat(&mut engine);

    let answer = current_answer(&engine);
    for c in answer.chars() {
        engine.type_digit(c);
    }
    assert_eq!(engine.session().answer_input, answer);

    engine.submit_typed();
    assert!(engine.session().resolving);
    assert_eq!(engine.session().answer_input, "");
}

#[test]
fn test_submissions_outside_combat_are_ignored() {
    let mut engine = new_engine();
    engine.start_game();

    // No monster yet.
    engine.submit_answer("4");
    assert_eq!(engine.session().score, 0);

    engine.tick(SPAWN_DELAY_SECONDS + 0.1);
    let answer = current_answer(&engine);
    engine.submit_answer(&answer);
    assert!(engine.session().resolving);

    // A second submission during the victory window cannot double-score.
    engine.submit_answer(&answer);
    assert_eq!(engine.renderer().victories.len(), 1);
}
