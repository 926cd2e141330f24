//! Combat orchestration: run lifecycle, round timing, scoring, and
//! persistence around the curriculum.
//!
//! The engine is tick-driven. The host calls [`GameEngine::tick`] with the
//! elapsed seconds; due timers fire and each handler re-checks the session
//! flags before acting, since the state may have moved between scheduling
//! and firing.

use super::constants::{
    COMBAT_LOOP_SECONDS, MIN_SUM_GROUP, MONSTER_HIT_DAMAGE, PLAYER_MAX_HP,
    RESOLVE_DELAY_SECONDS, ROUND_SECONDS, ROUND_TICK_SECONDS, SPAWN_DELAY_SECONDS,
    WRONG_ANSWER_PENALTY,
};
use super::frontend::{Renderer, Severity};
use super::session::{GameSession, Phase};
use super::timer::{TimerBank, TimerKind};
use crate::audio::{AudioSink, Track};
use crate::curriculum::{CheckOutcome, Curriculum, Difficulty};
use crate::storage::{ProgressStore, SavedProgress};
use chrono::Utc;

/// Drives the menu/run state machine and every combat round in between.
pub struct GameEngine<R: Renderer, S: ProgressStore, A: AudioSink> {
    curriculum: Curriculum,
    renderer: R,
    store: S,
    audio: A,
    session: GameSession,
    timers: TimerBank,
    last_played: i64,
}

impl<R: Renderer, S: ProgressStore, A: AudioSink> GameEngine<R, S, A> {
    pub fn new(curriculum: Curriculum, renderer: R, store: S, audio: A) -> Self {
        Self {
            curriculum,
            renderer,
            store,
            audio,
            session: GameSession::new(),
            timers: TimerBank::new(),
            last_played: 0,
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unix seconds of the last persisted round, 0 if never.
    pub fn last_played(&self) -> i64 {
        self.last_played
    }

    /// Restores persisted progress and lands in the menu. Load failures
    /// degrade to a fresh default; they never stop the game from starting.
    pub fn boot(&mut self) {
        if self.session.phase != Phase::Loading {
            tracing::debug!("boot ignored: already booted");
            return;
        }
        let progress = match self.store.load() {
            Ok(Some(p)) => p,
            Ok(None) => SavedProgress::default(),
            Err(e) => {
                tracing::warn!("Could not load saved progress, starting fresh: {}", e);
                SavedProgress::default()
            }
        };
        tracing::info!(
            "Booted at group {} with {} total points",
            progress.level,
            progress.total_score
        );
        self.session.total_score = progress.total_score;
        self.last_played = progress.last_played;
        self.curriculum.set_group(progress.level);
        self.session.phase = Phase::Menu;
        self.audio.play(Track::Menu);
    }

    /// Leaves the menu and starts a run: fresh run score, full health, and
    /// the first monster spawning after the usual delay.
    pub fn start_game(&mut self) {
        if self.session.phase != Phase::Menu {
            tracing::debug!("start_game ignored outside the menu");
            return;
        }
        tracing::info!("Run started at group {}", self.curriculum.group());
        self.session.begin_run();
        self.renderer.clear_battlefield();
        self.renderer.update_score(0);
        self.renderer.update_health(PLAYER_MAX_HP, PLAYER_MAX_HP);
        self.renderer.update_timer(ROUND_SECONDS);
        self.renderer
            .update_group(self.curriculum.group(), Difficulty::for_sum(self.curriculum.group()));
        self.audio.play(Track::Exploring);
        self.timers.schedule_once(TimerKind::Spawn, SPAWN_DELAY_SECONDS);
    }

    /// Ends the run from the player's side: progress is persisted and the
    /// game returns to the menu.
    pub fn stop_game(&mut self) {
        if !self.session.is_running() {
            return;
        }
        tracing::info!("Run stopped with {} run points", self.session.score);
        self.persist_progress();
        self.end_run(false);
    }

    /// Cancels every timer but keeps the session intact for [`resume`].
    ///
    /// [`resume`]: GameEngine::resume
    pub fn pause(&mut self) {
        if !self.session.is_running() || self.session.paused {
            return;
        }
        tracing::info!("Paused");
        self.session.paused = true;
        self.timers.cancel_all();
        self.audio.silence();
    }

    /// Re-arms exactly the timers the current sub-state needs: countdown
    /// and combat loop in combat, the resolution delay while resolving,
    /// otherwise the next spawn.
    pub fn resume(&mut self) {
        if !self.session.is_running() || !self.session.paused {
            return;
        }
        tracing::info!("Resumed with {} seconds left", self.session.seconds_left);
        self.session.paused = false;
        if self.session.resolving {
            self.timers.schedule_once(TimerKind::Resolve, RESOLVE_DELAY_SECONDS);
            self.audio.play(Track::Victory);
        } else if self.session.combat_active {
            self.timers.schedule_repeating(TimerKind::RoundTick, ROUND_TICK_SECONDS);
            self.timers.schedule_repeating(TimerKind::CombatLoop, COMBAT_LOOP_SECONDS);
            self.audio.play(Track::Battle);
        } else {
            self.timers.schedule_once(TimerKind::Spawn, SPAWN_DELAY_SECONDS);
            self.audio.play(Track::Exploring);
        }
    }

    /// Wipes persisted progress from the menu.
    pub fn reset_progress(&mut self) {
        if self.session.phase != Phase::Menu {
            return;
        }
        tracing::info!("Progress reset requested");
        if let Err(e) = self.store.reset() {
            tracing::warn!("Could not reset progress: {}", e);
        }
        self.curriculum.reset();
        self.session.total_score = 0;
        self.session.game_over = false;
        self.last_played = 0;
        self.renderer.update_score(0);
        self.renderer
            .update_group(MIN_SUM_GROUP, Difficulty::for_sum(MIN_SUM_GROUP));
        self.renderer
            .show_message("Progress wiped. Back to sums of 3.", Severity::Warning);
    }

    /// Advances time. Call from the host loop with the elapsed seconds.
    pub fn tick(&mut self, dt: f64) {
        if !self.session.is_running() || self.session.paused {
            return;
        }
        for kind in self.timers.advance(dt) {
            match kind {
                TimerKind::CombatLoop => self.on_combat_beat(),
                TimerKind::RoundTick => self.on_round_tick(),
                TimerKind::Spawn => self.on_spawn(),
                TimerKind::Resolve => self.on_resolution_complete(),
            }
        }
    }

    /// Checks `raw` against the current problem and resolves the round.
    pub fn submit_answer(&mut self, raw: &str) {
        if !self.in_active_combat() {
            tracing::debug!("Answer ignored outside an active round");
            return;
        }
        match self.curriculum.check_answer(raw, self.session.seconds_left) {
            CheckOutcome::NoProblem => tracing::debug!("No problem outstanding"),
            CheckOutcome::NotANumber => {
                self.renderer
                    .show_message("Numbers only. Try again!", Severity::Warning);
            }
            CheckOutcome::Correct {
                points, message, ..
            } => self.win_round(points, &message),
            CheckOutcome::Wrong {
                points, message, ..
            } => self.fail_round(points, &message),
        }
    }

    /// Appends one digit to the answer buffer.
    pub fn type_digit(&mut self, digit: char) {
        if self.in_active_combat() {
            self.session.push_digit(digit);
        }
    }

    pub fn erase_digit(&mut self) {
        if self.in_active_combat() {
            self.session.pop_digit();
        }
    }

    /// Submits whatever the answer buffer holds. Empty buffers are ignored.
    pub fn submit_typed(&mut self) {
        if !self.in_active_combat() || self.session.answer_input.is_empty() {
            return;
        }
        let raw = self.session.take_answer();
        self.submit_answer(&raw);
    }

    /// Shows a strategy hint for the current problem.
    pub fn show_hint(&mut self) {
        if !self.in_active_combat() {
            return;
        }
        if let Some(hint) = self.curriculum.hint() {
            self.renderer.show_message(&hint, Severity::Info);
        }
    }

    fn in_active_combat(&self) -> bool {
        self.session.is_running()
            && self.session.combat_active
            && !self.session.resolving
            && !self.session.paused
    }

    fn on_spawn(&mut self) {
        if !self.session.is_running() || self.session.combat_active || self.session.resolving {
            tracing::debug!("Spawn fired in a stale state; ignored");
            return;
        }
        let problem = self.curriculum.generate_problem();
        tracing::info!("Round started: {} (group {})", problem.id, problem.sum_group);
        self.session.combat_active = true;
        self.session.seconds_left = ROUND_SECONDS;
        self.session.answer_input.clear();
        self.session.last_answer_correct = false;
        // Generation may have rolled the curriculum into the next group.
        self.renderer
            .update_group(self.curriculum.group(), problem.difficulty);
        self.renderer.spawn_monster(problem.difficulty);
        self.renderer.show_problem(&problem.text());
        self.renderer.show_keyboard();
        self.renderer.update_timer(ROUND_SECONDS);
        self.audio.play(Track::Battle);
        self.timers
            .schedule_repeating(TimerKind::RoundTick, ROUND_TICK_SECONDS);
        self.timers
            .schedule_repeating(TimerKind::CombatLoop, COMBAT_LOOP_SECONDS);
    }

    fn on_combat_beat(&mut self) {
        if self.session.combat_active {
            self.renderer.monster_step();
        }
    }

    fn on_round_tick(&mut self) {
        if !self.session.combat_active || self.session.resolving {
            return;
        }
        self.session.seconds_left = self.session.seconds_left.saturating_sub(1);
        self.renderer.update_timer(self.session.seconds_left);
        tracing::debug!("Countdown: {}s left", self.session.seconds_left);
        if self.session.seconds_left == 0 {
            self.on_timeout();
        }
    }

    fn on_timeout(&mut self) {
        tracing::info!("Round timed out");
        let message = match self.curriculum.current_problem() {
            Some(p) => format!("Time is up! {} = {}", p.text(), p.answer),
            None => "Time is up!".to_string(),
        };
        self.fail_round(-WRONG_ANSWER_PENALTY, &message);
    }

    fn win_round(&mut self, points: i64, message: &str) {
        // The countdown must stop before anything else can read seconds_left.
        self.timers.cancel(TimerKind::RoundTick);
        self.timers.cancel(TimerKind::CombatLoop);
        self.session.combat_active = false;
        self.session.resolving = true;
        self.session.last_answer_correct = true;
        self.session.rounds_won += 1;
        self.session.score += points;
        self.session.total_score += points;
        tracing::info!(
            "Round won: +{} ({} this run, {} lifetime)",
            points,
            self.session.score,
            self.session.total_score
        );
        self.renderer.attack();
        self.renderer.update_score(self.session.score);
        self.renderer.hide_problem();
        self.renderer.hide_keyboard();
        self.renderer.show_victory(points);
        self.renderer.show_message(message, Severity::Success);
        self.audio.play(Track::Victory);
        self.persist_progress();
        self.timers
            .schedule_once(TimerKind::Resolve, RESOLVE_DELAY_SECONDS);
    }

    fn fail_round(&mut self, points: i64, message: &str) {
        self.timers.cancel(TimerKind::RoundTick);
        self.timers.cancel(TimerKind::CombatLoop);
        self.session.combat_active = false;
        self.session.last_answer_correct = false;
        self.session.rounds_lost += 1;
        self.session.score += points;
        self.session.total_score += points;
        self.session.player_hp = self.session.player_hp.saturating_sub(MONSTER_HIT_DAMAGE);
        tracing::info!(
            "Round lost: {} ({} this run, hp {})",
            points,
            self.session.score,
            self.session.player_hp
        );
        self.renderer.take_damage();
        self.renderer
            .update_health(self.session.player_hp, PLAYER_MAX_HP);
        self.renderer.update_score(self.session.score);
        self.renderer.hide_problem();
        self.renderer.hide_keyboard();
        self.renderer.show_defeat();
        self.renderer.show_message(message, Severity::Error);

        if self.session.score < 0 {
            self.game_over_reset();
            return;
        }
        self.persist_progress();
        if self.session.player_hp == 0 {
            self.game_over_defeated();
            return;
        }
        // Same group, next monster after the spawn delay.
        self.renderer.dismiss_monster();
        self.audio.play(Track::Exploring);
        self.timers.schedule_once(TimerKind::Spawn, SPAWN_DELAY_SECONDS);
    }

    fn on_resolution_complete(&mut self) {
        if !self.session.is_running() || !self.session.resolving {
            tracing::debug!("Resolution fired in a stale state; ignored");
            return;
        }
        self.session.resolving = false;
        self.renderer.dismiss_monster();
        if self.session.last_answer_correct && self.curriculum.is_group_completed() {
            if let Some(next) = self.curriculum.next_group() {
                self.curriculum.set_group(next);
                tracing::info!("Group cleared, advancing to {}", next);
                self.renderer
                    .update_group(next, Difficulty::for_sum(next));
                self.renderer
                    .show_message(&format!("Level up! Now solving sums of {}.", next), Severity::Info);
                self.persist_progress();
            }
            // At the top group the curriculum wraps by itself on the next
            // problem, with no celebration.
        }
        self.audio.play(Track::Exploring);
        self.timers.schedule_once(TimerKind::Spawn, SPAWN_DELAY_SECONDS);
    }

    /// A run score below zero ends the run and wipes everything persisted.
    fn game_over_reset(&mut self) {
        tracing::warn!(
            "Run score fell to {}; wiping persisted progress",
            self.session.score
        );
        if let Err(e) = self.store.reset() {
            tracing::warn!("Could not reset progress: {}", e);
        }
        self.curriculum.reset();
        self.session.total_score = 0;
        self.last_played = 0;
        self.renderer.update_score(self.session.score);
        self.renderer
            .update_group(MIN_SUM_GROUP, Difficulty::for_sum(MIN_SUM_GROUP));
        self.renderer.show_message(
            "Your score fell below zero. Progress starts over at sums of 3.",
            Severity::Error,
        );
        self.end_run(true);
    }

    /// Running out of health ends the run; persisted progress is kept.
    fn game_over_defeated(&mut self) {
        tracing::info!("Player defeated at group {}", self.curriculum.group());
        self.renderer.show_message(
            "The monsters got you! Your progress is saved.",
            Severity::Error,
        );
        self.end_run(true);
    }

    fn end_run(&mut self, game_over: bool) {
        self.timers.cancel_all();
        self.session.phase = Phase::Menu;
        self.session.combat_active = false;
        self.session.resolving = false;
        self.session.paused = false;
        self.session.game_over = game_over;
        self.session.answer_input.clear();
        self.renderer.hide_problem();
        self.renderer.hide_keyboard();
        self.renderer.dismiss_monster();
        self.renderer.clear_battlefield();
        self.audio.play(Track::Menu);
    }

    /// Writes {group, lifetime total, now} through the store. A negative
    /// total is never written; it triggers a reset instead.
    fn persist_progress(&mut self) {
        if self.session.total_score < 0 {
            tracing::warn!(
                "Refusing to save a negative total ({}); resetting instead",
                self.session.total_score
            );
            if let Err(e) = self.store.reset() {
                tracing::warn!("Could not reset progress: {}", e);
            }
            return;
        }
        let now = Utc::now().timestamp();
        let progress = SavedProgress {
            level: self.curriculum.group(),
            total_score: self.session.total_score,
            last_played: now,
        };
        match self.store.save(&progress) {
            Ok(()) => {
                self.last_played = now;
                tracing::debug!(
                    "Progress saved: group {}, {} points",
                    progress.level,
                    progress.total_score
                );
            }
            Err(e) => tracing::warn!("Could not save progress: {}", e),
        }
    }
}
