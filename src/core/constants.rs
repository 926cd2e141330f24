//! Central tuning constants for the game.

// Host loop timing

/// Event-loop poll cadence in milliseconds (~60 FPS).
pub const FRAME_MS: u64 = 16;

// Combat round timing

/// Seconds on the countdown for each combat round.
pub const ROUND_SECONDS: u32 = 60;

/// Countdown tick interval in seconds.
pub const ROUND_TICK_SECONDS: f64 = 1.0;

/// Delay between rounds before the next monster appears, in seconds.
pub const SPAWN_DELAY_SECONDS: f64 = 2.0;

/// Victory window after a correct answer before the field clears, in seconds.
pub const RESOLVE_DELAY_SECONDS: f64 = 2.0;

/// Combat movement loop interval in seconds (~60 Hz).
pub const COMBAT_LOOP_SECONDS: f64 = 0.016;

// Scoring

/// Base points for any correct answer.
pub const BASE_WIN_POINTS: i64 = 10;

/// Points per remaining second on the countdown, applied as floor(s * factor).
pub const TIME_BONUS_FACTOR: f64 = 0.5;

/// Flat score penalty for a wrong answer or a timeout.
pub const WRONG_ANSWER_PENALTY: i64 = 50;

// Player

pub const PLAYER_MAX_HP: u32 = 100;

/// Damage taken on a wrong answer or a timeout.
pub const MONSTER_HIT_DAMAGE: u32 = 20;

// Curriculum

/// Lowest digit-sum group; groups below this are clamped up.
pub const MIN_SUM_GROUP: u8 = 3;

/// Highest digit-sum group; advancing past it wraps back to the minimum.
pub const MAX_SUM_GROUP: u8 = 18;

/// Maximum digits accepted in the answer input.
pub const ANSWER_MAX_DIGITS: usize = 3;
