//! Problem and difficulty data structures for the multiplication curriculum.

use crate::core::constants::{BASE_WIN_POINTS, TIME_BONUS_FACTOR};

/// Difficulty tier of a digit-sum group, derived solely from the group's sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    VeryHard,
    Expert,
}

impl Difficulty {
    /// Tier for a group sum: small sums mean small operands.
    pub fn for_sum(sum: u8) -> Self {
        match sum {
            0..=5 => Difficulty::Easy,
            6..=8 => Difficulty::Medium,
            9..=12 => Difficulty::Hard,
            13..=15 => Difficulty::VeryHard,
            _ => Difficulty::Expert,
        }
    }

    /// Extra points awarded on top of the base for a correct answer.
    pub fn bonus(&self) -> i64 {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 5,
            Difficulty::Hard => 10,
            Difficulty::VeryHard => 15,
            Difficulty::Expert => 20,
        }
    }

    /// Points for a correct answer with `seconds_left` still on the clock.
    pub fn win_points(&self, seconds_left: u32) -> i64 {
        BASE_WIN_POINTS + (seconds_left as f64 * TIME_BONUS_FACTOR).floor() as i64 + self.bonus()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

/// A single multiplication problem. Immutable once generated; the next
/// `generate_problem()` call supersedes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub a: u8,
    pub b: u8,
    pub answer: u32,
    pub sum_group: u8,
    pub id: String,
    pub difficulty: Difficulty,
}

impl Problem {
    pub fn new(a: u8, b: u8, sum_group: u8) -> Self {
        Self {
            a,
            b,
            answer: a as u32 * b as u32,
            sum_group,
            id: Self::id_for(a, b),
            difficulty: Difficulty::for_sum(sum_group),
        }
    }

    /// Stable identity for the ordered pair, e.g. "7x8".
    pub fn id_for(a: u8, b: u8) -> String {
        format!("{}x{}", a, b)
    }

    /// Display text, e.g. "7 × 8".
    pub fn text(&self) -> String {
        format!("{} × {}", self.a, self.b)
    }
}

/// Result of checking a submitted answer against the current problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No problem has been generated yet.
    NoProblem,
    /// The input did not parse as a number.
    NotANumber,
    /// Correct answer; points are positive (base + time bonus + tier bonus).
    Correct { points: i64, answer: u32, message: String },
    /// Wrong answer; points carry the flat penalty as a negative value.
    Wrong { points: i64, answer: u32, message: String },
}
