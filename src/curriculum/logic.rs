//! Curriculum state machine: shuffled no-repeat problem queues per
//! digit-sum group, solved history, answer checking, and hints.

use super::rng::{shuffle, Lcg};
use super::types::{CheckOutcome, Difficulty, Problem};
use crate::core::constants::{MAX_SUM_GROUP, MIN_SUM_GROUP, WRONG_ANSWER_PENALTY};
use std::collections::HashSet;

/// All ordered operand pairs `(a, b)` with `a + b == sum` and both in 1..=9.
pub fn sum_group_pairs(sum: u8) -> Vec<(u8, u8)> {
    let mut pairs = Vec::new();
    let hi = sum.saturating_sub(1).min(9);
    for a in 1..=hi {
        let b = sum - a;
        if (1..=9).contains(&b) {
            pairs.push((a, b));
        }
    }
    pairs
}

/// Problems in one full 3..=18 cycle (80).
pub fn total_problem_count() -> usize {
    (MIN_SUM_GROUP..=MAX_SUM_GROUP)
        .map(|sum| sum_group_pairs(sum).len())
        .sum()
}

/// Per-group progress snapshot for the menu.
#[derive(Debug, Clone)]
pub struct GroupStats {
    pub sum: u8,
    pub solved: usize,
    pub total: usize,
    pub difficulty: Difficulty,
}

/// Deals multiplication problems grouped by operand digit sum, never
/// repeating a pair within one pass of a group, and advances through the
/// 3..=18 cycle as groups are exhausted.
pub struct Curriculum {
    group: u8,
    queue: Vec<(u8, u8)>,
    index: usize,
    solved: HashSet<String>,
    current: Option<Problem>,
    rng: Lcg,
}

impl Curriculum {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Lcg::new(seed))
    }

    /// Clock-seeded curriculum for everyday play.
    pub fn from_clock() -> Self {
        Self::with_rng(Lcg::from_clock())
    }

    fn with_rng(rng: Lcg) -> Self {
        let mut curriculum = Self {
            group: MIN_SUM_GROUP,
            queue: Vec::new(),
            index: 0,
            solved: HashSet::new(),
            current: None,
            rng,
        };
        curriculum.rebuild_queue();
        curriculum
    }

    fn rebuild_queue(&mut self) {
        self.queue = sum_group_pairs(self.group);
        shuffle(&mut self.queue, &mut self.rng);
        self.index = 0;
    }

    /// Clamps to the minimum group, regenerates and reshuffles the queue.
    pub fn set_group(&mut self, sum: u8) {
        self.group = sum.max(MIN_SUM_GROUP);
        self.rebuild_queue();
    }

    pub fn group(&self) -> u8 {
        self.group
    }

    pub fn current_problem(&self) -> Option<&Problem> {
        self.current.as_ref()
    }

    /// True once every pair in the current pass has been handed out.
    pub fn is_group_completed(&self) -> bool {
        self.index >= self.queue.len()
    }

    /// The group after this one, or None at the top of the cycle.
    pub fn next_group(&self) -> Option<u8> {
        if self.group >= MAX_SUM_GROUP {
            None
        } else {
            Some(self.group + 1)
        }
    }

    fn advance_group(&mut self) {
        if self.group >= MAX_SUM_GROUP {
            // Wrapping restarts the whole curriculum cycle.
            self.group = MIN_SUM_GROUP;
            self.solved.clear();
        } else {
            self.group += 1;
        }
        self.rebuild_queue();
    }

    /// Returns the next problem, rolling to the next group (and wrapping
    /// 18 → 3) when the queue is exhausted.
    pub fn generate_problem(&mut self) -> Problem {
        if self.index >= self.queue.len() {
            self.advance_group();
        }
        let (a, b) = self.queue[self.index];
        self.index += 1;
        let problem = Problem::new(a, b, self.group);
        self.current = Some(problem.clone());
        problem
    }

    /// Checks `raw` against the current problem. Checking never consumes the
    /// problem; generation supersedes it, so re-checks always run against
    /// whatever problem is current.
    pub fn check_answer(&mut self, raw: &str, seconds_left: u32) -> CheckOutcome {
        let problem = match &self.current {
            Some(p) => p.clone(),
            None => return CheckOutcome::NoProblem,
        };
        let value: u32 = match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => return CheckOutcome::NotANumber,
        };
        if value == problem.answer {
            self.solved.insert(problem.id.clone());
            CheckOutcome::Correct {
                points: problem.difficulty.win_points(seconds_left),
                answer: problem.answer,
                message: format!("Correct! {} = {}", problem.text(), problem.answer),
            }
        } else {
            CheckOutcome::Wrong {
                points: -WRONG_ANSWER_PENALTY,
                answer: problem.answer,
                message: format!("Not quite. {} = {}", problem.text(), problem.answer),
            }
        }
    }

    /// Tier-appropriate strategy hint for the current problem.
    pub fn hint(&self) -> Option<String> {
        let p = self.current.as_ref()?;
        let lo = p.a.min(p.b);
        let hi = p.a.max(p.b);
        let text = match p.difficulty {
            Difficulty::Easy => {
                format!("Count up by {} exactly {} times.", hi, lo)
            }
            Difficulty::Medium => {
                format!("Split it: {} × {} = {} × {} + {}.", p.a, p.b, p.a, p.b - 1, p.a)
            }
            Difficulty::Hard => {
                format!("Swap if it helps: {} × {} is the same as {} × {}.", p.a, p.b, p.b, p.a)
            }
            Difficulty::VeryHard => {
                format!(
                    "Round up: {} × 10 = {}, then take away {} × {}.",
                    p.a,
                    p.a as u32 * 10,
                    p.a,
                    10 - p.b
                )
            }
            Difficulty::Expert => {
                "Anchor on a square you know, like 8 × 8 = 64 or 9 × 9 = 81.".to_string()
            }
        };
        Some(text)
    }

    pub fn solved_count(&self) -> usize {
        self.solved.len()
    }

    /// (solved, total over the whole 3..=18 cycle).
    pub fn progress_summary(&self) -> (usize, usize) {
        (self.solved.len(), total_problem_count())
    }

    pub fn group_stats(&self) -> Vec<GroupStats> {
        (MIN_SUM_GROUP..=MAX_SUM_GROUP)
            .map(|sum| {
                let pairs = sum_group_pairs(sum);
                let solved = pairs
                    .iter()
                    .filter(|(a, b)| self.solved.contains(&Problem::id_for(*a, *b)))
                    .count();
                GroupStats {
                    sum,
                    solved,
                    total: pairs.len(),
                    difficulty: Difficulty::for_sum(sum),
                }
            })
            .collect()
    }

    /// Back to the base group with a clean history.
    pub fn reset(&mut self) {
        self.solved.clear();
        self.current = None;
        self.set_group(MIN_SUM_GROUP);
    }
}
