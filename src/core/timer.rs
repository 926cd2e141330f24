//! Timer bookkeeping for combat rounds.
//!
//! Every timed behavior in a run is owned by exactly one slot, keyed by
//! [`TimerKind`]. Scheduling a kind replaces whatever that slot held, so two
//! countdowns of the same kind can never run side by side.

/// The four timers a run can have in flight.
///
/// Slots fire in declaration order within a single [`TimerBank::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Repeating combat heartbeat driving monster upkeep.
    CombatLoop,
    /// Repeating one-second countdown tick.
    RoundTick,
    /// One-shot delay before the next monster appears.
    Spawn,
    /// One-shot delay after a round resolves, before the next spawn.
    Resolve,
}

impl TimerKind {
    pub const ALL: [TimerKind; 4] = [
        TimerKind::CombatLoop,
        TimerKind::RoundTick,
        TimerKind::Spawn,
        TimerKind::Resolve,
    ];
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    remaining: f64,
    /// Some for repeating timers, None for one-shots.
    interval: Option<f64>,
}

/// Fixed-slot timer table: at most one timer per [`TimerKind`].
#[derive(Debug, Default)]
pub struct TimerBank {
    slots: [Option<Slot>; 4],
}

impl TimerBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot timer, replacing any timer of the same kind.
    pub fn schedule_once(&mut self, kind: TimerKind, delay: f64) {
        self.slots[kind as usize] = Some(Slot {
            remaining: delay,
            interval: None,
        });
    }

    /// Arms a repeating timer, replacing any timer of the same kind.
    pub fn schedule_repeating(&mut self, kind: TimerKind, interval: f64) {
        self.slots[kind as usize] = Some(Slot {
            remaining: interval,
            interval: Some(interval),
        });
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.slots[kind as usize] = None;
    }

    /// Clears every slot in one step; nothing fires afterwards until
    /// something is rescheduled.
    pub fn cancel_all(&mut self) {
        self.slots = [None; 4];
    }

    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.slots[kind as usize].is_some()
    }

    /// Advances all slots by `dt` seconds and returns the kinds that fired,
    /// in declaration order. Each slot fires at most once per call: repeating
    /// timers re-arm from the full interval with any overshoot dropped, so a
    /// long suspension yields one tick, not a burst.
    pub fn advance(&mut self, dt: f64) -> Vec<TimerKind> {
        let mut fired = Vec::new();
        for kind in TimerKind::ALL {
            let idx = kind as usize;
            let mut clear = false;
            if let Some(slot) = &mut self.slots[idx] {
                slot.remaining -= dt;
                if slot.remaining <= 0.0 {
                    fired.push(kind);
                    match slot.interval {
                        Some(interval) => slot.remaining = interval,
                        None => clear = true,
                    }
                }
            }
            if clear {
                self.slots[idx] = None;
            }
        }
        fired
    }
}
