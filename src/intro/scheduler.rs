use std::collections::BTreeMap;

use crate::foundation::core::TimeMs;

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

/// What a timer means to the intro sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TimerKind {
    /// Media never signalled; treat it as ready.
    MediaFallback,
    FadeDone,
    RevealDone,
}

/// A timer whose due time has passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub id: TimerId,
    pub kind: TimerKind,
    pub due: TimeMs,
}

/// Timeout source for the intro sequence.
///
/// Timers are scheduled at absolute times so chained phases stay exact even when the host
/// polls late: a timer scheduled from a fired timer's `due` keeps the cadence.
pub trait Scheduler {
    fn schedule_at(&mut self, due: TimeMs, kind: TimerKind) -> TimerId;

    /// Returns `false` if the timer already fired or was cancelled.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Earliest timer with `due <= now`, removed from the queue.
    fn pop_due(&mut self, now: TimeMs) -> Option<FiredTimer>;
}

/// Deterministic scheduler driven by explicit time. Ties fire in scheduling order.
#[derive(Debug, Default)]
pub struct VirtualClock {
    now: TimeMs,
    next_id: u64,
    pending: BTreeMap<(TimeMs, u64), TimerKind>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest time observed through [`Scheduler::pop_due`] or [`VirtualClock::set_now`].
    pub fn now(&self) -> TimeMs {
        self.now
    }

    /// Move the clock forward. Going backwards is ignored.
    pub fn set_now(&mut self, now: TimeMs) {
        self.now = self.now.max(now);
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<TimeMs> {
        self.pending.keys().next().map(|(due, _)| *due)
    }
}

impl Scheduler for VirtualClock {
    fn schedule_at(&mut self, due: TimeMs, kind: TimerKind) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.insert((due, id), kind);
        TimerId(id)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        let key = self.pending.keys().find(|(_, seq)| *seq == id.0).copied();
        match key {
            Some(key) => self.pending.remove(&key).is_some(),
            None => false,
        }
    }

    fn pop_due(&mut self, now: TimeMs) -> Option<FiredTimer> {
        self.set_now(now);
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > now {
            return None;
        }
        let kind = self.pending.remove(&(due, seq))?;
        Some(FiredTimer {
            id: TimerId(seq),
            kind,
            due,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/intro/scheduler.rs"]
mod tests;
