//! Virtual-clock timer service.
//!
//! All of the game's time-driven behaviour (spawn loop, countdown, per-heart
//! expiry) goes through one [`TimerService`]. Nothing here reads a real clock:
//! callers hand in "now" (in the browser, `performance.now()` from the frame
//! loop; in tests, whatever instant they want to simulate) and pull due timers
//! out one at a time with [`TimerService::pop_due`].

use super::HeartId;

/// What a timer is for. Doubles as the timer's name when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Spawn,
    Countdown,
    Expire(HeartId),
}

/// Handle returned when arming a timer; used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that came due.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fired {
    pub id: TimerId,
    pub kind: TimerKind,
    /// Scheduled instant, which is also the clock value while handling it.
    pub at_ms: f64,
}

#[derive(Debug)]
struct Timer {
    id: TimerId,
    kind: TimerKind,
    due_ms: f64,
    period_ms: Option<f64>,
    // arming order, breaks ties between timers due at the same instant
    seq: u64,
}

#[derive(Debug, Default)]
pub struct TimerService {
    timers: Vec<Timer>,
    now_ms: f64,
    next_id: u64,
    next_seq: u64,
}

impl TimerService {
    pub fn new(now_ms: f64) -> Self {
        Self {
            now_ms,
            ..Self::default()
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Moves the clock forward without firing anything. Never moves it back.
    pub fn set_now(&mut self, now_ms: f64) {
        if now_ms > self.now_ms {
            self.now_ms = now_ms;
        }
    }

    /// Arms a one-shot timer `delay_ms` after the current instant.
    pub fn schedule_once(&mut self, kind: TimerKind, delay_ms: f64) -> TimerId {
        self.arm(kind, delay_ms, None)
    }

    /// Arms a periodic timer; the first fire is one period from now.
    pub fn schedule_every(&mut self, kind: TimerKind, period_ms: f64) -> TimerId {
        self.arm(kind, period_ms, Some(period_ms))
    }

    fn arm(&mut self, kind: TimerKind, delay_ms: f64, period_ms: Option<f64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let seq = self.bump_seq();
        self.timers.push(Timer {
            id,
            kind,
            due_ms: self.now_ms + delay_ms.max(0.0),
            period_ms,
            seq,
        });
        id
    }

    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Returns false if the timer already fired (one-shot) or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    /// Cancels every timer whose kind matches; returns how many went.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&TimerKind) -> bool) -> usize {
        let before = self.timers.len();
        self.timers.retain(|t| !pred(&t.kind));
        before - self.timers.len()
    }

    pub fn cancel_all(&mut self) {
        self.timers.clear();
    }

    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Earliest due instant among armed timers.
    pub fn next_due(&self) -> Option<f64> {
        self.earliest().map(|idx| self.timers[idx].due_ms)
    }

    fn earliest(&self) -> Option<usize> {
        let mut best: Option<usize> = None;
        for (idx, t) in self.timers.iter().enumerate() {
            match best {
                Some(b) => {
                    let cur = &self.timers[b];
                    if t.due_ms < cur.due_ms || (t.due_ms == cur.due_ms && t.seq < cur.seq) {
                        best = Some(idx);
                    }
                }
                None => best = Some(idx),
            }
        }
        best
    }

    /// Pops the earliest timer due at or before `now_ms` and moves the clock to
    /// its due instant. Periodic timers are re-armed at `due + period`, so
    /// they never drift. Once nothing else is due the clock settles on `now_ms`.
    pub fn pop_due(&mut self, now_ms: f64) -> Option<Fired> {
        let idx = match self.earliest() {
            Some(idx) if self.timers[idx].due_ms <= now_ms => idx,
            _ => {
                self.set_now(now_ms);
                return None;
            }
        };
        let due_ms = self.timers[idx].due_ms;
        self.set_now(due_ms);
        let fired = Fired {
            id: self.timers[idx].id,
            kind: self.timers[idx].kind,
            at_ms: due_ms,
        };
        let period_ms = self.timers[idx].period_ms;
        match period_ms {
            Some(period) if period > 0.0 => {
                let seq = self.bump_seq();
                let t = &mut self.timers[idx];
                t.due_ms += period;
                t.seq = seq;
            }
            _ => {
                self.timers.swap_remove(idx);
            }
        }
        Some(fired)
    }
}
