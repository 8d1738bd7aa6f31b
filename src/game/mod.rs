//! Catch-the-hearts controller.
//!
//! A round runs for `duration_secs` countdown ticks. While it runs, a heart
//! appears every `spawn_interval_ms` at a random spot inside the game area
//! and disappears after `heart_lifetime_ms` unless it is clicked first; each
//! click is one point. When the countdown hits zero the round ends, every
//! heart still on screen is removed and a message picked from the final score
//! is shown.
//!
//! The controller owns no clock. [`HeartGame::advance_to`] is called with the
//! current instant (every animation frame in the browser, arbitrary instants
//! in tests) and fires whatever the [`TimerService`] has due.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, info};

use crate::config::GameConfig;
use crate::error::ConfigError;

pub mod headless;
pub mod messages;
pub mod random;
pub mod surface;
pub mod timer;

use random::RandomSource;
use surface::{GameView, Position};
use timer::{Fired, TimerId, TimerKind, TimerService};

/// Identifies one heart for its whole life. Never reused by a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeartId(pub u64);

impl fmt::Display for HeartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "heart-{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Ended,
}

/// Per-round counters. Replaced wholesale on every start.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    pub score: u32,
    pub time_left: u32,
    pub spawned: u32,
    pub message: Option<&'static str>,
}

impl GameSession {
    fn new(duration_secs: u32) -> Self {
        Self {
            score: 0,
            time_left: duration_secs,
            spawned: 0,
            message: None,
        }
    }
}

/// A live, clickable heart.
#[derive(Clone, Debug, PartialEq)]
pub struct HeartTarget {
    pub id: HeartId,
    pub position: Position,
    pub created_at_ms: f64,
    expiry: TimerId,
}

pub struct HeartGame<V, R> {
    config: GameConfig,
    view: V,
    rng: R,
    timers: TimerService,
    phase: Phase,
    session: GameSession,
    hearts: BTreeMap<HeartId, HeartTarget>,
    next_heart: u64,
    spawn_timer: Option<TimerId>,
    countdown_timer: Option<TimerId>,
}

impl<V: GameView, R: RandomSource> HeartGame<V, R> {
    pub fn new(config: GameConfig, mut view: V, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let session = GameSession::new(config.duration_secs);
        view.show_score(session.score);
        view.show_time_left(session.time_left);
        Ok(Self {
            config,
            view,
            rng,
            timers: TimerService::new(0.0),
            phase: Phase::Idle,
            session,
            hearts: BTreeMap::new(),
            next_heart: 0,
            spawn_timer: None,
            countdown_timer: None,
        })
    }

    /// Starts a new round at `now_ms`. Returns false, touching nothing, while
    /// a round is already running.
    pub fn start(&mut self, now_ms: f64) -> bool {
        self.advance_to(now_ms);
        if self.phase == Phase::Running {
            debug!("start ignored, round already running");
            return false;
        }

        self.timers.cancel_all();
        self.hearts.clear();
        self.view.clear_targets();
        self.session = GameSession::new(self.config.duration_secs);
        self.phase = Phase::Running;

        self.view.show_message("");
        self.view.show_score(self.session.score);
        self.view.show_time_left(self.session.time_left);

        self.spawn_timer = Some(
            self.timers
                .schedule_every(TimerKind::Spawn, self.config.spawn_interval_ms),
        );
        self.countdown_timer = Some(
            self.timers
                .schedule_every(TimerKind::Countdown, self.config.countdown_interval_ms),
        );
        info!(
            "round started at {:.0}ms ({}s)",
            self.timers.now_ms(),
            self.session.time_left
        );
        true
    }

    /// Fires every timer due at or before `now_ms`, oldest first.
    /// Instants earlier than the controller's clock are ignored.
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.dispatch(fired);
        }
    }

    /// Click on heart `id` at `now_ms`. Awards a point if the heart is still
    /// live once time has caught up; clicks on expired or unknown hearts are
    /// ignored.
    pub fn catch(&mut self, id: HeartId, now_ms: f64) -> bool {
        self.advance_to(now_ms);
        if self.phase != Phase::Running {
            return false;
        }
        let Some(heart) = self.hearts.remove(&id) else {
            return false;
        };
        self.timers.cancel(heart.expiry);
        self.view.remove_target(id);
        self.session.score += 1;
        self.view.show_score(self.session.score);
        debug!("caught {id}, score {}", self.session.score);
        true
    }

    fn dispatch(&mut self, fired: Fired) {
        match fired.kind {
            TimerKind::Spawn => self.spawn_heart(fired.at_ms),
            TimerKind::Countdown => self.countdown_tick(),
            TimerKind::Expire(id) => self.expire_heart(id),
        }
    }

    fn spawn_heart(&mut self, now_ms: f64) {
        if self.phase != Phase::Running {
            return;
        }
        let size = self.config.heart_size_px;
        let (max_x, max_y) = self.view.bounds().max_offset(size);
        let x = self.rng.next_unit() * max_x;
        let y = self.rng.next_unit() * max_y;
        let position = Position::new(x, y);

        let id = HeartId(self.next_heart);
        self.next_heart += 1;
        let expiry = self
            .timers
            .schedule_once(TimerKind::Expire(id), self.config.heart_lifetime_ms);
        self.hearts.insert(
            id,
            HeartTarget {
                id,
                position,
                created_at_ms: now_ms,
                expiry,
            },
        );
        self.session.spawned += 1;
        self.view.render_target(id, position, size);
        debug!("spawned {id} at ({x:.1}, {y:.1})");
    }

    fn expire_heart(&mut self, id: HeartId) {
        // already caught, or cleared at round end
        if self.hearts.remove(&id).is_some() {
            self.view.remove_target(id);
            debug!("{id} expired");
        }
    }

    fn countdown_tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }
        self.session.time_left = self.session.time_left.saturating_sub(1);
        self.view.show_time_left(self.session.time_left);
        if self.session.time_left == 0 {
            self.end_round();
        }
    }

    fn end_round(&mut self) {
        // loops stop before anything else so nothing spawns after the end
        for id in [self.spawn_timer.take(), self.countdown_timer.take()]
            .into_iter()
            .flatten()
        {
            self.timers.cancel(id);
        }
        self.phase = Phase::Ended;

        self.timers
            .cancel_where(|kind| matches!(kind, TimerKind::Expire(_)));
        self.hearts.clear();
        self.view.clear_targets();

        let message = messages::end_message(self.session.score);
        self.session.message = Some(message);
        self.view.show_message(message);
        info!(
            "round ended with {} of {} hearts",
            self.session.score, self.session.spawned
        );
    }
}

impl<V, R> HeartGame<V, R> {
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn time_left(&self) -> u32 {
        self.session.time_left
    }

    pub fn spawned(&self) -> u32 {
        self.session.spawned
    }

    /// End-of-round message; `None` until a round has ended.
    pub fn message(&self) -> Option<&'static str> {
        self.session.message
    }

    pub fn hearts(&self) -> impl Iterator<Item = &HeartTarget> {
        self.hearts.values()
    }

    pub fn heart(&self, id: HeartId) -> Option<&HeartTarget> {
        self.hearts.get(&id)
    }

    pub fn live_hearts(&self) -> usize {
        self.hearts.len()
    }

    pub fn now_ms(&self) -> f64 {
        self.timers.now_ms()
    }

    /// Armed timers: the two loops plus one expiry per live heart.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}
