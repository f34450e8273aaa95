//! Periodic data-refresh ticker.
//!
//! Emits a [`ReloadTickMsg`] every interval so the hosting page can ask its
//! data-fetch collaborator for a fresh study snapshot. The ticker can be
//! suppressed without being stopped: while suppressed the schedule keeps
//! running, but [`Model::fires`] reports `false` so no refresh is issued.
//! That distinction matters for pages that keep user state (sort, filters,
//! expanded rows) which a refresh would visually disturb.
//!
//! # Usage
//!
//! ```rust
//! use trialboard::reload;
//!
//! let mut ticker = reload::Model::from_seconds(10);
//! assert!(ticker.running());
//!
//! // "stop" choice from the preferences panel
//! ticker.set_seconds(-1);
//! assert!(!ticker.running());
//! ```

use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message emitted on every scheduled tick.
///
/// Carries the owning ticker's id so multiple tickers can coexist, and an
/// internal tag so ticks scheduled before an interval change are discarded
/// instead of double-firing.
#[derive(Debug, Clone)]
pub struct ReloadTickMsg {
    /// Identifier of the ticker that scheduled this tick.
    pub id: i64,
    tag: i64,
}

/// Message that starts or stops a ticker.
#[derive(Debug, Clone)]
pub struct StartStopMsg {
    /// Identifier of the targeted ticker; `0` targets any ticker.
    pub id: i64,
    running: bool,
}

/// The reload ticker model.
#[derive(Debug, Clone)]
pub struct Model {
    id: i64,
    tag: i64,
    interval: Duration,
    running: bool,
    suppressed: bool,
}

impl Model {
    /// Creates a ticker from an interval in seconds.
    ///
    /// A negative interval creates a stopped ticker, matching the "stop"
    /// choice of the reload-interval preference.
    pub fn from_seconds(secs: i32) -> Self {
        let running = secs >= 0;
        Self {
            id: next_id(),
            tag: 0,
            interval: Duration::from_secs(secs.max(0) as u64),
            running,
            suppressed: false,
        }
    }

    /// The unique identifier of this ticker.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Whether the ticker is scheduled.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Whether ticks are currently being swallowed.
    pub fn suppressed(&self) -> bool {
        self.suppressed
    }

    /// The current tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Suppresses or releases tick delivery without touching the schedule.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Changes the interval, cancelling any in-flight tick.
    ///
    /// A negative value stops the ticker; otherwise the ticker (re)starts
    /// with the new interval and the returned command schedules the first
    /// tick. The tag bump makes ticks scheduled under the old interval
    /// fail the tag check when they arrive.
    pub fn set_seconds(&mut self, secs: i32) -> Option<Cmd> {
        self.tag += 1;
        if secs < 0 {
            self.running = false;
            return None;
        }
        self.interval = Duration::from_secs(secs as u64);
        self.running = true;
        Some(self.tick())
    }

    /// Returns a command that resumes the ticker.
    pub fn start(&self) -> Cmd {
        self.start_stop(true)
    }

    /// Returns a command that pauses the ticker.
    pub fn stop(&self) -> Cmd {
        self.start_stop(false)
    }

    /// Schedules the first tick; `None` when the ticker is stopped.
    pub fn init(&self) -> Option<Cmd> {
        if self.running {
            Some(self.tick())
        } else {
            None
        }
    }

    /// Whether this tick should trigger a refresh right now.
    ///
    /// Rejects ticks for other tickers, stale ticks from before an
    /// interval change, and everything while stopped or suppressed.
    pub fn fires(&self, msg: &ReloadTickMsg) -> bool {
        self.running && !self.suppressed && msg.id == self.id && msg.tag == self.tag
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let interval = self.interval;
        bubbletea_tick(interval, move |_| Box::new(ReloadTickMsg { id, tag }) as Msg)
    }

    fn start_stop(&self, running: bool) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(StartStopMsg { id, running }) as Msg
        })
    }

    /// Processes ticker messages, rescheduling the next tick as needed.
    ///
    /// Suppression does not interrupt rescheduling; callers decide whether
    /// a tick has an effect by checking [`fires`](Self::fires) before
    /// forwarding the message here.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(start_stop) = msg.downcast_ref::<StartStopMsg>() {
            if start_stop.id != 0 && start_stop.id != self.id {
                return None;
            }
            self.running = start_stop.running;
            if self.running {
                return Some(self.tick());
            }
            return None;
        }

        if let Some(tick_msg) = msg.downcast_ref::<ReloadTickMsg>() {
            if !self.running || tick_msg.id != self.id || tick_msg.tag != self.tag {
                return None;
            }
            return Some(self.tick());
        }

        None
    }
}
