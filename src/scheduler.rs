//! Tick scheduling
//!
//! The ramp controller never talks to a timer directly. It returns a
//! [`TickDirective`] and the engine applies it to a [`TickScheduler`]. The
//! concrete scheduler can be a hardware timer, an async task or the portable
//! [`DeadlineScheduler`] below.

use embassy_time::{Duration, Instant};

/// What should happen to the tick subscription after an operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDirective {
    /// (Re)arm the tick to fire after the given duration
    Schedule(Duration),
    /// Cancel any pending tick
    Cancel,
}

impl TickDirective {
    /// Apply the directive to a scheduler
    pub fn apply<S: TickScheduler>(self, scheduler: &mut S) {
        match self {
            Self::Schedule(after) => scheduler.schedule_tick(after),
            Self::Cancel => scheduler.cancel_tick(),
        }
    }
}

/// Periodic tick facility
///
/// Implement this trait to drive the engine from a platform timer.
pub trait TickScheduler {
    /// Fire a tick once `after` has elapsed, replacing any pending tick
    fn schedule_tick(&mut self, after: Duration);

    /// Drop the pending tick, if any
    fn cancel_tick(&mut self);
}

/// Portable deadline tracker that schedules ticks without async.
///
/// The caller reports the current time, asks whether a tick is due and sleeps
/// for [`DeadlineScheduler::sleep_duration`] in between.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = DeadlineScheduler::new();
///
/// loop {
///     let now = Instant::from_millis(get_current_time_ms());
///     scheduler.observe(now);
///     // handle commands, which may call `schedule_tick`
///     if scheduler.poll_due(now) {
///         // advance the ramp
///     }
///     sleep_ms(scheduler.sleep_duration(now).map_or(IDLE_MS, |d| d.as_millis()));
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DeadlineScheduler {
    anchor: Instant,
    deadline: Option<Instant>,
    last_interval: Duration,
}

impl DeadlineScheduler {
    pub const fn new() -> Self {
        Self {
            anchor: Instant::from_millis(0),
            deadline: None,
            last_interval: Duration::from_millis(0),
        }
    }

    /// Anchor schedules made from now on at `now`
    pub fn observe(&mut self, now: Instant) {
        self.anchor = now;
    }

    /// Pending tick deadline
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Check whether a tick is due and consume it.
    ///
    /// The next schedule is anchored on the consumed deadline, so ticks keep
    /// their cadence. If we fell behind by more than two intervals, the
    /// backlog is skipped and the next schedule is anchored on `now`.
    pub fn poll_due(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        let Some(late_by) = now.checked_duration_since(deadline) else {
            return false;
        };

        let max_drift = Duration::from_millis(self.last_interval.as_millis() * 2);
        self.anchor = if late_by > max_drift { now } else { deadline };
        self.deadline = None;
        true
    }

    /// How long to wait until the pending tick, `None` when nothing is scheduled
    pub fn sleep_duration(&self, now: Instant) -> Option<Duration> {
        let deadline = self.deadline?;
        Some(
            deadline
                .checked_duration_since(now)
                .unwrap_or(Duration::from_millis(0)),
        )
    }
}

impl Default for DeadlineScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for DeadlineScheduler {
    fn schedule_tick(&mut self, after: Duration) {
        self.last_interval = after;
        self.deadline = Some(self.anchor + after);
    }

    fn cancel_tick(&mut self) {
        self.deadline = None;
    }
}
