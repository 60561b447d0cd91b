//! Fixed-point level ramps
//!
//! A ramp moves the level from its current value to a target over a number of
//! ticks. Rates are kept in fixed-point level units per tick, so slow ramps
//! still make progress between integer levels. The last tick always lands
//! exactly on the target.

use embassy_time::Duration;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{
    LevelControlConfig, MOVE_RATE_DEFAULT_RAW, OnOffTransition, TransitionTime,
    TransitionTimings,
};
use crate::level::{Direction, LevelState, MAX_LEVEL, MIN_LEVEL, OnOffState};
use crate::scheduler::TickDirective;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// Level after the tick
    pub level: u8,
    /// Derived on/off state, if the ramp is coupled to it
    pub coupled_on: Option<bool>,
    /// Whether the coupled on/off state flipped on this tick
    pub on_off_changed: bool,
    pub directive: TickDirective,
}

/// Computes and advances level ramps
#[derive(Debug, Clone, Copy)]
pub struct RampController {
    timings: TransitionTimings,
    tick_period: Duration,
    default_move_rate: Option<u8>,
}

impl RampController {
    pub const fn new(config: &LevelControlConfig) -> Self {
        Self {
            timings: config.timings,
            tick_period: config.tick_period,
            default_move_rate: config.default_move_rate,
        }
    }

    pub const fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub const fn timings(&self) -> &TransitionTimings {
        &self.timings
    }

    /// Move to `target` over `time`.
    pub fn move_to_level(
        &self,
        level: &mut LevelState,
        on_off: &OnOffState,
        target: u8,
        time: TransitionTime,
        with_on_off: bool,
    ) -> TickDirective {
        let ticks = self
            .timings
            .resolve(time, OnOffTransition::away_from(on_off.is_on()));
        self.move_based_on_time(level, target, ticks, with_on_off)
    }

    /// Move towards the boundary in `direction` at a rate given in levels per second.
    ///
    /// [`MOVE_RATE_DEFAULT_RAW`] selects the configured default rate, if any.
    pub fn move_with_rate(
        &self,
        level: &mut LevelState,
        direction: Direction,
        rate_per_second: u8,
        with_on_off: bool,
    ) -> TickDirective {
        let rate_per_second = match (rate_per_second, self.default_move_rate) {
            (MOVE_RATE_DEFAULT_RAW, Some(default_rate)) => default_rate,
            (rate, _) => rate,
        };
        let rate_fixed = self.per_tick_fixed(rate_per_second);
        self.move_based_on_rate(level, direction.boundary(), rate_fixed, with_on_off)
    }

    /// Move by `amount` levels, saturating at the level bounds
    pub fn step(
        &self,
        level: &mut LevelState,
        on_off: &OnOffState,
        direction: Direction,
        amount: u8,
        time: TransitionTime,
        with_on_off: bool,
    ) -> TickDirective {
        let current = level.current();
        let target = match direction {
            Direction::Up => current.saturating_add(amount).min(MAX_LEVEL),
            Direction::Down => current.saturating_sub(amount).max(MIN_LEVEL),
        };
        self.move_to_level(level, on_off, target, time, with_on_off)
    }

    /// Stop the active ramp, keeping the level reached so far
    pub fn stop(&self, level: &mut LevelState) -> TickDirective {
        #[cfg(feature = "esp32-log")]
        println!("[RampController.stop] stopped at {:?}", level.current());
        level.freeze();
        TickDirective::Cancel
    }

    /// Advance the active ramp by one tick
    pub fn tick(&self, level: &mut LevelState, on_off: &mut OnOffState) -> TickOutcome {
        let remaining = level.consume_tick();
        if remaining == 0 {
            level.snap_to_target();
        } else {
            level.advance();
        }

        let current = level.current();
        let (coupled_on, on_off_changed) = if level.on_off_coupled() {
            let is_on = current > MIN_LEVEL;
            (Some(is_on), on_off.set(is_on))
        } else {
            (None, false)
        };

        TickOutcome {
            level: current,
            coupled_on,
            on_off_changed,
            directive: self.next_directive(remaining),
        }
    }

    /// Start a ramp with a fixed per-tick rate; the duration follows from the distance
    pub(crate) fn move_based_on_rate(
        &self,
        level: &mut LevelState,
        target: u8,
        rate_fixed: u32,
        with_on_off: bool,
    ) -> TickDirective {
        let rate_fixed = rate_fixed.max(1);
        let diff = level.begin(target, with_on_off);
        level.arm(rate_fixed, diff / rate_fixed);
        #[cfg(feature = "esp32-log")]
        println!(
            "[RampController.move_based_on_rate] {:?} -> {:?}, rate {:?}, ticks {:?}",
            level.current(),
            level.target(),
            level.rate_fixed(),
            level.remaining_ticks()
        );
        TickDirective::Schedule(self.tick_period)
    }

    /// Start a ramp lasting `ticks`; the rate follows from the distance
    fn move_based_on_time(
        &self,
        level: &mut LevelState,
        target: u8,
        ticks: u16,
        with_on_off: bool,
    ) -> TickDirective {
        let ticks = u32::from(ticks.max(1));
        let diff = level.begin(target, with_on_off);
        level.arm(diff / ticks, ticks);
        #[cfg(feature = "esp32-log")]
        println!(
            "[RampController.move_based_on_time] {:?} -> {:?}, rate {:?}, ticks {:?}",
            level.current(),
            level.target(),
            level.rate_fixed(),
            level.remaining_ticks()
        );
        TickDirective::Schedule(self.tick_period)
    }

    fn next_directive(&self, remaining: u32) -> TickDirective {
        if remaining > 0 {
            TickDirective::Schedule(self.tick_period)
        } else {
            TickDirective::Cancel
        }
    }

    /// Fixed-point share of `rate_per_second` levels that a single tick covers,
    /// rounded to the nearest unit
    #[allow(clippy::cast_possible_truncation)]
    fn per_tick_fixed(&self, rate_per_second: u8) -> u32 {
        let micros = u64::from(rate_per_second).saturating_mul(self.tick_period.as_micros());
        let fixed = micros.saturating_add(500) / 1000;
        fixed.min(u64::from(u32::MAX)) as u32
    }
}
