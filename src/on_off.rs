//! On/off coordination
//!
//! Turning the light on or off without an explicit level is a ramp too: to
//! the on-level when turning on and to [`MIN_LEVEL`] when turning off. The
//! ramp is coupled to the on/off state, so the state follows the level while
//! it moves.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::config::{LevelControlConfig, OnLevel, OnOffTransition, TransitionTime};
use crate::level::{FIXED_SCALE, LevelState, MAX_LEVEL, MIN_LEVEL, OnOffState};
use crate::ramp::RampController;
use crate::scheduler::TickDirective;

/// Fixed-point distance of a full-range ramp
const FULL_RANGE_FIXED: u32 = (MAX_LEVEL - MIN_LEVEL) as u32 * FIXED_SCALE;

/// Owns the on/off state transitions and their default ramps
#[derive(Debug, Clone, Copy)]
pub struct OnOffCoordinator {
    on_level: OnLevel,
}

impl OnOffCoordinator {
    pub const fn new(config: &LevelControlConfig) -> Self {
        Self {
            on_level: config.on_level,
        }
    }

    pub const fn on_level(&self) -> OnLevel {
        self.on_level
    }

    /// Turn on. Returns whether the state changed.
    pub fn set_on(&self, on_off: &mut OnOffState, _level: &mut LevelState) -> bool {
        on_off.set(true)
    }

    /// Turn off, remembering the level to restore later. Returns whether the state changed.
    pub fn set_off(&self, on_off: &mut OnOffState, level: &mut LevelState) -> bool {
        let changed = on_off.set(false);
        if changed && self.on_level == OnLevel::Restore {
            level.remember_level_before_off();
        }
        changed
    }

    /// Flip the state. Returns the new state.
    pub fn toggle(&self, on_off: &mut OnOffState, level: &mut LevelState) -> bool {
        if on_off.is_on() {
            self.set_off(on_off, level);
        } else {
            self.set_on(on_off, level);
        }
        on_off.is_on()
    }

    /// Level the light goes to when turned on without an explicit level
    pub const fn on_target(&self, level: &LevelState) -> u8 {
        match self.on_level {
            OnLevel::Restore => level.last_level_before_off(),
            OnLevel::Level(on_level) => on_level,
        }
    }

    /// Ramp to the level implied by the current on/off state.
    ///
    /// Call after the state changed without an explicit level. The rate is
    /// that of a full-range ramp over the resolved transition time, and the
    /// ramp is coupled to the on/off state.
    pub fn apply_default_move(
        &self,
        on_off: &OnOffState,
        level: &mut LevelState,
        ramp: &RampController,
    ) -> TickDirective {
        let is_on = on_off.is_on();
        let target = if is_on {
            self.on_target(level)
        } else {
            MIN_LEVEL
        };
        let ticks = ramp
            .timings()
            .resolve(TransitionTime::Default, OnOffTransition::towards(is_on));
        let rate_fixed = FULL_RANGE_FIXED / u32::from(ticks);

        #[cfg(feature = "esp32-log")]
        println!(
            "[OnOffCoordinator.apply_default_move] on={:?}, target {:?} in {:?} ticks",
            is_on, target, ticks
        );
        ramp.move_based_on_rate(level, target, rate_fixed, true)
    }

    /// Flip the state and jump straight to the implied level, with no ramp.
    ///
    /// Returns the new state.
    pub fn toggle_immediate(&self, on_off: &mut OnOffState, level: &mut LevelState) -> bool {
        let is_on = self.toggle(on_off, level);
        let target = if is_on {
            self.on_target(level)
        } else {
            MIN_LEVEL
        };
        level.jump_to(target);
        is_on
    }
}
