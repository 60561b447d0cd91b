//! Level and on/off state of a single dimmable output.
//!
//! Levels are kept twice while ramping: as the integer value reported to the
//! outside and as a fixed-point value with three decimal digits, so that
//! per-tick rates below one level do not get lost to truncation.

/// Lowest level (fully dimmed)
pub const MIN_LEVEL: u8 = 0;

/// Highest level (fully lit)
pub const MAX_LEVEL: u8 = 254;

/// Fixed-point scale (three decimal digits)
pub const FIXED_SCALE: u32 = 1000;

const DIRECTION_NAME_UP: &str = "up";
const DIRECTION_NAME_DOWN: &str = "down";

const DIRECTION_RAW_UP: u8 = 0;
const DIRECTION_RAW_DOWN: u8 = 1;

/// Direction of a level change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Direction {
    #[default]
    Up = DIRECTION_RAW_UP,
    Down = DIRECTION_RAW_DOWN,
}

impl Direction {
    /// Decode a move/step mode byte
    pub const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            DIRECTION_RAW_UP => Some(Self::Up),
            DIRECTION_RAW_DOWN => Some(Self::Down),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => DIRECTION_NAME_UP,
            Self::Down => DIRECTION_NAME_DOWN,
        }
    }

    pub fn parse_from_str(value: &str) -> Option<Self> {
        match value {
            DIRECTION_NAME_UP => Some(Self::Up),
            DIRECTION_NAME_DOWN => Some(Self::Down),
            _ => None,
        }
    }

    /// Level reached when moving in this direction without a limit
    pub const fn boundary(self) -> u8 {
        match self {
            Self::Up => MAX_LEVEL,
            Self::Down => MIN_LEVEL,
        }
    }
}

/// Converts an integer level to its fixed-point form
#[inline]
#[allow(clippy::cast_lossless)]
pub const fn to_fixed(level: u8) -> u32 {
    level as u32 * FIXED_SCALE
}

/// Converts a fixed-point level back to an integer level (floor)
#[inline]
pub fn from_fixed(fixed: u32) -> u8 {
    u8::try_from(fixed / FIXED_SCALE).map_or(MAX_LEVEL, |level| level.min(MAX_LEVEL))
}

/// Ramp state of one output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelState {
    current: u8,
    current_fixed: u32,
    target: u8,
    direction: Direction,
    rate_fixed: u32,
    remaining_ticks: u32,
    on_off_coupled: bool,
    last_level_before_off: u8,
}

impl LevelState {
    /// Create an idle state at [`MIN_LEVEL`]
    pub const fn new() -> Self {
        Self::with_level(MIN_LEVEL)
    }

    /// Create an idle state at the given level
    pub const fn with_level(level: u8) -> Self {
        let level = if level > MAX_LEVEL { MAX_LEVEL } else { level };
        Self {
            current: level,
            current_fixed: to_fixed(level),
            target: level,
            direction: Direction::Up,
            rate_fixed: 0,
            remaining_ticks: 0,
            on_off_coupled: false,
            last_level_before_off: MAX_LEVEL,
        }
    }

    pub const fn current(&self) -> u8 {
        self.current
    }

    pub const fn current_fixed(&self) -> u32 {
        self.current_fixed
    }

    pub const fn target(&self) -> u8 {
        self.target
    }

    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Fixed-point level units added or removed per tick
    pub const fn rate_fixed(&self) -> u32 {
        self.rate_fixed
    }

    pub const fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    pub const fn on_off_coupled(&self) -> bool {
        self.on_off_coupled
    }

    pub const fn last_level_before_off(&self) -> u8 {
        self.last_level_before_off
    }

    /// Check if a ramp is in progress
    pub const fn is_ramping(&self) -> bool {
        self.remaining_ticks > 0
    }

    /// Start a ramp towards `target`
    ///
    /// Returns the absolute fixed-point distance to cover.
    pub(crate) fn begin(&mut self, target: u8, with_on_off: bool) -> u32 {
        let target = target.min(MAX_LEVEL);
        self.target = target;
        self.current_fixed = to_fixed(self.current);
        self.on_off_coupled = with_on_off;

        let target_fixed = to_fixed(target);
        if self.current > target {
            self.direction = Direction::Down;
            self.current_fixed - target_fixed
        } else {
            self.direction = Direction::Up;
            target_fixed - self.current_fixed
        }
    }

    /// Arm the countdown. Both values are floored at 1.
    pub(crate) fn arm(&mut self, rate_fixed: u32, ticks: u32) {
        self.rate_fixed = rate_fixed.max(1);
        self.remaining_ticks = ticks.max(1);
    }

    /// Consume one tick and return the ticks left
    pub(crate) fn consume_tick(&mut self) -> u32 {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        self.remaining_ticks
    }

    /// Move `current_fixed` one rate step towards the target, never past it
    pub(crate) fn advance(&mut self) {
        let target_fixed = to_fixed(self.target);
        self.current_fixed = match self.direction {
            Direction::Up => self
                .current_fixed
                .saturating_add(self.rate_fixed)
                .min(target_fixed),
            Direction::Down => self
                .current_fixed
                .saturating_sub(self.rate_fixed)
                .max(target_fixed),
        };
        self.current = from_fixed(self.current_fixed);
    }

    /// Land exactly on the target, dropping fixed-point residue
    pub(crate) fn snap_to_target(&mut self) {
        self.current = self.target;
        self.current_fixed = to_fixed(self.target);
    }

    /// Stop where we are: the current level becomes the target
    pub(crate) fn freeze(&mut self) {
        self.remaining_ticks = 0;
        self.target = self.current;
        self.current_fixed = to_fixed(self.current);
    }

    /// Jump to a level with no ramp
    pub(crate) fn jump_to(&mut self, level: u8) {
        self.current = level.min(MAX_LEVEL);
        self.freeze();
    }

    pub(crate) fn remember_level_before_off(&mut self) {
        if self.current > MIN_LEVEL {
            self.last_level_before_off = self.current;
        }
    }
}

impl Default for LevelState {
    fn default() -> Self {
        Self::new()
    }
}

/// Boolean output state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OnOffState {
    is_on: bool,
}

impl OnOffState {
    pub const fn new(is_on: bool) -> Self {
        Self { is_on }
    }

    pub const fn is_on(&self) -> bool {
        self.is_on
    }

    /// Set the state and return whether it changed
    pub fn set(&mut self, is_on: bool) -> bool {
        let changed = self.is_on != is_on;
        self.is_on = is_on;
        changed
    }
}

/// Externally visible level attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelSnapshot {
    pub level: u8,
    pub target: u8,
    /// Remaining transition time, in ticks
    pub remaining_ticks: u32,
    pub is_on: bool,
}
