use embassy_time::Duration;

/// Raw transition time meaning "use the configured default"
pub const TRANSITION_TIME_DEFAULT_RAW: u16 = 0xFFFF;

/// Raw on-level meaning "restore the level the light had before it was turned off"
pub const ON_LEVEL_RESTORE_RAW: u8 = 0xFF;

/// Raw move rate meaning "use the configured default move rate"
pub const MOVE_RATE_DEFAULT_RAW: u8 = 0xFF;

/// Default tick period (10 ticks per second).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Requested duration of a transition, in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionTime {
    /// Resolve from the configured on/off transition times
    #[default]
    Default,
    /// Explicit number of ticks. Zero means "as fast as possible".
    Ticks(u16),
}

impl TransitionTime {
    pub const fn from_raw(raw: u16) -> Self {
        match raw {
            TRANSITION_TIME_DEFAULT_RAW => Self::Default,
            ticks => Self::Ticks(ticks),
        }
    }

    pub const fn to_raw(self) -> u16 {
        match self {
            Self::Default => TRANSITION_TIME_DEFAULT_RAW,
            Self::Ticks(ticks) => ticks,
        }
    }
}

/// Level used when the light is turned on without an explicit level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OnLevel {
    /// Go back to the level the light had when it was turned off
    #[default]
    Restore,
    /// Always go to this level
    Level(u8),
}

impl OnLevel {
    pub const fn from_raw(raw: u8) -> Self {
        match raw {
            ON_LEVEL_RESTORE_RAW => Self::Restore,
            level => Self::Level(level),
        }
    }

    pub const fn to_raw(self) -> u8 {
        match self {
            Self::Restore => ON_LEVEL_RESTORE_RAW,
            Self::Level(level) => level,
        }
    }
}

/// Which way the on/off state is heading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnOffTransition {
    TurningOn,
    TurningOff,
}

impl OnOffTransition {
    /// Transition a level change is assumed to take, given the current state.
    ///
    /// A lit output heads towards off and a dark one towards on.
    pub const fn away_from(is_on: bool) -> Self {
        if is_on {
            Self::TurningOff
        } else {
            Self::TurningOn
        }
    }

    /// Transition that has just been requested, given the new state
    pub const fn towards(is_on: bool) -> Self {
        if is_on {
            Self::TurningOn
        } else {
            Self::TurningOff
        }
    }
}

/// Configured transition times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransitionTimings {
    /// Time to use when turning on
    pub on: TransitionTime,
    /// Time to use when turning off
    pub off: TransitionTime,
    /// Fallback for both directions
    pub on_off: TransitionTime,
}

impl TransitionTimings {
    /// Resolve a requested time to a tick count.
    ///
    /// `Default` falls back to the time for `transition`, then to the generic
    /// on/off time, then to a single tick. The result is never zero.
    pub const fn resolve(&self, requested: TransitionTime, transition: OnOffTransition) -> u16 {
        let ticks = match requested {
            TransitionTime::Ticks(ticks) => ticks,
            TransitionTime::Default => {
                let specific = match transition {
                    OnOffTransition::TurningOn => self.on,
                    OnOffTransition::TurningOff => self.off,
                };
                match (specific, self.on_off) {
                    (TransitionTime::Ticks(ticks), _) | (_, TransitionTime::Ticks(ticks)) => {
                        ticks
                    }
                    _ => 1,
                }
            }
        };

        if ticks == 0 { 1 } else { ticks }
    }
}

/// Configuration for the level engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelControlConfig {
    pub on_level: OnLevel,
    pub timings: TransitionTimings,
    /// Rate used by moves that request the default rate, in levels per second
    pub default_move_rate: Option<u8>,
    pub tick_period: Duration,
    /// Initial on/off state, applied with a default move on start
    pub start_on: bool,
    /// Report the frozen level when a ramp is stopped
    pub report_level_on_stop: bool,
}

impl LevelControlConfig {
    pub const fn new() -> Self {
        Self {
            on_level: OnLevel::Restore,
            timings: TransitionTimings {
                on: TransitionTime::Default,
                off: TransitionTime::Default,
                on_off: TransitionTime::Default,
            },
            default_move_rate: None,
            tick_period: DEFAULT_TICK_PERIOD,
            start_on: false,
            report_level_on_stop: false,
        }
    }
}

impl Default for LevelControlConfig {
    fn default() -> Self {
        Self::new()
    }
}
