use crate::channel::{Channel, Receiver, Sender};
use crate::config::TransitionTime;
use crate::level::{Direction, MAX_LEVEL};

const ON_OFF_COMMAND_OFF: u8 = 0;
const ON_OFF_COMMAND_ON: u8 = 1;
const ON_OFF_COMMAND_TOGGLE: u8 = 2;

/// Commands accepted by the level engine
///
/// Every level command supersedes the ramp in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelCommand {
    /// Ramp to `level` over `transition_time`
    MoveToLevel {
        level: u8,
        transition_time: TransitionTime,
        with_on_off: bool,
    },
    /// Ramp towards the boundary in `direction` at a fixed rate
    Move {
        direction: Direction,
        rate_per_second: u8,
        with_on_off: bool,
    },
    /// Ramp by `amount` levels, saturating at the bounds
    Step {
        direction: Direction,
        amount: u8,
        transition_time: TransitionTime,
        with_on_off: bool,
    },
    /// Freeze the level where it is
    Stop,
    On,
    Off,
    Toggle,
    /// Toggle from a local button: switch instantly, without a ramp
    LocalToggle,
}

impl LevelCommand {
    /// Build a move-to-level command from wire values
    pub const fn move_to_level_raw(level: u8, transition_time: u16, with_on_off: bool) -> Self {
        Self::MoveToLevel {
            level: if level > MAX_LEVEL { MAX_LEVEL } else { level },
            transition_time: TransitionTime::from_raw(transition_time),
            with_on_off,
        }
    }

    /// Build a move command from wire values
    ///
    /// Returns `None` for an unknown move mode.
    pub const fn move_raw(mode: u8, rate_per_second: u8, with_on_off: bool) -> Option<Self> {
        let Some(direction) = Direction::from_raw(mode) else {
            return None;
        };
        Some(Self::Move {
            direction,
            rate_per_second,
            with_on_off,
        })
    }

    /// Build a step command from wire values
    ///
    /// Returns `None` for an unknown step mode.
    pub const fn step_raw(
        mode: u8,
        amount: u8,
        transition_time: u16,
        with_on_off: bool,
    ) -> Option<Self> {
        let Some(direction) = Direction::from_raw(mode) else {
            return None;
        };
        Some(Self::Step {
            direction,
            amount,
            transition_time: TransitionTime::from_raw(transition_time),
            with_on_off,
        })
    }

    /// Decode an on/off command id
    pub const fn on_off_from_raw(id: u8) -> Option<Self> {
        match id {
            ON_OFF_COMMAND_OFF => Some(Self::Off),
            ON_OFF_COMMAND_ON => Some(Self::On),
            ON_OFF_COMMAND_TOGGLE => Some(Self::Toggle),
            _ => None,
        }
    }

    /// Check if the command changes the on/off state without an explicit level
    pub const fn is_on_off(&self) -> bool {
        matches!(self, Self::On | Self::Off | Self::Toggle | Self::LocalToggle)
    }
}

/// Type alias for command sender
pub type CommandSender<'a, const SIZE: usize> = Sender<'a, LevelCommand, SIZE>;

/// Type alias for command receiver
pub type CommandReceiver<'a, const SIZE: usize> = Receiver<'a, LevelCommand, SIZE>;

/// Type alias for the command channel
pub type CommandChannel<const SIZE: usize> = Channel<LevelCommand, SIZE>;
