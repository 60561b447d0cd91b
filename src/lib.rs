#![no_std]

pub mod channel;
pub mod command;
pub mod config;
pub mod engine;
pub mod level;
pub mod on_off;
pub mod output;
pub mod ramp;
pub mod report;
pub mod scheduler;

pub use command::{CommandChannel, CommandReceiver, CommandSender, LevelCommand};
pub use config::{LevelControlConfig, OnLevel, TransitionTime, TransitionTimings};
pub use engine::LevelEngine;
pub use level::{Direction, LevelSnapshot, LevelState, MAX_LEVEL, MIN_LEVEL, OnOffState};
pub use on_off::OnOffCoordinator;
pub use output::{GammaCurve, PwmOutput};
pub use ramp::{RampController, TickOutcome};
pub use report::{ReportChannel, ReportReceiver, ReportSender, StateReport, StateReporter};
pub use scheduler::{DeadlineScheduler, TickDirective, TickScheduler};

pub use embassy_time::{Duration, Instant};

/// Abstract lamp driver trait
///
/// Implement this trait to support different hardware platforms.
/// The level engine is generic over this trait.
pub trait OutputDriver {
    /// Set the lamp brightness level
    fn set_output_level(&mut self, level: u8);

    /// Switch the lamp on or off
    fn set_output_on_off(&mut self, is_on: bool);
}
