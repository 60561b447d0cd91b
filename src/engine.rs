use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::OutputDriver;
use crate::command::{CommandReceiver, LevelCommand};
use crate::config::LevelControlConfig;
use crate::level::{LevelSnapshot, LevelState, MIN_LEVEL, OnOffState};
use crate::on_off::OnOffCoordinator;
use crate::ramp::RampController;
use crate::report::{StateReport, StateReporter};
use crate::scheduler::{DeadlineScheduler, TickDirective, TickScheduler};

/// Level Engine - the single owner of the level and on/off state
///
/// Commands come in through the command channel or [`LevelEngine::handle`],
/// ticks through [`LevelEngine::on_tick`]. Each one runs to completion before
/// the next is looked at.
pub struct LevelEngine<'a, O, S, R, const COMMANDS: usize>
where
    O: OutputDriver,
    S: TickScheduler,
    R: StateReporter,
{
    // External dependencies and configuration
    commands: CommandReceiver<'a, COMMANDS>,
    output: O,
    scheduler: S,
    reporter: R,
    start_on: bool,
    report_level_on_stop: bool,

    // Internal state
    level: LevelState,
    on_off: OnOffState,
    /// Last on/off state sent to the reporter
    reported_on: bool,

    // Internal dependencies
    ramp: RampController,
    coordinator: OnOffCoordinator,
}

impl<'a, O, S, R, const COMMANDS: usize> LevelEngine<'a, O, S, R, COMMANDS>
where
    O: OutputDriver,
    S: TickScheduler,
    R: StateReporter,
{
    /// Create a new engine, idle at the lowest level and off
    pub fn new(
        commands: CommandReceiver<'a, COMMANDS>,
        output: O,
        scheduler: S,
        reporter: R,
        config: &LevelControlConfig,
    ) -> Self {
        Self::with_state(
            commands,
            output,
            scheduler,
            reporter,
            config,
            LevelState::new(),
        )
    }

    /// Create a new engine starting from a known level state
    pub fn with_state(
        commands: CommandReceiver<'a, COMMANDS>,
        output: O,
        scheduler: S,
        reporter: R,
        config: &LevelControlConfig,
        level: LevelState,
    ) -> Self {
        Self {
            commands,
            output,
            scheduler,
            reporter,
            start_on: config.start_on,
            report_level_on_stop: config.report_level_on_stop,
            level,
            on_off: OnOffState::new(false),
            reported_on: false,
            ramp: RampController::new(config),
            coordinator: OnOffCoordinator::new(config),
        }
    }

    /// Bring the output to its configured initial state
    pub fn start(&mut self) {
        if self.start_on {
            let changed = self.coordinator.set_on(&mut self.on_off, &mut self.level);
            self.report_on_off(changed);
        }
        let directive = self
            .coordinator
            .apply_default_move(&self.on_off, &mut self.level, &self.ramp);
        self.output.set_output_level(self.level.current());
        directive.apply(&mut self.scheduler);
    }

    /// Process all pending commands from the channel (non-blocking)
    pub fn process_pending(&mut self) {
        while let Ok(command) = self.commands.try_receive() {
            self.handle(command);
        }
    }

    /// Apply a single command
    ///
    /// A tick scheduled here is relative to the scheduler's notion of now.
    /// With [`DeadlineScheduler`] use [`LevelEngine::handle_at`] or
    /// [`LevelEngine::poll`] instead.
    pub fn handle(&mut self, command: LevelCommand) {
        #[cfg(feature = "esp32-log")]
        println!("[LevelEngine.handle] {:?}", command);

        let directive = match command {
            LevelCommand::MoveToLevel {
                level,
                transition_time,
                with_on_off,
            } => self.ramp.move_to_level(
                &mut self.level,
                &self.on_off,
                level,
                transition_time,
                with_on_off,
            ),
            LevelCommand::Move {
                direction,
                rate_per_second,
                with_on_off,
            } => self
                .ramp
                .move_with_rate(&mut self.level, direction, rate_per_second, with_on_off),
            LevelCommand::Step {
                direction,
                amount,
                transition_time,
                with_on_off,
            } => self.ramp.step(
                &mut self.level,
                &self.on_off,
                direction,
                amount,
                transition_time,
                with_on_off,
            ),
            LevelCommand::Stop => {
                let directive = self.ramp.stop(&mut self.level);
                if self.report_level_on_stop {
                    self.reporter
                        .report(StateReport::Level(self.level.current()));
                }
                directive
            }
            LevelCommand::On => {
                let changed = self.coordinator.set_on(&mut self.on_off, &mut self.level);
                self.report_on_off(changed);
                self.default_move()
            }
            LevelCommand::Off => {
                let changed = self.coordinator.set_off(&mut self.on_off, &mut self.level);
                self.report_on_off(changed);
                self.default_move()
            }
            LevelCommand::Toggle => {
                self.coordinator.toggle(&mut self.on_off, &mut self.level);
                self.report_on_off(true);
                self.default_move()
            }
            LevelCommand::LocalToggle => {
                let is_on = self
                    .coordinator
                    .toggle_immediate(&mut self.on_off, &mut self.level);
                self.report_on_off(true);
                self.output.set_output_on_off(is_on);
                TickDirective::Cancel
            }
        };

        self.output.set_output_level(self.level.current());
        directive.apply(&mut self.scheduler);
    }

    /// Advance the active ramp. Call when the scheduled tick fires.
    pub fn on_tick(&mut self) {
        let outcome = self.ramp.tick(&mut self.level, &mut self.on_off);

        self.output.set_output_level(outcome.level);
        if let Some(is_on) = outcome.coupled_on {
            self.output.set_output_on_off(is_on);
            // Report only the state the ramp ends in.
            if is_on == (self.level.target() > MIN_LEVEL) && is_on != self.reported_on {
                self.send_on_off(is_on);
            }
        }

        outcome.directive.apply(&mut self.scheduler);
    }

    /// Current externally visible attributes
    pub const fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            level: self.level.current(),
            target: self.level.target(),
            remaining_ticks: self.level.remaining_ticks(),
            is_on: self.on_off.is_on(),
        }
    }

    pub const fn level_state(&self) -> &LevelState {
        &self.level
    }

    pub const fn on_off_state(&self) -> &OnOffState {
        &self.on_off
    }

    pub const fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub const fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub const fn reporter(&self) -> &R {
        &self.reporter
    }

    fn default_move(&mut self) -> TickDirective {
        self.coordinator
            .apply_default_move(&self.on_off, &mut self.level, &self.ramp)
    }

    fn report_on_off(&mut self, changed: bool) {
        if changed {
            self.send_on_off(self.on_off.is_on());
        }
    }

    fn send_on_off(&mut self, is_on: bool) {
        self.reported_on = is_on;
        self.reporter.report(StateReport::OnOff(is_on));
    }
}

impl<O, R, const COMMANDS: usize> LevelEngine<'_, O, DeadlineScheduler, R, COMMANDS>
where
    O: OutputDriver,
    R: StateReporter,
{
    /// Run one step of the engine loop at `now`.
    ///
    /// Handles pending commands, fires the tick if it is due and returns how
    /// long the caller may sleep. `None` means no tick is scheduled and only a
    /// new command can wake the engine.
    pub fn poll(&mut self, now: Instant) -> Option<Duration> {
        self.scheduler.observe(now);
        self.process_pending();

        if self.scheduler.poll_due(now) {
            self.on_tick();
        }

        self.scheduler.sleep_duration(now)
    }

    /// Apply a single command received at `now`
    ///
    /// The first tick of a new ramp is scheduled one tick period after `now`.
    pub fn handle_at(&mut self, now: Instant, command: LevelCommand) {
        self.scheduler.observe(now);
        self.handle(command);
    }
}
