//! State-change reports for the attribute reporting layer.

use crate::channel::{Channel, Receiver, Sender};

/// A state change worth telling network peers about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateReport {
    OnOff(bool),
    Level(u8),
}

/// Receives state reports from the engine
pub trait StateReporter {
    fn report(&mut self, report: StateReport);
}

/// Reporting disabled
impl StateReporter for () {
    fn report(&mut self, _report: StateReport) {}
}

/// Type alias for report sender
pub type ReportSender<'a, const SIZE: usize> = Sender<'a, StateReport, SIZE>;

/// Type alias for report receiver
pub type ReportReceiver<'a, const SIZE: usize> = Receiver<'a, StateReport, SIZE>;

/// Type alias for the report channel
pub type ReportChannel<const SIZE: usize> = Channel<StateReport, SIZE>;

/// Newer reports win: a full channel drops its oldest entry.
impl<const SIZE: usize> StateReporter for ReportSender<'_, SIZE> {
    fn report(&mut self, report: StateReport) {
        let _ = self.send_replacing_oldest(report);
    }
}
