//! Simple `ExternalChannel` implementations.

use parking_lot::Mutex;
use shared_bus::CaseEvent;

use crate::ports::ExternalChannel;

/// Used when external delivery is switched off.
#[derive(Debug, Default)]
pub struct DisabledChannel;

impl ExternalChannel for DisabledChannel {
    fn submit(&self, _event: &CaseEvent) {}
}

/// Keeps every submitted event. For tests and dry runs.
#[derive(Debug, Default)]
pub struct RecordingChannel {
    events: Mutex<Vec<CaseEvent>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CaseEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.events.lock().len()
    }
}

impl ExternalChannel for RecordingChannel {
    fn submit(&self, event: &CaseEvent) {
        self.events.lock().push(event.clone());
    }
}
