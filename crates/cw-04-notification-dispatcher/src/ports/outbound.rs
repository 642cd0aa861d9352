//! Driven Ports (SPI - Outbound Dependencies)

use shared_bus::CaseEvent;

/// Best-effort external delivery of an event.
///
/// `submit` must return promptly and must not fail: implementations queue
/// the event and deal with delivery errors themselves.
pub trait ExternalChannel: Send + Sync {
    fn submit(&self, event: &CaseEvent);
}
