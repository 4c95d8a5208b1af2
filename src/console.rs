//! Serial input as seen by the main loop.

use portable_atomic::{AtomicBool, Ordering};

/// Non-blocking character input, typically a USB serial port.
pub trait ByteSource {
    /// Whether a host is attached. The main loop does not poll a disconnected source.
    fn is_connected(&self) -> bool;

    /// Next pending character, or `None` if nothing has arrived.
    fn try_read_char(&mut self) -> Option<char>;
}

/// Connection flags of a serial port, shared between the tasks servicing it and the main loop.
///
/// A host counts as attached only while the data endpoints are enabled *and* the host holds the
/// port open (DTR asserted). Enumeration alone sets the first flag; opening a terminal sets the
/// second.
pub struct LinkState {
    enabled: AtomicBool,
    dtr: AtomicBool,
}

impl LinkState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: AtomicBool::new(false),
            dtr: AtomicBool::new(false),
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }

    pub fn set_dtr(&self, dtr: bool) {
        self.dtr.store(dtr, Ordering::Release);
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.enabled.load(Ordering::Acquire) && self.dtr.load(Ordering::Acquire)
    }
}

impl Default for LinkState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    #[test]
    fn enumeration_alone_is_not_a_connection() {
        let link = LinkState::new();
        link.set_enabled(true);
        assert!(!link.is_connected());

        link.set_dtr(true);
        assert!(link.is_connected());
    }

    #[test]
    fn closing_the_port_disconnects() {
        let link = LinkState::new();
        link.set_enabled(true);
        link.set_dtr(true);
        link.set_dtr(false);
        assert!(!link.is_connected());
    }

    #[test]
    fn stale_dtr_after_unplug_is_ignored() {
        let link = LinkState::new();
        link.set_dtr(true);
        link.set_enabled(true);
        link.set_enabled(false);
        assert!(!link.is_connected());
    }
}
