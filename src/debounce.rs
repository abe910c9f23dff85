use std::time::Duration;

/// Default quiet period before a pending save is written
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Identifies the mutation that scheduled a save
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SaveTicket(u64);

/// Coalesces bursts of mutations into one save.
///
/// Every `trigger` replaces the pending ticket, so only the ticket handed out
/// last can `fire`. The caller arms one timer per ticket and reports back
/// when it elapses; timers holding a replaced ticket are stale and do nothing.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    generation: u64,
    pending: Option<SaveTicket>,
    armed: bool,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: 0,
            pending: None,
            armed: true,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the quiet period
    pub fn trigger(&mut self) -> SaveTicket {
        self.generation += 1;
        let ticket = SaveTicket(self.generation);
        self.pending = Some(ticket);
        self.armed = false;
        ticket
    }

    /// The pending ticket, once per `trigger`, for the caller to arm a timer
    pub fn take_unarmed(&mut self) -> Option<SaveTicket> {
        if self.armed {
            return None;
        }
        self.armed = true;
        self.pending
    }

    /// True, once, if `ticket` is still the pending one
    pub fn fire(&mut self, ticket: SaveTicket) -> bool {
        if self.pending == Some(ticket) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Drop the pending ticket, returning whether there was one
    pub fn settle(&mut self) -> bool {
        self.armed = true;
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
