//! Last-write-wins display state for overlapping report requests.
//!
//! Each request takes a ticket before it starts. When requests finish out
//! of order, only the result of the most recently issued ticket is shown;
//! results of older tickets are dropped, never merged.

use std::sync::Mutex;

use tracing::debug;

/// Ticket identifying one report request, in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct BoardState<T> {
    issued: u64,
    shown: Option<(Ticket, T)>,
}

/// Currently displayed report result.
#[derive(Debug)]
pub struct ReportBoard<T> {
    state: Mutex<BoardState<T>>,
}

impl<T> Default for ReportBoard<T> {
    fn default() -> Self {
        Self {
            state: Mutex::new(BoardState {
                issued: 0,
                shown: None,
            }),
        }
    }
}

impl<T: Clone> ReportBoard<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request. Any result of an earlier ticket is stale from now on.
    pub fn issue(&self) -> Ticket {
        let mut state = self.lock();
        state.issued += 1;
        Ticket(state.issued)
    }

    /// Show `value` if `ticket` is still the latest request.
    ///
    /// Returns whether the value was accepted.
    pub fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut state = self.lock();
        if ticket.0 != state.issued {
            debug!(
                ticket = ticket.0,
                latest = state.issued,
                "discarded stale report result"
            );
            return false;
        }
        state.shown = Some((ticket, value));
        true
    }

    /// The result on display, if any.
    pub fn current(&self) -> Option<T> {
        self.lock().shown.as_ref().map(|(_, value)| value.clone())
    }

    /// Ticket of the result on display.
    pub fn current_ticket(&self) -> Option<Ticket> {
        self.lock().shown.as_ref().map(|(ticket, _)| *ticket)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BoardState<T>> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
