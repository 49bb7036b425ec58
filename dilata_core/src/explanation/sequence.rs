//! Ordering of explanation responses.
//!
//! Every request gets a [`RequestTicket`] carrying a generation number.
//! When an answer arrives it is applied only if its ticket is still the
//! latest one issued; answers to superseded requests are dropped, no matter
//! in which order the network delivers them.
//!
//! ## Example
//!
//! ```rust
//! use dilata_core::explanation::{ExplanationSlot, ExplanationStatus};
//!
//! let mut slot = ExplanationSlot::default();
//! let first = slot.begin();
//! let second = slot.begin();
//!
//! assert!(slot.resolve(second, Ok("segunda".to_string())));
//! assert!(!slot.resolve(first, Ok("primera".to_string())));
//! assert_eq!(slot.status(), &ExplanationStatus::Ready("segunda".to_string()));
//! ```

use crate::errors::LabResult;

/// Generation token of one explanation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and tells whether a ticket is still the latest.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation; every earlier ticket becomes stale
    pub fn issue(&mut self) -> RequestTicket {
        self.latest = self.latest.wrapping_add(1);
        RequestTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Pass `value` through only for the latest ticket
    pub fn accept<T>(&self, ticket: RequestTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }

    /// Invalidate all outstanding tickets without issuing a new one
    pub fn supersede(&mut self) {
        self.latest = self.latest.wrapping_add(1);
    }
}

/// What the explanation area currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExplanationStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for the latest request
    Pending,
    /// Answer to the latest request
    Ready(String),
    /// User-facing message for a failed latest request
    Failed(String),
}

impl ExplanationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, ExplanationStatus::Pending)
    }
}

/// Sequencer plus the status it guards.
#[derive(Debug, Default)]
pub struct ExplanationSlot {
    sequencer: RequestSequencer,
    status: ExplanationStatus,
}

impl ExplanationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request and show it as pending
    pub fn begin(&mut self) -> RequestTicket {
        self.status = ExplanationStatus::Pending;
        self.sequencer.issue()
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `false` (and changes nothing) when the ticket was superseded.
    /// Errors are shown through [`LabError::user_message`](crate::errors::LabError::user_message).
    pub fn resolve(&mut self, ticket: RequestTicket, result: LabResult<String>) -> bool {
        let Some(result) = self.sequencer.accept(ticket, result) else {
            return false;
        };

        self.status = match result {
            Ok(text) => ExplanationStatus::Ready(text),
            Err(err) => ExplanationStatus::Failed(err.user_message()),
        };
        true
    }

    /// Drop any outstanding request and clear the area
    pub fn reset(&mut self) {
        self.sequencer.supersede();
        self.status = ExplanationStatus::Idle;
    }

    pub fn status(&self) -> &ExplanationStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sequencer.is_current(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LabError;

    #[test]
    fn test_tickets_increase() {
        let mut sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        let b = sequencer.issue();
        assert!(b.generation() > a.generation());
        assert!(!sequencer.is_current(a));
        assert!(sequencer.is_current(b));
    }

    #[test]
    fn test_accept_only_latest() {
        let mut sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        assert_eq!(sequencer.accept(a, 1), Some(1));
        let _b = sequencer.issue();
        assert_eq!(sequencer.accept(a, 1), None);
    }

    #[test]
    fn test_supersede_invalidates_outstanding() {
        let mut sequencer = RequestSequencer::new();
        let a = sequencer.issue();
        sequencer.supersede();
        assert!(!sequencer.is_current(a));
    }

    #[test]
    fn test_slot_lifecycle() {
        let mut slot = ExplanationSlot::new();
        assert_eq!(slot.status(), &ExplanationStatus::Idle);

        let ticket = slot.begin();
        assert!(slot.is_pending());

        assert!(slot.resolve(ticket, Ok("Porque los átomos vibran más.".to_string())));
        assert_eq!(
            slot.status(),
            &ExplanationStatus::Ready("Porque los átomos vibran más.".to_string())
        );
    }

    #[test]
    fn test_slot_failure_is_user_message() {
        let mut slot = ExplanationSlot::new();
        let ticket = slot.begin();
        slot.resolve(ticket, Err(LabError::external_service("cuota agotada")));
        assert_eq!(
            slot.status(),
            &ExplanationStatus::Failed("Error al comunicarse con la IA: cuota agotada".to_string())
        );
    }

    #[test]
    fn test_stale_answer_after_newer_one() {
        let mut slot = ExplanationSlot::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.resolve(second, Ok("segunda".to_string())));
        assert!(!slot.resolve(first, Ok("primera".to_string())));
        assert_eq!(slot.status(), &ExplanationStatus::Ready("segunda".to_string()));
    }

    #[test]
    fn test_stale_answer_while_newer_pending() {
        let mut slot = ExplanationSlot::new();
        let first = slot.begin();
        let _second = slot.begin();

        assert!(!slot.resolve(first, Err(LabError::external_service("timeout"))));
        assert!(slot.is_pending());
    }

    #[test]
    fn test_reset_discards_outstanding() {
        let mut slot = ExplanationSlot::new();
        let ticket = slot.begin();
        slot.reset();
        assert!(!slot.resolve(ticket, Ok("tarde".to_string())));
        assert_eq!(slot.status(), &ExplanationStatus::Idle);
    }
}
