use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter of the order being edited
///
/// Every remote call takes a ticket before suspending. When the response
/// arrives, it is applied only if the counter has not moved since.
#[derive(Debug, Clone, Default)]
pub(crate) struct Epoch(Arc<AtomicU64>);

impl Epoch {
    pub(crate) fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }

    /// Invalidate every outstanding ticket
    pub(crate) fn advance(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn ticket(&self) -> EpochTicket {
        EpochTicket {
            epoch: self.clone(),
            value: self.current(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct EpochTicket {
    epoch: Epoch,
    value: u64,
}

impl EpochTicket {
    pub(crate) fn is_current(&self) -> bool {
        self.epoch.current() == self.value
    }
}

/// Handle for the navigation layer
///
/// Calling [`NavigationGuard::invalidate`] when the user leaves the sale
/// screen makes every in-flight response for the current order stale.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    epoch: Epoch,
}

impl NavigationGuard {
    pub(crate) fn new(epoch: Epoch) -> Self {
        Self { epoch }
    }

    pub fn invalidate(&self) {
        let epoch = self.epoch.advance();
        tracing::debug!(epoch, "Sale view invalidated");
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_goes_stale() {
        let epoch = Epoch::default();
        let ticket = epoch.ticket();
        assert!(ticket.is_current());

        let guard = NavigationGuard::new(epoch.clone());
        guard.invalidate();
        assert!(!ticket.is_current());
        assert!(epoch.ticket().is_current());
        assert_eq!(guard.epoch(), 1);
    }
}
