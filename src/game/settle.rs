// Deferred game-over checks, one per dropped body

/// A check waiting for its body to settle
#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingCheck<H> {
    body: H,
    due_at: f64,
}

/// Cancellable deferred checks keyed by body handle
///
/// Time is whatever clock the owner advances; the checks never read it themselves.
#[derive(Debug, Clone)]
pub struct SettleChecks<H> {
    pending: Vec<PendingCheck<H>>,
}

impl<H: Copy + PartialEq> SettleChecks<H> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Schedule a check for `body`, replacing any earlier one
    pub fn schedule(&mut self, body: H, due_at: f64) {
        self.cancel(body);
        self.pending.push(PendingCheck { body, due_at });
    }

    /// Drop the check for `body`; returns whether one was pending
    pub fn cancel(&mut self, body: H) -> bool {
        let before = self.pending.len();
        self.pending.retain(|check| check.body != body);
        self.pending.len() != before
    }

    /// Cancel everything
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Remove and return the bodies whose check is due at `now`, oldest first
    pub fn take_due(&mut self, now: f64) -> Vec<H> {
        let mut due: Vec<PendingCheck<H>> = Vec::new();
        self.pending.retain(|check| {
            if check.due_at <= now {
                due.push(*check);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.due_at.total_cmp(&b.due_at));
        due.into_iter().map(|check| check.body).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl<H: Copy + PartialEq> Default for SettleChecks<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_due_early() {
        let mut checks = SettleChecks::new();
        checks.schedule(1u32, 2.0);

        assert!(checks.take_due(1.99).is_empty());
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn test_due_checks_fire_once() {
        let mut checks = SettleChecks::new();
        checks.schedule(1u32, 2.0);

        assert_eq!(checks.take_due(2.0), vec![1]);
        assert!(checks.take_due(10.0).is_empty());
        assert_eq!(checks.len(), 0);
    }

    #[test]
    fn test_due_order_is_by_time() {
        let mut checks = SettleChecks::new();
        checks.schedule(7u32, 3.0);
        checks.schedule(4u32, 2.5);
        checks.schedule(9u32, 5.0);

        assert_eq!(checks.take_due(4.0), vec![4, 7]);
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn test_cancel() {
        let mut checks = SettleChecks::new();
        checks.schedule(1u32, 2.0);
        checks.schedule(2u32, 2.0);

        assert!(checks.cancel(1));
        assert!(!checks.cancel(1));
        assert_eq!(checks.take_due(3.0), vec![2]);
    }

    #[test]
    fn test_reschedule_replaces() {
        let mut checks = SettleChecks::new();
        checks.schedule(1u32, 2.0);
        checks.schedule(1u32, 6.0);

        assert!(checks.take_due(3.0).is_empty());
        assert_eq!(checks.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut checks = SettleChecks::new();
        checks.schedule(1u32, 2.0);
        checks.schedule(2u32, 2.0);
        checks.clear();

        assert!(checks.take_due(100.0).is_empty());
    }
}
