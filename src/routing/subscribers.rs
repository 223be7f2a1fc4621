//! Route-change subscription bus.
//!
//! # Design Decisions
//! - Append-only, no dedupe, no unsubscribe
//! - Subscribers take no arguments; they re-read router state themselves
//! - A failing subscriber is logged and skipped; later subscribers still run
//! - Subscribers added during a notification run from the next one onwards

use std::cell::RefCell;
use std::rc::Rc;

use crate::observability::metrics;

/// Error type a subscriber may return.
pub type SubscriberError = Box<dyn std::error::Error>;

/// Return type of a subscriber callback.
pub type SubscriberResult = Result<(), SubscriberError>;

type Subscriber = Rc<dyn Fn() -> SubscriberResult>;

/// Outcome of one notification round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Ordered list of route-change callbacks.
#[derive(Default)]
pub struct SubscriberList {
    subscribers: RefCell<Vec<Subscriber>>,
}

impl SubscriberList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn() -> SubscriberResult + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(f));
    }

    pub fn len(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.borrow().is_empty()
    }

    /// Call every subscriber once, in registration order.
    pub fn notify(&self) -> NotifyReport {
        // Subscribers may re-enter the router (including `subscribe`).
        let snapshot: Vec<Subscriber> = self.subscribers.borrow().clone();
        let mut report = NotifyReport::default();

        for (index, subscriber) in snapshot.iter().enumerate() {
            match subscriber() {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(subscriber = index, error = %e, "Route subscriber failed");
                    metrics::record_subscriber_failure();
                    report.failed += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notify_in_order() {
        let bus = SubscriberList::new();
        let calls = Rc::new(RefCell::new(Vec::new()));

        for id in 0..3 {
            let calls = calls.clone();
            bus.subscribe(move || {
                calls.borrow_mut().push(id);
                Ok(())
            });
        }

        let report = bus.notify();
        assert_eq!(*calls.borrow(), vec![0, 1, 2]);
        assert_eq!(report, NotifyReport { delivered: 3, failed: 0 });
    }

    #[test]
    fn test_failing_subscriber_is_isolated() {
        let bus = SubscriberList::new();
        let reached = Rc::new(RefCell::new(false));

        bus.subscribe(|| Err("render target missing".into()));
        let r = reached.clone();
        bus.subscribe(move || {
            *r.borrow_mut() = true;
            Ok(())
        });

        let report = bus.notify();
        assert!(*reached.borrow());
        assert_eq!(report, NotifyReport { delivered: 1, failed: 1 });
    }

    #[test]
    fn test_subscribe_during_notify_runs_next_round() {
        let bus = Rc::new(SubscriberList::new());
        let late_calls = Rc::new(RefCell::new(0));

        let weak = Rc::downgrade(&bus);
        let late = late_calls.clone();
        bus.subscribe(move || {
            if let Some(bus) = weak.upgrade() {
                let late = late.clone();
                bus.subscribe(move || {
                    *late.borrow_mut() += 1;
                    Ok(())
                });
            }
            Ok(())
        });

        bus.notify();
        assert_eq!(*late_calls.borrow(), 0);
        bus.notify();
        assert_eq!(*late_calls.borrow(), 1);
        assert_eq!(bus.len(), 3);
    }
}
