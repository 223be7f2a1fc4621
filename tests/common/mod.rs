//! Shared fixtures for router integration tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use catalog_router::history::{History, HistoryError, Location, MemoryHistory, PopStateListener};
use catalog_router::routing::{BasePath, Router};

/// Handlers used by the navigation tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Detail,
}

/// Memory history that can be told to reject pushes.
pub struct FlakyHistory {
    inner: MemoryHistory,
    reject: Cell<bool>,
}

#[allow(dead_code)]
impl FlakyHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            inner: MemoryHistory::new("http://localhost", initial).unwrap(),
            reject: Cell::new(false),
        }
    }

    pub fn reject_pushes(&self, reject: bool) {
        self.reject.set(reject);
    }

    pub fn inner(&self) -> &MemoryHistory {
        &self.inner
    }
}

impl History for FlakyHistory {
    fn location(&self) -> Location {
        self.inner.location()
    }

    fn push_state(&self, url: &str) -> Result<(), HistoryError> {
        if self.reject.get() {
            return Err(HistoryError::Rejected {
                url: url.to_string(),
                reason: "document detached".to_string(),
            });
        }
        self.inner.push_state(url)
    }

    fn add_pop_state_listener(&self, listener: PopStateListener) {
        self.inner.add_pop_state_listener(listener);
    }
}

/// Router over a memory history with `/` and `/products/:id` registered.
#[allow(dead_code)]
pub fn catalog_router(base: &str, initial: &str) -> Rc<Router<View, MemoryHistory>> {
    let base = BasePath::new(base);
    let history = MemoryHistory::new("http://localhost", &base.prepend(initial)).unwrap();
    let router = Rc::new(Router::new(history, base));
    router.add_route("/", View::Home).unwrap();
    router.add_route("/products/:id", View::Detail).unwrap();
    router
}

/// Subscribe a recorder that captures the route pattern seen at notify time.
#[allow(dead_code)]
pub fn record_notifications<B: History + 'static>(
    router: &Rc<Router<View, B>>,
    tag: &'static str,
    log: &Rc<RefCell<Vec<(&'static str, Option<String>)>>>,
) {
    let weak = Rc::downgrade(router);
    let log = Rc::clone(log);
    router.subscribe(move || {
        let router = weak.upgrade().ok_or("router dropped")?;
        let pattern = router.route().map(|r| r.pattern);
        log.borrow_mut().push((tag, pattern));
        Ok(())
    });
}
