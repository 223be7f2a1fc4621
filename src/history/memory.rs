//! In-memory history stack.
//!
//! Behaves like the browser History API: pushing truncates the forward
//! entries, `back`/`forward`/`go` move the cursor and then fire every
//! pop-state listener.

use std::cell::RefCell;

use url::Url;

use crate::history::{History, HistoryError, Location, PopStateListener};

#[derive(Debug)]
struct Entries {
    stack: Vec<Url>,
    index: usize,
}

impl Entries {
    fn current(&self) -> &Url {
        &self.stack[self.index]
    }
}

/// History backend that keeps entries in memory.
pub struct MemoryHistory {
    entries: RefCell<Entries>,
    listeners: RefCell<Vec<PopStateListener>>,
}

impl MemoryHistory {
    /// Create a history whose first entry is `initial` resolved against `origin`.
    pub fn new(origin: &str, initial: &str) -> Result<Self, HistoryError> {
        let base = Url::parse(origin).map_err(|e| HistoryError::InvalidUrl {
            url: origin.to_string(),
            reason: e.to_string(),
        })?;
        let first = base.join(initial).map_err(|e| HistoryError::InvalidUrl {
            url: initial.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            entries: RefCell::new(Entries {
                stack: vec![first],
                index: 0,
            }),
            listeners: RefCell::new(Vec::new()),
        })
    }

    /// Number of entries in the stack.
    pub fn len(&self) -> usize {
        self.entries.borrow().stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().stack.is_empty()
    }

    /// Cursor position within the stack.
    pub fn index(&self) -> usize {
        self.entries.borrow().index
    }

    /// Path and query of every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .borrow()
            .stack
            .iter()
            .map(|url| match url.query() {
                Some(q) if !q.is_empty() => format!("{}?{}", url.path(), q),
                _ => url.path().to_string(),
            })
            .collect()
    }

    /// Number of registered pop-state listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn back(&self) -> bool {
        self.go(-1)
    }

    pub fn forward(&self) -> bool {
        self.go(1)
    }

    /// Move the cursor by `delta` entries and fire pop-state.
    ///
    /// Returns `false` without firing when the target is out of range or
    /// `delta` is zero.
    pub fn go(&self, delta: isize) -> bool {
        {
            let mut entries = self.entries.borrow_mut();
            let target = (entries.index as isize)
                .checked_add(delta)
                .and_then(|t| usize::try_from(t).ok())
                .filter(|&t| delta != 0 && t < entries.stack.len());
            let Some(target) = target else {
                return false;
            };
            entries.index = target;
            tracing::trace!(index = entries.index, url = %entries.current(), "History cursor moved");
        }

        // Listeners re-enter `location()`, so no borrow may be held here.
        let listeners: Vec<PopStateListener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
        true
    }
}

impl History for MemoryHistory {
    fn location(&self) -> Location {
        let entries = self.entries.borrow();
        let url = entries.current();
        Location {
            origin: url.origin().ascii_serialization(),
            pathname: url.path().to_string(),
            search: match url.query() {
                Some(q) if !q.is_empty() => format!("?{q}"),
                _ => String::new(),
            },
        }
    }

    fn push_state(&self, url: &str) -> Result<(), HistoryError> {
        let mut entries = self.entries.borrow_mut();
        let current = entries.current().clone();
        let next = current.join(url).map_err(|e| HistoryError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if next.origin() != current.origin() {
            return Err(HistoryError::CrossOrigin {
                url: url.to_string(),
                origin: current.origin().ascii_serialization(),
            });
        }

        let keep = entries.index + 1;
        entries.stack.truncate(keep);
        entries.stack.push(next);
        entries.index = keep;
        Ok(())
    }

    fn add_pop_state_listener(&self, listener: PopStateListener) {
        self.listeners.borrow_mut().push(listener);
    }
}
