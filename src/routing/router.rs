//! Navigation controller.
//!
//! # Responsibilities
//! - Own the route table, active route and subscriber list
//! - Push history entries for programmatic navigation
//! - Recompute the active route on push, pop-state and start
//! - Notify subscribers after every recomputation
//!
//! # Design Decisions
//! - One explicit instance per application, shared via `Rc`
//! - Single-threaded interior mutability (`Cell`/`RefCell`), no locks
//! - The active route is written before subscribers run
//! - Failures are logged here and also returned to the caller
//! - A generation counter lets renderers drop results of superseded
//!   navigations

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use url::Url;

use crate::config::RouterConfig;
use crate::history::History;
use crate::observability::metrics;
use crate::routing::base::BasePath;
use crate::routing::error::{NavigationError, NavigationResult, PatternError};
use crate::routing::pattern::Params;
use crate::routing::query::{self, Query, QueryValue};
use crate::routing::subscribers::{NotifyReport, SubscriberList, SubscriberResult};
use crate::routing::table::{RouteMatch, RouteTable};

/// What triggered a route recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    Start,
    Push,
    PopState,
}

impl NavigationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationKind::Start => "start",
            NavigationKind::Push => "push",
            NavigationKind::PopState => "pop",
        }
    }
}

/// Result of a completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub kind: NavigationKind,
    /// Full URL (path and query, base included) the route was computed for.
    pub url: String,
    /// Whether a new history entry was pushed.
    pub entry_created: bool,
    /// Pattern of the matched route, if any.
    pub matched: Option<String>,
    /// Generation assigned to this navigation.
    pub generation: u64,
    pub notified: NotifyReport,
}

/// Client-side router over a [`History`] backend.
///
/// `H` is the application's opaque handler type.
pub struct Router<H, B: History> {
    history: B,
    base: BasePath,
    routes: RefCell<RouteTable<H>>,
    current: RefCell<Option<RouteMatch<H>>>,
    subscribers: SubscriberList,
    generation: Cell<u64>,
    listening: Cell<bool>,
}

impl<H, B: History> Router<H, B> {
    pub fn new(history: B, base: BasePath) -> Self {
        Self {
            history,
            routes: RefCell::new(RouteTable::new(base.clone())),
            base,
            current: RefCell::new(None),
            subscribers: SubscriberList::new(),
            generation: Cell::new(0),
            listening: Cell::new(false),
        }
    }

    /// Router using the base path of the configured deployment mode.
    pub fn from_config(config: &RouterConfig, history: B) -> Self {
        Self::new(history, config.deployment.effective_base())
    }

    pub fn history(&self) -> &B {
        &self.history
    }

    // --- route table

    /// Register `pattern`. Re-registering an existing pattern is a no-op.
    pub fn add_route(&self, pattern: &str, handler: H) -> Result<(), PatternError> {
        self.routes.borrow_mut().insert(pattern, handler).map(|_| ())
    }

    /// Registered patterns in lookup order.
    pub fn patterns(&self) -> Vec<String> {
        self.routes.borrow().patterns().map(str::to_string).collect()
    }

    /// First route matching `path`, or the current location when `None`.
    ///
    /// Query and fragment are ignored.
    pub fn find_route(&self, path: Option<&str>) -> NavigationResult<Option<RouteMatch<H>>> {
        let location = self.history.location();
        let target = path.unwrap_or(location.pathname.as_str());
        let pathname = resolve_pathname(&location.origin, target)?;
        Ok(self.routes.borrow().lookup(&pathname))
    }

    // --- navigation

    /// Navigate to `url`, pushing a history entry unless it is already current.
    pub fn push(&self, url: &str) -> NavigationResult<Navigation> {
        self.try_push(url).inspect_err(|e| {
            tracing::error!(target_url = %url, error = %e, "Navigation failed");
            metrics::record_navigation(NavigationKind::Push.as_str(), "error");
        })
    }

    fn try_push(&self, url: &str) -> NavigationResult<Navigation> {
        let location = self.history.location();
        let target = self.base.prepend(url);
        // Compare in the location's encoding so `/a b` and `/a%20b` are one entry.
        let full_url = resolve_path_and_query(&location.origin, &target)?;

        let entry_created = location.path_and_query() != full_url;
        if entry_created {
            self.history.push_state(&target)?;
            metrics::record_history_entry();
        } else {
            tracing::debug!(url = %full_url, "Already at target, no history entry");
        }

        let route = self.find_route(Some(full_url.as_str()))?;
        Ok(self.commit(NavigationKind::Push, full_url, entry_created, route))
    }

    /// Back/forward handler. The location has already changed.
    pub fn on_pop_state(&self) -> NavigationResult<Navigation> {
        let url = self.history.location().path_and_query();
        match self.find_route(None) {
            Ok(route) => Ok(self.commit(NavigationKind::PopState, url, false, route)),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Pop-state navigation failed");
                metrics::record_navigation(NavigationKind::PopState.as_str(), "error");
                Err(e)
            }
        }
    }

    /// Install `route` as active, bump the generation, notify.
    fn commit(
        &self,
        kind: NavigationKind,
        url: String,
        entry_created: bool,
        route: Option<RouteMatch<H>>,
    ) -> Navigation {
        let matched = route.as_ref().map(|r| r.pattern.clone());
        *self.current.borrow_mut() = route;

        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        match &matched {
            Some(pattern) => {
                tracing::debug!(kind = kind.as_str(), url = %url, pattern = %pattern, generation, "Route matched");
                metrics::record_navigation(kind.as_str(), "matched");
            }
            None => {
                tracing::debug!(kind = kind.as_str(), url = %url, generation, "No route matched");
                metrics::record_navigation(kind.as_str(), "unmatched");
            }
        }

        let notified = self.subscribers.notify();
        Navigation {
            kind,
            url,
            entry_created,
            matched,
            generation,
            notified,
        }
    }

    // --- subscription

    pub fn subscribe<F>(&self, f: F)
    where
        F: Fn() -> SubscriberResult + 'static,
    {
        self.subscribers.subscribe(f);
    }

    pub fn notify(&self) -> NotifyReport {
        self.subscribers.notify()
    }

    // --- accessors

    pub fn route(&self) -> Option<RouteMatch<H>> {
        self.current.borrow().clone()
    }

    pub fn target(&self) -> Option<Rc<H>> {
        self.current.borrow().as_ref().map(|r| Rc::clone(&r.handler))
    }

    /// Parameters of the active route; empty when nothing matched.
    pub fn params(&self) -> Params {
        self.current
            .borrow()
            .as_ref()
            .map(|r| r.params.clone())
            .unwrap_or_default()
    }

    pub fn query(&self) -> Query {
        query::parse_query(&self.history.location().search)
    }

    /// Current URL with `patch` merged into its query.
    pub fn get_url<I, K, V>(&self, patch: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: QueryValue,
    {
        query::get_url(&self.history.location(), &self.base, patch)
    }

    /// Merge `patch` into the current query and navigate there.
    pub fn set_query<I, K, V>(&self, patch: I) -> NavigationResult<Navigation>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: QueryValue,
    {
        let url = self.get_url(patch);
        self.push(&url)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str()
    }

    /// App-relative path of `full_path`, or of the current location.
    pub fn app_path(&self, full_path: Option<&str>) -> String {
        match full_path {
            Some(path) => self.base.strip(path),
            None => self.base.strip(&self.history.location().pathname),
        }
    }

    /// Increments on every route recomputation.
    pub fn generation(&self) -> u64 {
        self.generation.get()
    }

    pub fn is_started(&self) -> bool {
        self.listening.get()
    }
}

impl<H: 'static, B: History + 'static> Router<H, B> {
    /// Bind the pop-state listener (once), compute the initial route, notify.
    pub fn start(self: &Rc<Self>) -> NavigationResult<Navigation> {
        if !self.listening.replace(true) {
            let router = Rc::downgrade(self);
            self.history.add_pop_state_listener(Rc::new(move || {
                if let Some(router) = router.upgrade() {
                    // Failures are logged inside on_pop_state.
                    let _ = router.on_pop_state();
                }
            }));
            tracing::info!(
                base = %self.base,
                routes = self.routes.borrow().len(),
                "Router started"
            );
        }

        let url = self.history.location().path_and_query();
        match self.find_route(None) {
            Ok(route) => Ok(self.commit(NavigationKind::Start, url, false, route)),
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Initial route resolution failed");
                metrics::record_navigation(NavigationKind::Start.as_str(), "error");
                Err(e)
            }
        }
    }
}

fn resolve(origin: &str, target: &str) -> NavigationResult<Url> {
    Url::parse(origin)
        .and_then(|base| base.join(target))
        .map_err(|source| NavigationError::InvalidUrl {
            target: target.to_string(),
            source,
        })
}

fn resolve_pathname(origin: &str, target: &str) -> NavigationResult<String> {
    resolve(origin, target).map(|url| url.path().to_string())
}

/// Path and query of `target` as the history location would report them.
fn resolve_path_and_query(origin: &str, target: &str) -> NavigationResult<String> {
    let url = resolve(origin, target)?;
    Ok(match url.query() {
        Some(q) if !q.is_empty() => format!("{}?{}", url.path(), q),
        _ => url.path().to_string(),
    })
}
