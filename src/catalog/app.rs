//! Catalog application: route registration, rendering, scripted steps.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::catalog::pages::Page;
use crate::catalog::products::ProductStore;
use crate::history::{History, MemoryHistory};
use crate::routing::{Navigation, NavigationResult, Params, PatternError, Query, Router};

const NOT_FOUND: &str = "[not found]";

/// Last committed render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub html: String,
    /// Router generation the content belongs to.
    pub generation: u64,
    pub renders: usize,
    /// Loads that finished after a newer navigation and were dropped.
    pub discarded: usize,
}

/// Route state as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct RouteSummary {
    pub url: String,
    pub pattern: Option<String>,
    pub page: Option<&'static str>,
    pub params: Params,
    pub query: Query,
    pub generation: u64,
}

type Shared<T> = Rc<RefCell<T>>;

pub struct CatalogApp<B: History> {
    router: Rc<Router<Page, B>>,
    screen: Shared<Screen>,
    pending: Shared<Vec<JoinHandle<()>>>,
}

impl<B: History + 'static> CatalogApp<B> {
    /// Register the catalog pages on `router` and subscribe the renderer.
    ///
    /// Rendering spawns on the current `LocalSet`, so route changes must be
    /// driven from inside one.
    pub fn new(router: Rc<Router<Page, B>>, store: Rc<ProductStore>) -> Result<Self, PatternError> {
        router.add_route("/", Page::home(Rc::clone(&store)))?;
        router.add_route("/products/:id", Page::detail(store))?;

        let screen: Shared<Screen> = Rc::default();
        let pending: Shared<Vec<JoinHandle<()>>> = Rc::default();

        let weak = Rc::downgrade(&router);
        let (s, p) = (Rc::clone(&screen), Rc::clone(&pending));
        router.subscribe(move || {
            let router = weak.upgrade().ok_or("router dropped")?;
            render(&router, &s, &p);
            Ok(())
        });

        Ok(Self {
            router,
            screen,
            pending,
        })
    }

    pub fn router(&self) -> &Rc<Router<Page, B>> {
        &self.router
    }

    pub fn screen(&self) -> Screen {
        self.screen.borrow().clone()
    }

    /// Wait for every in-flight data load.
    pub async fn settle(&self) {
        loop {
            let batch: Vec<JoinHandle<()>> = self.pending.borrow_mut().drain(..).collect();
            if batch.is_empty() {
                return;
            }
            for handle in batch {
                if let Err(e) = handle.await {
                    tracing::warn!(error = %e, "Page load task failed");
                }
            }
        }
    }

    pub fn summary(&self) -> RouteSummary {
        let route = self.router.route();
        let location = self.router.history().location();
        RouteSummary {
            url: location.path_and_query(),
            pattern: route.as_ref().map(|r| r.pattern.clone()),
            page: route.as_ref().map(|r| r.handler.name),
            params: self.router.params(),
            query: self.router.query(),
            generation: self.router.generation(),
        }
    }
}

impl CatalogApp<MemoryHistory> {
    /// Apply one scripted step. History moves return `None`; their
    /// navigation happens in the pop-state listener.
    pub fn apply(&self, step: &Step) -> NavigationResult<Option<Navigation>> {
        match step {
            Step::Push(url) => self.router.push(url).map(Some),
            Step::Query(patch) => self.router.set_query(patch.iter().map(|(k, v)| (k, v))).map(Some),
            Step::Go(delta) => {
                // On success the pop-state listener recomputes the route.
                if !self.router.history().go(*delta) {
                    tracing::info!(delta, "History cannot move");
                }
                Ok(None)
            }
        }
    }
}

fn render<B: History + 'static>(
    router: &Rc<Router<Page, B>>,
    screen: &Shared<Screen>,
    pending: &Shared<Vec<JoinHandle<()>>>,
) {
    let generation = router.generation();
    let Some(page) = router.target() else {
        commit(screen, generation, NOT_FOUND.to_string());
        return;
    };

    commit(screen, generation, page.render(None));
    let load = page.load(router.params(), router.query());

    let weak = Rc::downgrade(router);
    let screen = Rc::clone(screen);
    let handle = tokio::task::spawn_local(async move {
        let result = load.await;
        let Some(router) = weak.upgrade() else {
            return;
        };
        if router.generation() != generation {
            tracing::debug!(page = page.name, generation, current = router.generation(), "Dropping stale page data");
            screen.borrow_mut().discarded += 1;
            return;
        }
        match result {
            Ok(data) => commit(&screen, generation, page.render(Some(&data))),
            Err(e) => {
                tracing::warn!(page = page.name, error = %e, "Page data failed to load");
                commit(&screen, generation, format!("[error] {e}"));
            }
        }
    });
    pending.borrow_mut().push(handle);
}

fn commit(screen: &Shared<Screen>, generation: u64, html: String) {
    let mut screen = screen.borrow_mut();
    screen.html = html;
    screen.generation = generation;
    screen.renders += 1;
}

/// One scripted navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Navigate to a path (`/products/3`).
    Push(String),
    /// Merge into the current query (`?page=2&sort=`); empty values remove keys.
    Query(Vec<(String, Option<String>)>),
    /// Move through history (`back`, `forward`, `go:-2`).
    Go(isize),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back" => return Ok(Step::Go(-1)),
            "forward" => return Ok(Step::Go(1)),
            _ => {}
        }
        if let Some(delta) = s.strip_prefix("go:") {
            return delta
                .parse()
                .map(Step::Go)
                .map_err(|_| format!("invalid history delta {delta:?}"));
        }
        if let Some(raw) = s.strip_prefix('?') {
            // Keys with empty values survive parsing so they can clear state.
            let patch = url::form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| {
                    let v = (!v.is_empty()).then(|| v.into_owned());
                    (k.into_owned(), v)
                })
                .collect();
            return Ok(Step::Query(patch));
        }
        if s.is_empty() {
            return Err("empty step".to_string());
        }
        Ok(Step::Push(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        assert_eq!("back".parse::<Step>().unwrap(), Step::Go(-1));
        assert_eq!("forward".parse::<Step>().unwrap(), Step::Go(1));
        assert_eq!("go:-2".parse::<Step>().unwrap(), Step::Go(-2));
        assert_eq!("/products/4".parse::<Step>().unwrap(), Step::Push("/products/4".into()));
        assert_eq!(
            "?page=2&sort=".parse::<Step>().unwrap(),
            Step::Query(vec![("page".into(), Some("2".into())), ("sort".into(), None)])
        );
        assert!("go:x".parse::<Step>().is_err());
        assert!("".parse::<Step>().is_err());
    }
}
