//! Route table and lookup.
//!
//! # Responsibilities
//! - Store compiled routes in registration order
//! - Look up the first route matching a pathname
//! - Return the match or an explicit `None`
//!
//! # Design Decisions
//! - First registration of a pattern wins; re-registering is a no-op
//! - O(n) scan in insertion order (route counts are small)
//! - Handlers are opaque and shared out as `Rc<H>`

use std::fmt;
use std::rc::Rc;

use crate::routing::base::BasePath;
use crate::routing::error::PatternError;
use crate::routing::pattern::{Params, RoutePattern};

/// Snapshot of a matched route.
pub struct RouteMatch<H> {
    /// Pattern as registered, e.g. `/products/:id`.
    pub pattern: String,
    pub params: Params,
    pub handler: Rc<H>,
}

impl<H> Clone for RouteMatch<H> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            params: self.params.clone(),
            handler: Rc::clone(&self.handler),
        }
    }
}

impl<H> fmt::Debug for RouteMatch<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

struct CompiledRoute<H> {
    pattern: RoutePattern,
    handler: Rc<H>,
}

/// Ordered mapping from pattern to compiled matcher and handler.
pub struct RouteTable<H> {
    base: BasePath,
    routes: Vec<CompiledRoute<H>>,
}

impl<H> RouteTable<H> {
    pub fn new(base: BasePath) -> Self {
        Self {
            base,
            routes: Vec::new(),
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.routes.iter().any(|r| r.pattern.as_str() == pattern)
    }

    /// Register `pattern`. Returns `Ok(false)` when it was already present.
    pub fn insert(&mut self, pattern: &str, handler: H) -> Result<bool, PatternError> {
        if self.contains(pattern) {
            tracing::debug!(pattern = %pattern, "Route already registered, keeping first handler");
            return Ok(false);
        }

        let compiled = RoutePattern::compile(pattern, &self.base)?;
        self.routes.push(CompiledRoute {
            pattern: compiled,
            handler: Rc::new(handler),
        });
        tracing::debug!(pattern = %pattern, total = self.routes.len(), "Route registered");
        Ok(true)
    }

    /// First route whose matcher accepts the full `pathname`.
    pub fn lookup(&self, pathname: &str) -> Option<RouteMatch<H>> {
        self.routes.iter().find_map(|route| {
            route.pattern.matches(pathname).map(|params| RouteMatch {
                pattern: route.pattern.as_str().to_string(),
                params,
                handler: Rc::clone(&route.handler),
            })
        })
    }

    /// Registered patterns in order.
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.routes.iter().map(|r| r.pattern.as_str())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
