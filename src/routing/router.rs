//! Route table lookup.
//!
//! # Responsibilities
//! - Store the fixed `(method, path)` → handler mapping
//! - Look up the handler for a request
//! - Hand back the designated fallback when nothing matches
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Exact matches only: no prefixes, no path parameters, no case folding
//! - O(1) lookup via nested HashMaps keyed by method, then path

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::Method;

use crate::handlers::Handler;

/// Outcome of a route lookup.
#[derive(Debug, Clone, Copy)]
pub enum RouteMatch<'a> {
    /// An exact `(method, path)` entry exists.
    Matched(&'a dyn Handler),
    /// No entry; the fallback handler applies.
    Fallback(&'a dyn Handler),
}

impl<'a> RouteMatch<'a> {
    pub fn handler(&self) -> &'a dyn Handler {
        match *self {
            RouteMatch::Matched(h) | RouteMatch::Fallback(h) => h,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RouteMatch::Fallback(_))
    }
}

/// Fixed mapping from `(method, path)` to handlers, with one default entry.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<Method, HashMap<String, Arc<dyn Handler>>>,
    fallback: Arc<dyn Handler>,
}

impl RouteTable {
    /// Empty table; every lookup resolves to `fallback`.
    pub fn new(fallback: Arc<dyn Handler>) -> Self {
        Self {
            routes: HashMap::new(),
            fallback,
        }
    }

    /// Register a route. A later registration of the same pair replaces the
    /// earlier one.
    pub fn route(mut self, method: Method, path: impl Into<String>, handler: Arc<dyn Handler>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path.into(), handler);
        self
    }

    pub fn lookup(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        match self.routes.get(method).and_then(|paths| paths.get(path)) {
            Some(handler) => RouteMatch::Matched(handler.as_ref()),
            None => RouteMatch::Fallback(self.fallback.as_ref()),
        }
    }

    pub fn contains(&self, method: &Method, path: &str) -> bool {
        !self.lookup(method, path).is_fallback()
    }

    /// Number of registered routes, excluding the fallback.
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registered `(method, path)` pairs, sorted for stable output.
    pub fn entries(&self) -> Vec<(Method, String)> {
        let mut entries: Vec<_> = self
            .routes
            .iter()
            .flat_map(|(method, paths)| paths.keys().map(move |p| (method.clone(), p.clone())))
            .collect();
        entries.sort_by(|a, b| (a.1.as_str(), a.0.as_str()).cmp(&(b.1.as_str(), b.0.as_str())));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::InboundRequest;
    use serde_json::{json, Value};

    #[derive(Debug)]
    struct Named(&'static str);

    impl Handler for Named {
        fn handle(&self, _request: &InboundRequest) -> Value {
            json!(self.0)
        }
    }

    fn name_of(m: RouteMatch<'_>) -> Value {
        m.handler().handle(&InboundRequest::new(Method::GET, "/", Value::Null))
    }

    fn table() -> RouteTable {
        RouteTable::new(Arc::new(Named("fallback")))
            .route(Method::GET, "/status", Arc::new(Named("status")))
            .route(Method::POST, "/test", Arc::new(Named("test")))
    }

    #[test]
    fn test_exact_match() {
        let table = table();
        assert_eq!(name_of(table.lookup(&Method::GET, "/status")), json!("status"));
        assert_eq!(name_of(table.lookup(&Method::POST, "/test")), json!("test"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_wrong_method_falls_back() {
        let table = table();
        let m = table.lookup(&Method::POST, "/status");
        assert!(m.is_fallback());
        assert_eq!(name_of(m), json!("fallback"));
        assert!(!table.contains(&Method::GET, "/test"));
    }

    #[test]
    fn test_no_prefix_or_case_folding() {
        let table = table();
        for path in ["/status/", "/status/extra", "/STATUS", "/stat", ""] {
            assert!(table.lookup(&Method::GET, path).is_fallback(), "{path} should not match");
        }
    }

    #[test]
    fn test_entries_sorted() {
        assert_eq!(
            table().entries(),
            vec![(Method::GET, "/status".to_string()), (Method::POST, "/test".to_string())]
        );
    }
}
