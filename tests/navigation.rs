//! End-to-end navigation behaviour of the router.

use std::cell::RefCell;
use std::rc::Rc;

use catalog_router::history::{History, MemoryHistory};
use catalog_router::routing::{BasePath, NavigationError, NavigationKind, Router};

mod common;
use common::{catalog_router, record_notifications, FlakyHistory, View};

#[test]
fn test_product_detail_scenario() {
    let router = catalog_router("", "/");
    router.start().unwrap();

    router.push("/products/42").unwrap();

    assert_eq!(router.params().get("id"), Some("42"));
    assert_eq!(router.target().as_deref(), Some(&View::Detail));
    assert_eq!(router.route().unwrap().pattern, "/products/:id");
}

#[test]
fn test_unknown_path_scenario() {
    let router = catalog_router("", "/");
    router.start().unwrap();

    let nav = router.push("/unknown/path").unwrap();

    assert_eq!(nav.matched, None);
    assert!(router.route().is_none());
    assert!(router.target().is_none());
    assert!(router.params().is_empty());
}

#[test]
fn test_subscribers_called_once_in_order_after_update() {
    let router = catalog_router("", "/");
    let log = Rc::new(RefCell::new(Vec::new()));
    record_notifications(&router, "first", &log);
    record_notifications(&router, "second", &log);

    router.push("/products/1").unwrap();

    let expected = Some("/products/:id".to_string());
    assert_eq!(
        *log.borrow(),
        vec![("first", expected.clone()), ("second", expected)]
    );
}

#[test]
fn test_duplicate_push_creates_single_entry_but_notifies_twice() {
    let router = catalog_router("", "/");
    let log = Rc::new(RefCell::new(Vec::new()));
    record_notifications(&router, "render", &log);

    let first = router.push("/products/9?tab=info").unwrap();
    let second = router.push("/products/9?tab=info").unwrap();

    assert!(first.entry_created);
    assert!(!second.entry_created);
    assert_eq!(router.history().entries(), vec!["/", "/products/9?tab=info"]);
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn test_back_and_forward_recompute_route() {
    let router = catalog_router("", "/");
    router.start().unwrap();
    router.push("/products/1").unwrap();
    router.push("/products/2").unwrap();

    assert!(router.history().back());
    assert_eq!(router.params().get("id"), Some("1"));

    assert!(router.history().go(-1));
    assert_eq!(router.target().as_deref(), Some(&View::Home));

    assert!(router.history().forward());
    assert_eq!(router.params().get("id"), Some("1"));
    assert_eq!(router.history().len(), 3);
}

#[test]
fn test_pop_state_ignored_before_start() {
    let router = catalog_router("", "/");
    router.push("/products/1").unwrap();
    let generation = router.generation();

    assert!(router.history().back());
    // No listener bound yet, so the route is stale.
    assert_eq!(router.generation(), generation);
    assert_eq!(router.params().get("id"), Some("1"));
}

#[test]
fn test_set_query_removes_null_keeps_others() {
    let router = catalog_router("", "/?page=3&limit=20");
    router.start().unwrap();

    let nav = router.set_query([("page", None::<&str>)]).unwrap();

    assert_eq!(nav.url, "/?limit=20");
    assert_eq!(router.query().get("page"), None);
    assert_eq!(router.query().get("limit"), Some("20"));
}

#[test]
fn test_get_url_empty_patch_is_current_url() {
    let router = catalog_router("", "/products/5?sort=price_asc&limit=10");
    let patch: [(&str, &str); 0] = [];
    assert_eq!(router.get_url(patch), "/products/5?sort=price_asc&limit=10");
}

#[test]
fn test_base_path_applied_exactly_once() {
    let router = catalog_router("/shop", "/");
    router.start().unwrap();
    assert_eq!(router.target().as_deref(), Some(&View::Home));

    let a = router.push("/products/3").unwrap();
    let b = router.push("/shop/products/3").unwrap();

    assert_eq!(a.url, "/shop/products/3");
    assert_eq!(b.url, "/shop/products/3");
    assert!(!b.entry_created);
    assert_eq!(router.app_path(None), "/products/3");
    assert_eq!(router.base_url(), "/shop");

    router.set_query([("tab", "reviews")]).unwrap();
    assert_eq!(
        router.history().location().path_and_query(),
        "/shop/products/3?tab=reviews"
    );
}

#[test]
fn test_path_outside_base_does_not_match() {
    let router = catalog_router("/shop", "/");
    let found = router.find_route(Some("/products/3")).unwrap();
    assert!(found.is_none());
}

#[test]
fn test_history_failure_keeps_previous_route_and_skips_notify() {
    let router = Rc::new(Router::new(FlakyHistory::new("/"), BasePath::default()));
    router.add_route("/", View::Home).unwrap();
    router.add_route("/products/:id", View::Detail).unwrap();

    let log = Rc::new(RefCell::new(Vec::new()));
    record_notifications(&router, "render", &log);
    router.start().unwrap();

    router.history().reject_pushes(true);
    let err = router.push("/products/8").unwrap_err();

    assert!(matches!(err, NavigationError::History(_)));
    assert_eq!(router.target().as_deref(), Some(&View::Home));
    assert_eq!(router.history().inner().len(), 1);
    assert_eq!(log.borrow().len(), 1);

    router.history().reject_pushes(false);
    let nav = router.push("/products/8").unwrap();
    assert_eq!(nav.kind, NavigationKind::Push);
    assert_eq!(router.params().get("id"), Some("8"));
}

#[test]
fn test_failing_subscriber_does_not_block_others() {
    let router = catalog_router("", "/");
    router.subscribe(|| Err("template missing".into()));
    let log = Rc::new(RefCell::new(Vec::new()));
    record_notifications(&router, "after", &log);

    let nav = router.push("/products/2").unwrap();

    assert_eq!(nav.notified.failed, 1);
    assert_eq!(nav.notified.delivered, 1);
    assert_eq!(log.borrow().len(), 1);
}

#[test]
fn test_independent_router_instances() {
    let a = catalog_router("", "/");
    let b = catalog_router("", "/products/1");
    a.start().unwrap();
    b.start().unwrap();

    a.push("/products/77").unwrap();
    assert_eq!(a.params().get("id"), Some("77"));
    assert_eq!(b.params().get("id"), Some("1"));
}

#[test]
fn test_router_without_routes_matches_nothing() {
    let history = MemoryHistory::new("http://localhost", "/").unwrap();
    let router: Rc<Router<View, _>> = Rc::new(Router::new(history, BasePath::default()));
    let nav = router.start().unwrap();
    assert!(nav.matched.is_none());
    assert!(router.patterns().is_empty());
}
