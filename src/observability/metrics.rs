//! Router metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): by `kind` (start, push, pop) and
//!   `outcome` (matched, unmatched, error)
//! - `router_history_entries_total` (counter): entries pushed
//! - `router_subscriber_failures_total` (counter): subscriber errors

pub fn record_navigation(kind: &'static str, outcome: &'static str) {
    ::metrics::counter!("router_navigations_total", "kind" => kind, "outcome" => outcome).increment(1);
}

pub fn record_history_entry() {
    ::metrics::counter!("router_history_entries_total").increment(1);
}

pub fn record_subscriber_failure() {
    ::metrics::counter!("router_subscriber_failures_total").increment(1);
}
