//! Integration tests for the request header conditionlet

mod common;

use common::TestEngine;
use conditionlet_sdk::REQUEST_HEADER_ID;

const HEADER: &str = REQUEST_HEADER_ID;

#[test]
fn test_header_comparisons() {
    let t = TestEngine::new();
    let ctx = t
        .engine
        .request_context()
        .with_header("Accept-Language", "de-DE,de;q=0.9")
        .with_header("User-Agent", "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)");

    assert!(t.eval_values(HEADER, &ctx, "exists", &["accept-language"]));
    assert!(!t.eval_values(HEADER, &ctx, "exists", &["Referer"]));
    assert!(t.eval_values(HEADER, &ctx, "startsWith", &["Accept-Language", "de-"]));
    assert!(t.eval_values(HEADER, &ctx, "contains", &["User-Agent", "iPhone"]));
    assert!(t.eval_values(HEADER, &ctx, "regex", &["User-Agent", r"OS \d+_\d+"]));
    assert!(t.eval_values(HEADER, &ctx, "isNot", &["Accept-Language", "en-US"]));
    assert!(!t.eval_values(HEADER, &ctx, "isNot", &["Referer", "en-US"]));
    assert!(!t.eval_values(HEADER, &ctx, "netmask", &["User-Agent", "10.0.0.0/8"]));
}

#[test]
fn test_inputs_depend_on_comparison() {
    let t = TestEngine::new();
    assert_eq!(t.engine.inputs(HEADER, "exists").unwrap().len(), 1);
    assert_eq!(t.engine.inputs(HEADER, "is").unwrap().len(), 2);
}

#[test]
fn test_does_not_need_client_address() {
    let t = TestEngine::new();
    let ctx = t.engine.request_context().with_header("X-Tenant", "acme");

    assert!(t.eval_values(HEADER, &ctx, "is", &["X-Tenant", "ACME"]));
    assert!(t.diagnostics.is_empty());
}
