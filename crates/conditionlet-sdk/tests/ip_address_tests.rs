//! Integration tests for the client IP address conditionlet
//!
//! Exercises each comparison end-to-end through the engine facade.

mod common;

use common::TestEngine;
use conditionlet_sdk::{ConditionletInputValue, EngineConfig, USERS_IP_ADDRESS_ID};

const IP: &str = USERS_IP_ADDRESS_ID;

// ============================================================================
// Schema
// ============================================================================

#[test]
fn test_comparisons_and_inputs_are_stable() {
    let t = TestEngine::new();

    let first = t.engine.comparisons(IP).unwrap();
    let second = t.engine.comparisons(IP).unwrap();
    assert_eq!(first, second);
    let labels: Vec<_> = first.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Is",
            "Is Not",
            "Starts With",
            "Matches Netmask",
            "Matches Regular Expression"
        ]
    );

    assert_eq!(t.engine.inputs(IP, "is").unwrap(), t.engine.inputs(IP, "is").unwrap());
    assert_eq!(t.engine.inputs(IP, "regex").unwrap()[0].id, "ip-address");
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_is_and_is_not() {
    let t = TestEngine::new();
    let ctx = t.request_from("192.0.2.10");

    assert!(t.eval(IP, &ctx, "is", "192.0.2.10"));
    assert!(!t.eval(IP, &ctx, "isNot", "192.0.2.10"));
    assert!(!t.eval(IP, &ctx, "is", "192.0.2.11"));
    assert!(t.eval(IP, &ctx, "isNot", "192.0.2.11"));
}

#[test]
fn test_is_matches_any_form_of_the_same_address() {
    let t = TestEngine::new();
    let expanded = "2001:db8:0:0:0:0:0:1";
    let ctx = t.engine.request_context().with_header("X-Forwarded-For", expanded);

    assert!(t.eval(IP, &ctx, "is", expanded));
    assert!(!t.eval(IP, &ctx, "isNot", expanded));
    assert!(t.eval(IP, &ctx, "is", "2001:db8::1"));

    let ctx = t.engine.request_context().with_header("X-Forwarded-For", "::ffff:192.0.2.10");
    assert!(t.eval(IP, &ctx, "is", "192.0.2.10"));
    assert!(t.eval(IP, &ctx, "is", "::ffff:192.0.2.10"));
    assert!(!t.eval(IP, &ctx, "isNot", "::ffff:192.0.2.10"));
    assert!(t.diagnostics.is_empty());
}

#[test]
fn test_starts_with() {
    let t = TestEngine::new();
    let ctx = t.request_from("192.168.1.10");

    assert!(t.eval(IP, &ctx, "startsWith", "192.168."));
    assert!(!t.eval(IP, &ctx, "startsWith", "10.0."));
}

#[test]
fn test_netmask() {
    let t = TestEngine::new();
    let ctx = t.request_from("10.1.2.3");

    assert!(t.eval(IP, &ctx, "netmask", "10.1.0.0/16"));
    assert!(!t.eval(IP, &ctx, "netmask", "10.2.0.0/16"));
    assert!(t.diagnostics.is_empty());

    assert!(!t.eval(IP, &ctx, "netmask", "not-a-cidr"));
    assert_eq!(t.diagnostics.len(), 1);
}

#[test]
fn test_netmask_ipv6_policy() {
    let t = TestEngine::new();
    let ctx = t.request_from("2001:db8::42");
    assert!(t.eval(IP, &ctx, "netmask", "2001:db8::/32"));

    let strict = TestEngine::with_config(EngineConfig::new().allow_ipv6_netmask(false));
    let ctx = strict.request_from("2001:db8::42");
    assert!(!strict.eval(IP, &ctx, "netmask", "2001:db8::/32"));
    assert_eq!(strict.diagnostics.len(), 1);
    assert!(strict.diagnostics.entries()[0]
        .error
        .as_deref()
        .unwrap_or_default()
        .contains("IPv6"));
}

#[test]
fn test_regex() {
    let t = TestEngine::new();
    let ctx = t.request_from("172.16.5.9");

    assert!(t.eval(IP, &ctx, "regex", r"^172\."));
    assert!(!t.eval(IP, &ctx, "regex", r"^10\."));
    assert!(!t.eval(IP, &ctx, "regex", "["));
    assert_eq!(t.diagnostics.len(), 1);
}

#[test]
fn test_oversized_pattern_fails_closed() {
    let mut config = EngineConfig::new();
    config.regex.max_pattern_len = 16;
    let t = TestEngine::with_config(config);
    let ctx = t.request_from("172.16.5.9");

    assert!(t.eval(IP, &ctx, "regex", "172"));
    assert!(!t.eval(IP, &ctx, "regex", &"(172|10)".repeat(4)));
    assert_eq!(t.diagnostics.len(), 1);
}

// ============================================================================
// Fail-closed behaviour
// ============================================================================

#[test]
fn test_validation_gate_blocks_every_comparison() {
    let t = TestEngine::new();
    let ctx = t.request_from("10.0.0.1");

    for comparison in ["is", "isNot", "startsWith", "netmask", "regex"] {
        assert!(!t.eval(IP, &ctx, comparison, ""), "{}", comparison);
    }
}

#[test]
fn test_unresolvable_context() {
    let t = TestEngine::new();
    let ctx = t.engine.request_context();

    for comparison in ["is", "isNot", "startsWith", "netmask", "regex"] {
        assert!(!t.eval(IP, &ctx, comparison, "10.0.0.1"), "{}", comparison);
    }
    assert_eq!(t.diagnostics.len(), 5);
}

#[test]
fn test_blank_comparison_and_empty_values() {
    let t = TestEngine::new();
    let ctx = t.request_from("10.0.0.1");

    assert!(!t.eval(IP, &ctx, "", "10.0.0.1"));
    assert!(!t.eval_values(IP, &ctx, "is", &[]));
    assert!(!t.eval(IP, &ctx, "Is", "10.0.0.1"));
}

#[test]
fn test_first_value_decides() {
    let t = TestEngine::new();
    let ctx = t.request_from("10.0.0.1");

    assert!(t.eval_values(IP, &ctx, "is", &["10.0.0.1", "10.0.0.9"]));
    assert!(!t.eval_values(IP, &ctx, "is", &["10.0.0.9", "10.0.0.1"]));
}

#[test]
fn test_forwarding_headers_from_config() {
    let t = TestEngine::with_config(EngineConfig::new().with_ip_headers(["CF-Connecting-IP"]));
    let ctx = t
        .request_from("10.0.0.1")
        .with_header("X-Forwarded-For", "198.51.100.1")
        .with_header("CF-Connecting-IP", "198.51.100.2");

    assert!(t.eval(IP, &ctx, "is", "198.51.100.2"));
    assert!(!t.eval(IP, &ctx, "is", "198.51.100.1"));
}

// ============================================================================
// Validation for authoring surfaces
// ============================================================================

#[test]
fn test_validate_through_engine() {
    let t = TestEngine::new();

    let ok = t
        .engine
        .validate(IP, "netmask", &[ConditionletInputValue::new("ip-address", "10.0.0.0/8")])
        .unwrap();
    assert!(!ok.has_errors());

    let bad = t
        .engine
        .validate(
            IP,
            "netmask",
            &[
                ConditionletInputValue::new("ip-address", ""),
                ConditionletInputValue::new("hostname", "example.com"),
            ],
        )
        .unwrap();
    assert!(bad.has_errors());
    assert_eq!(bad.errors().count(), 2);

    let json = serde_json::to_value(&bad).unwrap();
    assert_eq!(json["hasErrors"], true);
    assert_eq!(t.engine.metrics().unwrap().validations, 2);
}
