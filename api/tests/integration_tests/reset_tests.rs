//! Integration tests for resetting the receiver between scenarios.

use axum::http::StatusCode;
use shared::models::log::log_request_with_body;
use shared::models::metric::metric_request_with_gauge;
use shared::models::trace::trace_request_with_span;
use shared::otlp::SignalKind;

use super::common::{post_record, test_app};

#[tokio::test]
async fn test_reset_all_isolates_scenarios() {
    let (app, state) = test_app();

    // Scenario one
    post_record(app.clone(), trace_request_with_span("one")).await;
    post_record(app.clone(), metric_request_with_gauge("one", 1.0)).await;
    post_record(app.clone(), log_request_with_body("one")).await;
    for kind in SignalKind::ALL {
        assert_eq!(state.len(kind).unwrap(), 1);
    }

    state.reset_all().unwrap();

    for kind in SignalKind::ALL {
        assert_eq!(state.len(kind).unwrap(), 0);
    }
    assert!(state.traces().snapshot().unwrap().is_empty());
    assert!(state.metrics().snapshot().unwrap().is_empty());
    assert!(state.logs().snapshot().unwrap().is_empty());

    // Scenario two only sees its own exports
    let (status, _) = post_record(app, log_request_with_body("two")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        state.logs().snapshot().unwrap(),
        vec![log_request_with_body("two")]
    );
    assert_eq!(state.traces().len().unwrap(), 0);
}

#[tokio::test]
async fn test_reset_on_empty_state() {
    let (_app, state) = test_app();

    state.reset_all().unwrap();
    state.reset_all().unwrap();

    assert_eq!(state.logs().len().unwrap(), 0);
}

#[tokio::test]
async fn test_parallel_apps_are_independent() {
    let (first_app, first) = test_app();
    let (_second_app, second) = test_app();

    post_record(first_app, log_request_with_body("only first")).await;
    second.reset_all().unwrap();

    assert_eq!(first.logs().len().unwrap(), 1);
    assert_eq!(second.logs().len().unwrap(), 0);
}
