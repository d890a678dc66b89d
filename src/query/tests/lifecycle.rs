//! Lifecycle tests driving a query against the scriptable dummy context.

use probe_backend_empty::{Call, DummyContext};
use probe_query::{CreationError, Kind, OutOfMemory, Query, RawValue};

fn count<F: Fn(&Call) -> bool>(calls: &[Call], pred: F) -> usize {
    calls.iter().filter(|call| pred(call)).count()
}

#[test]
fn double_begin_issues_a_single_context_call() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::SamplesPassed).unwrap();

    query.begin();
    query.begin();

    let calls = context.calls();
    assert_eq!(
        count(&calls, |c| matches!(c, Call::BeginMeasurement(..))),
        1
    );
    assert_eq!(count(&calls, |c| matches!(c, Call::CreateQuery(..))), 1);
    assert!(!query.is_active());
}

#[test]
fn double_end_does_not_close_the_scope_twice() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();

    query.begin();
    query.end();
    query.end();

    let calls = context.calls();
    assert_eq!(count(&calls, |c| matches!(c, Call::EndMeasurement(..))), 1);
    assert!(query.is_active());
}

#[test]
fn end_without_begin_is_ignored() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();

    query.end();

    assert!(!query.is_active());
    assert_eq!(
        count(&context.calls(), |c| matches!(c, Call::EndMeasurement(..))),
        0
    );
}

#[test]
fn ready_is_false_while_no_measurement_is_pending() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::AnySamplesPassed).unwrap();

    // Before any begin, and while the scope is still open.
    assert!(!query.ready());
    query.begin();
    assert!(!query.ready());

    // Neither call may touch the context.
    assert_eq!(
        count(&context.calls(), |c| matches!(c, Call::ResultAvailable(_))),
        0
    );
}

#[test]
fn poll_cadence_matches_availability() {
    let context = DummyContext::new();
    context.make_available_after(3);
    context.complete_with(RawValue::Number(42));

    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();
    query.begin();
    query.end();

    assert!(!query.ready());
    assert!(!query.ready());
    assert!(!query.ready());
    assert!(query.ready());
    assert_eq!(query.result(), Some(42));
}

#[test]
fn successful_poll_resolves_exactly_once() {
    let context = DummyContext::new();
    context.complete_with(RawValue::Number(7));

    let mut query = Query::new(&context, Kind::SamplesPassed).unwrap();
    query.begin();
    query.end();
    assert!(query.is_active());

    assert!(query.ready());
    assert!(!query.is_active());
    assert_eq!(query.result(), Some(7));

    // Resolved, not resumable: further polls report false and do not
    // re-read the value.
    assert!(!query.ready());
    assert_eq!(
        count(&context.calls(), |c| matches!(c, Call::ReadResult(_))),
        1
    );
}

#[test]
fn boolean_results_are_normalized_to_numbers() {
    let context = DummyContext::new();
    context.complete_with(RawValue::Boolean(true));

    let mut query = Query::new(&context, Kind::AnySamplesPassed).unwrap();
    query.begin();
    query.end();

    assert!(query.ready());
    assert_eq!(query.result(), Some(1));
}

#[test]
fn begin_clears_a_stale_result() {
    let context = DummyContext::new();
    context.complete_with(RawValue::Number(99));

    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();
    query.begin();
    query.end();
    assert!(query.ready());
    assert_eq!(query.result(), Some(99));

    query.begin();
    assert_eq!(query.result(), None);
}

#[test]
fn one_handle_serves_many_cycles() {
    let context = DummyContext::new();
    context.complete_with(RawValue::Number(1));

    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();
    query.begin();
    query.end();
    assert!(query.ready());

    context.complete_with(RawValue::Number(2));
    query.begin();
    query.end();
    assert!(query.ready());
    assert_eq!(query.result(), Some(2));

    // The second cycle reused the handle from the first.
    assert_eq!(
        count(&context.calls(), |c| matches!(c, Call::CreateQuery(..))),
        1
    );
}

#[test]
fn release_is_idempotent() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::SamplesPassed).unwrap();

    query.release();
    query.release();

    assert!(query.is_released());
    assert!(context.live_queries().is_empty());
    assert_eq!(
        count(&context.calls(), |c| matches!(c, Call::DestroyQuery(_))),
        1
    );
}

#[test]
fn release_mid_measurement_frees_the_handle() {
    let context = DummyContext::new();
    let mut query = Query::new(&context, Kind::TimeElapsed).unwrap();

    query.begin();
    query.release();

    assert!(query.is_released());
    assert!(context.live_queries().is_empty());

    // Post-release use stays quiet and never reaches the context.
    let before = context.calls().len();
    query.begin();
    query.end();
    assert!(!query.ready());
    assert_eq!(context.calls().len(), before);
}

#[test]
fn allocation_failure_propagates() {
    let context = DummyContext::new();
    context.fail_next_allocation();

    let err = Query::new(&context, Kind::SamplesPassed).unwrap_err();
    assert_eq!(err, CreationError::OutOfMemory(OutOfMemory::Device));
    assert!(context.live_queries().is_empty());
}

#[test]
fn queries_report_their_fixed_kind() {
    let context = DummyContext::new();
    let query = Query::new(&context, Kind::PrimitivesGenerated).unwrap();
    assert_eq!(query.kind(), Kind::PrimitivesGenerated);
    assert_eq!(
        context.calls(),
        vec![Call::CreateQuery(Kind::PrimitivesGenerated)]
    );
}
