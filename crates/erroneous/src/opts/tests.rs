use super::*;
use crate::{DEFAULT_DEPTH, ERROR_KEY};
use pretty_assertions::assert_eq;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
#[error("timed out")]
struct TimedOut;

fn builder() -> Builder {
    Builder::new(DEFAULT_DEPTH)
}

fn record(text: &str) -> Erroneous {
    let mut b = builder();
    assert!(msg(text, None).apply(&mut b).is_continue());
    b.finish()
}

#[test]
fn test_msg_sets_message() {
    let mut b = builder();
    assert!(msg("failed", None).apply(&mut b).is_continue());

    assert_eq!(b.message(), "failed");
    assert!(b.fields().is_none());
    assert!(b.cause().is_none());
}

#[test]
fn test_msg_without_fields_keeps_existing_fields() {
    let mut b = builder();
    let _ = fields(ErrFields::new().with("k", "v")).apply(&mut b);
    let _ = msg("failed", None).apply(&mut b);

    assert_eq!(b.fields().unwrap().len(), 1);
}

#[test]
fn test_msg_promotes_error_field() {
    let mut b = builder();
    let fields = ErrFields::new()
        .with("attempt", 2)
        .with_error(ERROR_KEY, TimedOut);

    assert!(msg("fetch", Some(fields)).apply(&mut b).is_continue());

    assert_eq!(b.cause().unwrap().to_string(), "timed out");
    // The field stays in place alongside the promoted cause.
    assert!(b.fields().unwrap().error().is_some());
    assert_eq!(
        b.fields().unwrap().get("attempt").unwrap().as_value(),
        Some(&json!(2))
    );
}

#[test]
fn test_msg_ignores_data_under_error_key() {
    let mut b = builder();
    let fields = ErrFields::new().with(ERROR_KEY, "not an error");

    assert!(msg("fetch", Some(fields)).apply(&mut b).is_continue());
    assert!(b.cause().is_none());
}

#[test]
fn test_msg_error_field_short_circuits_on_record() {
    let inner = record("inner");
    let mut b = builder();
    let fields = ErrFields::new().with_error(ERROR_KEY, inner.clone());

    match msg("outer", Some(fields)).apply(&mut b) {
        ControlFlow::Break(result) => assert!(Erroneous::ptr_eq(&result, &inner)),
        ControlFlow::Continue(()) => panic!("expected short-circuit"),
    }
}

#[test]
fn test_fields_does_not_promote_error() {
    let mut b = builder();
    let fields = ErrFields::new().with_error(ERROR_KEY, TimedOut);

    assert!(super::fields(fields).apply(&mut b).is_continue());
    assert!(b.cause().is_none());
    assert!(b.fields().unwrap().error().is_some());
}

#[test]
fn test_fields_variant_can_clear() {
    let mut b = builder();
    let _ = fields(ErrFields::new()).apply(&mut b);
    let _ = ErrOpt::Fields(None).apply(&mut b);

    assert!(b.fields().is_none());
}

#[test]
fn test_err_stores_plain_cause() {
    let mut b = builder();
    assert!(err(TimedOut).apply(&mut b).is_continue());

    assert!(b.cause().unwrap().downcast_ref::<TimedOut>().is_some());
}

#[test]
fn test_err_short_circuits_on_record() {
    let inner = record("inner");
    let mut b = builder();

    match err(inner.clone()).apply(&mut b) {
        ControlFlow::Break(result) => assert!(Erroneous::ptr_eq(&result, &inner)),
        ControlFlow::Continue(()) => panic!("expected short-circuit"),
    }
    assert!(b.cause().is_none());
}

#[test]
fn test_err_shared_and_boxed_recognize_records() {
    let inner = record("inner");

    let shared: Cause = Arc::new(inner.clone());
    assert!(err_shared(shared).apply(&mut builder()).is_break());

    let boxed: Box<dyn Error + Send + Sync> = Box::new(inner);
    assert!(err_boxed(boxed).apply(&mut builder()).is_break());
}

#[test]
fn test_err_boxed_plain_cause() {
    let mut b = builder();
    let boxed: Box<dyn Error + Send + Sync> = "plain message".into();

    assert!(err_boxed(boxed).apply(&mut b).is_continue());
    assert_eq!(b.cause().unwrap().to_string(), "plain message");
}

#[test]
fn test_later_err_overwrites_promoted_cause() {
    let mut b = builder();
    let fields = ErrFields::new().with_error(ERROR_KEY, TimedOut);
    let later: Box<dyn Error + Send + Sync> = "later".into();

    let _ = msg("m", Some(fields)).apply(&mut b);
    let _ = err_boxed(later).apply(&mut b);

    assert_eq!(b.cause().unwrap().to_string(), "later");
}

#[test]
fn test_source_and_depth() {
    let mut b = builder();
    assert!(!b.has_location());
    assert_eq!(b.depth(), DEFAULT_DEPTH);

    let _ = source("f.rs", 10).apply(&mut b);
    let _ = depth(5).apply(&mut b);

    assert!(b.has_location());
    assert_eq!(b.depth(), 5);
    assert_eq!(b.finish().location(), ("f.rs", 10));
}

#[test]
fn test_empty_source_file_is_not_a_location() {
    let mut b = builder();
    let _ = source("", 10).apply(&mut b);

    assert!(!b.has_location());
}
