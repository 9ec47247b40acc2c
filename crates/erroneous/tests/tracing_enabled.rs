//! Subscriber setup with `RUST_LOG` present.
//!
//! Each integration test file runs as its own process, so the global
//! subscriber installed here cannot leak into other tests.

use erroneous::{err, init_tracing, msg, new};
use pretty_assertions::assert_eq;

#[test]
fn init_tracing_installs_once_and_stays_active() {
    std::env::set_var("RUST_LOG", "erroneous=trace");

    assert!(init_tracing());
    assert!(init_tracing());

    // Events from construction go through the installed subscriber.
    let inner = new([msg("disk full", None)]);
    let outer = new([err(inner.clone()), msg("ignored", None)]);
    assert_eq!(outer.message(), "disk full");
}
