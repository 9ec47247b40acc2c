//! Structured errors with context.
//!
//! An [`Erroneous`] carries:
//! - A human message (what went wrong)
//! - An optional cause (the error underneath)
//! - Structured fields (the values involved)
//! - The call site it was raised from (where it went wrong)
//!
//! # Construction
//!
//! Records are built from an ordered list of configuration units
//! ([`ErrOpt`]). Units apply left to right; a later unit writing the same slot
//! wins. Missing locations are captured automatically from the caller.
//!
//! ```text
//! use erroneous::{erroneous, err, msg, ErrFields};
//!
//! let error = erroneous![
//!     msg("loading config", Some(ErrFields::new().with("path", "/etc/app.toml"))),
//!     err(io_error),
//! ];
//!
//! // loading config: permission denied [src/config.rs:42]  {"path":"/etc/app.toml"}
//! println!("{error}");
//! ```
//!
//! Passing an existing [`Erroneous`] through [`err`] returns it unchanged
//! instead of wrapping it again, so records can be re-raised freely through
//! several layers.

mod construct;
mod convert;
mod fields;
#[macro_use]
mod macros;
mod opts;
mod record;
mod render;

use std::sync::{Arc, OnceLock};

pub use construct::{new, Constructor, DEFAULT_DEPTH};
pub use convert::ResultExt;
pub use erroneous_callsite::{CallSite, SourceLocation, StackWalker};
pub use fields::{ErrFields, FieldValue, FieldsError, ERROR_KEY};
pub use opts::{depth, err, err_boxed, err_shared, fields, msg, source, Builder, ErrOpt};
pub use record::Erroneous;
pub use render::{ErrorText, UNKNOWN_ERROR};

/// A shared, thread-safe error value used as a record's cause.
pub type Cause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Install a `tracing` subscriber for the events this crate emits.
///
/// Reads the filter from `RUST_LOG` (for example `RUST_LOG=erroneous=trace`
/// to see every unit applied). Does nothing when the variable is unset or
/// invalid, or when the host already installed a global subscriber.
///
/// Returns whether the subscriber installed here is active. Only the first
/// call does any work; later calls report the same answer.
pub fn init_tracing() -> bool {
    static ACTIVE: OnceLock<bool> = OnceLock::new();

    *ACTIVE.get_or_init(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return false;
        };
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(filter)
            .try_init()
            .is_ok()
    })
}
