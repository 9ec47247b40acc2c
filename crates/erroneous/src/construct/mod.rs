//! Record construction.
//!
//! [`Constructor::build`] runs configuration units in order, stops at the
//! first short-circuit, and otherwise fills in the call site through its
//! [`CallSite`] resolver before sealing the record. [`new`] is the usual
//! entry point and resolves against the live stack.

use std::ops::ControlFlow;

use erroneous_callsite::{CallSite, StackWalker, ANCHOR_DEPTH};

use crate::opts::{Builder, ErrOpt};
use crate::Erroneous;

/// Capture depth used unless a unit overrides it: the constructor's caller.
pub const DEFAULT_DEPTH: usize = ANCHOR_DEPTH;

/// Builds records, resolving missing locations through `S`.
#[derive(Clone, Debug)]
pub struct Constructor<S> {
    call_site: S,
    default_depth: usize,
}

impl Constructor<StackWalker> {
    /// A constructor resolving against the stack of its caller.
    #[track_caller]
    pub fn here() -> Self {
        Constructor::new(StackWalker::here())
    }
}

impl<S: CallSite> Constructor<S> {
    /// Create a constructor with an explicit resolver.
    pub fn new(call_site: S) -> Self {
        Constructor {
            call_site,
            default_depth: DEFAULT_DEPTH,
        }
    }

    /// Override the capture depth builders start with.
    #[must_use]
    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    /// Apply `opts` in order and return the finished record.
    ///
    /// If a unit short-circuits, its record is returned and neither the
    /// remaining units nor location capture run.
    pub fn build<I>(&self, opts: I) -> Erroneous
    where
        I: IntoIterator<Item = ErrOpt>,
    {
        let mut builder = Builder::new(self.default_depth);

        for opt in opts {
            tracing::trace!(?opt, "applying error option");
            if let ControlFlow::Break(existing) = opt.apply(&mut builder) {
                return existing;
            }
        }

        if !builder.has_location() {
            let depth = builder.depth();
            match self.call_site.resolve(depth) {
                Some(location) => builder.set_location(location),
                None => tracing::debug!(depth, "call site unavailable, record has no location"),
            }
        }

        builder.finish()
    }
}

/// Build a record from `opts`, attributing it to the caller.
///
/// ```text
/// let error = new([msg("loading config", None), err(io_error)]);
/// ```
#[track_caller]
pub fn new<I>(opts: I) -> Erroneous
where
    I: IntoIterator<Item = ErrOpt>,
{
    Constructor::here().build(opts)
}
