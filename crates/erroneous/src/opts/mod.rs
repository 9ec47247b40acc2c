//! Configuration units for error construction.
//!
//! Each [`ErrOpt`] mutates a [`Builder`] or ends construction early by
//! handing back an existing record. Units apply strictly in the order given;
//! a later unit writing the same slot wins.
//!
//! # Short-circuit
//!
//! Passing an [`Erroneous`] as a cause does not nest it. The existing record
//! becomes the result of the whole construction, and every later unit is
//! dropped unapplied:
//!
//! ```text
//! let inner = new([msg("disk full", None)]);
//! let outer = new([err(inner.clone()), msg("ignored", None)]);
//! assert!(Erroneous::ptr_eq(&inner, &outer));
//! ```

use std::error::Error;
use std::ops::ControlFlow;
use std::sync::Arc;

use erroneous_callsite::SourceLocation;

use crate::record::Record;
use crate::{Cause, ErrFields, Erroneous};

/// A single configuration unit.
#[derive(Clone, Debug)]
#[must_use = "options do nothing unless passed to a constructor"]
pub enum ErrOpt {
    /// Set the message, and the fields when present.
    ///
    /// An error under the reserved `"error"` field is then attached as the
    /// cause, exactly as if [`ErrOpt::Err`] were applied next.
    Msg {
        message: String,
        fields: Option<ErrFields>,
    },
    /// Set or clear the fields. No cause promotion.
    Fields(Option<ErrFields>),
    /// Attach a cause, or short-circuit if it is already an [`Erroneous`].
    Err(Cause),
    /// Set the source location explicitly; disables automatic capture.
    Source { file: String, line: u32 },
    /// Set how many frames automatic capture skips.
    Depth(usize),
}

/// A record under construction.
#[derive(Debug)]
pub struct Builder {
    message: String,
    cause: Option<Cause>,
    fields: Option<ErrFields>,
    file: String,
    line: u32,
    depth: usize,
}

impl Builder {
    pub(crate) fn new(depth: usize) -> Self {
        Builder {
            message: String::new(),
            cause: None,
            fields: None,
            file: String::new(),
            line: 0,
            depth,
        }
    }

    /// The message set so far.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The cause set so far.
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// The fields set so far.
    pub fn fields(&self) -> Option<&ErrFields> {
        self.fields.as_ref()
    }

    /// The capture depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Check if a source file has been set.
    pub fn has_location(&self) -> bool {
        !self.file.is_empty()
    }

    pub(crate) fn set_location(&mut self, location: SourceLocation) {
        self.file = location.file;
        self.line = location.line;
    }

    pub(crate) fn finish(self) -> Erroneous {
        Erroneous::from_record(Record {
            message: self.message,
            cause: self.cause,
            fields: self.fields,
            file: self.file,
            line: self.line,
        })
    }
}

impl ErrOpt {
    /// Apply this unit to `builder`.
    ///
    /// `Break` carries the record the construction must return instead of
    /// the one being built.
    pub fn apply(self, builder: &mut Builder) -> ControlFlow<Erroneous> {
        match self {
            ErrOpt::Msg { message, fields } => {
                builder.message = message;
                if let Some(fields) = fields {
                    let promoted = fields.error().cloned();
                    builder.fields = Some(fields);
                    if let Some(cause) = promoted {
                        return attach_cause(builder, cause);
                    }
                }
            }
            ErrOpt::Fields(fields) => builder.fields = fields,
            ErrOpt::Err(cause) => return attach_cause(builder, cause),
            ErrOpt::Source { file, line } => {
                builder.file = file;
                builder.line = line;
            }
            ErrOpt::Depth(depth) => builder.depth = depth,
        }
        ControlFlow::Continue(())
    }
}

fn attach_cause(builder: &mut Builder, cause: Cause) -> ControlFlow<Erroneous> {
    if let Some(existing) = cause.downcast_ref::<Erroneous>() {
        tracing::trace!(existing = %existing, "cause is already a record, returning it as-is");
        return ControlFlow::Break(existing.clone());
    }
    builder.cause = Some(cause);
    ControlFlow::Continue(())
}

/// Set the message and, when given, the fields.
pub fn msg(message: impl Into<String>, fields: Option<ErrFields>) -> ErrOpt {
    ErrOpt::Msg {
        message: message.into(),
        fields,
    }
}

/// Set the fields without touching the cause.
pub fn fields(fields: ErrFields) -> ErrOpt {
    ErrOpt::Fields(Some(fields))
}

/// Attach `error` as the cause.
pub fn err<E>(error: E) -> ErrOpt
where
    E: Error + Send + Sync + 'static,
{
    ErrOpt::Err(Arc::new(error))
}

/// Attach an already shared error as the cause.
pub fn err_shared(cause: Cause) -> ErrOpt {
    ErrOpt::Err(cause)
}

/// Attach a boxed error as the cause.
pub fn err_boxed(error: Box<dyn Error + Send + Sync>) -> ErrOpt {
    ErrOpt::Err(Arc::from(error))
}

/// Set the source location explicitly.
pub fn source(file: impl Into<String>, line: u32) -> ErrOpt {
    ErrOpt::Source {
        file: file.into(),
        line,
    }
}

/// Set the automatic capture depth.
pub fn depth(depth: usize) -> ErrOpt {
    ErrOpt::Depth(depth)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
