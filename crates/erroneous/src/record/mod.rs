//! The error record.
//!
//! [`Erroneous`] is immutable once built. Clones share one allocation, so a
//! record can be handed around and re-wrapped without copying its contents,
//! and identity survives the trip (see [`Erroneous::ptr_eq`]).

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::{Cause, ErrFields};

/// A structured error: message, optional cause, optional fields, and the
/// call site it was raised from.
///
/// Built only through [`new`](crate::new) or a [`Constructor`](crate::Constructor).
#[derive(Clone)]
#[must_use = "errors should be returned or reported, not silently dropped"]
pub struct Erroneous {
    inner: Arc<Record>,
}

/// Owned contents of a finished record.
pub(crate) struct Record {
    pub(crate) message: String,
    pub(crate) cause: Option<Cause>,
    pub(crate) fields: Option<ErrFields>,
    pub(crate) file: String,
    pub(crate) line: u32,
}

impl Erroneous {
    pub(crate) fn from_record(record: Record) -> Self {
        Erroneous {
            inner: Arc::new(record),
        }
    }

    /// The base message, without the cause text.
    pub fn base_message(&self) -> &str {
        &self.inner.message
    }

    /// The wrapped cause, if any.
    pub fn cause(&self) -> Option<&Cause> {
        self.inner.cause.as_ref()
    }

    /// The fields exactly as attached.
    ///
    /// `None` means no fields were attached, which is distinct from an empty
    /// map even though both render the same.
    pub fn fields(&self) -> Option<&ErrFields> {
        self.inner.fields.as_ref()
    }

    /// The file and line this error was raised from.
    ///
    /// The file is empty and the line zero when no location was captured.
    /// Files under the workspace are relative to it, as `file!()` reports
    /// them, whatever depth they were captured at.
    pub fn location(&self) -> (&str, u32) {
        (&self.inner.file, self.inner.line)
    }

    /// Check if two handles refer to the same record.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }
}

impl Error for Erroneous {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner
            .cause
            .as_deref()
            .map(|cause| cause as &(dyn Error + 'static))
    }
}

impl fmt::Debug for Erroneous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Erroneous");
        d.field("message", &self.inner.message);
        if let Some(cause) = &self.inner.cause {
            d.field("cause", &format_args!("{cause}"));
        }
        if let Some(fields) = &self.inner.fields {
            d.field("fields", fields);
        }
        if !self.inner.file.is_empty() {
            d.field(
                "location",
                &format_args!("{}:{}", self.inner.file, self.inner.line),
            );
        }
        d.finish()
    }
}
