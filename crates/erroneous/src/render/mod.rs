//! Text views of a record.
//!
//! Two views, both computed on demand:
//!
//! - [`Erroneous::message`]: base message plus cause text.
//! - `Display`: the message, then ` [file:line]`, then two spaces and the
//!   fields as a JSON object.
//!
//! ```text
//! open config: permission denied [src/config.rs:42]  {"path":"/etc/app.toml"}
//! ```
//!
//! Rendering never fails. Fields that cannot be serialized are left out of
//! the text.

use std::fmt;

use serde::Serialize;

use crate::Erroneous;

/// Text rendered for an absent record.
pub const UNKNOWN_ERROR: &str = "unknown error";

impl Erroneous {
    /// The message followed by the cause text.
    ///
    /// The `": "` separator only appears when both parts are present; an
    /// empty base message yields just the cause text.
    pub fn message(&self) -> String {
        let base = self.base_message();
        match self.cause() {
            Some(cause) if base.is_empty() => cause.to_string(),
            Some(cause) => format!("{base}: {cause}"),
            None => base.to_owned(),
        }
    }
}

impl fmt::Display for Erroneous {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())?;

        let (file, line) = self.location();
        if !file.is_empty() {
            write!(f, " [{file}:{line}]")?;
        }

        if let Some(segment) = self.fields().and_then(fields_segment) {
            write!(f, "  {segment}")?;
        }

        Ok(())
    }
}

/// Serialize fields for the rendered text.
///
/// Best effort: a serialization failure yields `None` and the segment is
/// dropped from the output.
pub(crate) fn fields_segment<T: Serialize + ?Sized>(fields: &T) -> Option<String> {
    match serde_json::to_string(fields) {
        Ok(text) if !text.is_empty() => Some(text),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!(%error, "leaving unserializable fields out of error text");
            None
        }
    }
}

/// Full error text for records that may be absent.
///
/// `None` renders as [`UNKNOWN_ERROR`] rather than failing.
pub trait ErrorText {
    /// Render the full error text.
    fn error_text(&self) -> String;
}

impl ErrorText for Erroneous {
    fn error_text(&self) -> String {
        self.to_string()
    }
}

impl<T: ErrorText + ?Sized> ErrorText for &T {
    fn error_text(&self) -> String {
        (**self).error_text()
    }
}

impl<T: ErrorText> ErrorText for Option<T> {
    fn error_text(&self) -> String {
        match self {
            Some(record) => record.error_text(),
            None => UNKNOWN_ERROR.to_owned(),
        }
    }
}
