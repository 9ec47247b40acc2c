use std::error::Error;

use crate::opts::{err, msg};
use crate::{Constructor, ErrOpt, Erroneous};

/// Extension trait for wrapping the error of any `Result` in a record.
///
/// The record is attributed to the line calling the method. Wrapping a
/// `Result<_, Erroneous>` hands back the original record untouched.
///
/// ```text
/// let text = std::fs::read_to_string(path).erroneous("reading config")?;
///
/// let port = parse_port(&text).erroneous_with(|| {
///     [msg("bad port", Some(ErrFields::new().with("path", path)))]
/// })?;
/// ```
pub trait ResultExt<T> {
    /// Wrap the error with a message.
    fn erroneous(self, message: impl Into<String>) -> Result<T, Erroneous>;

    /// Wrap the error with lazily built units. The error is attached as the
    /// cause after `opts` run.
    fn erroneous_with<I, F>(self, opts: F) -> Result<T, Erroneous>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = ErrOpt>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Error + Send + Sync + 'static,
{
    #[track_caller]
    fn erroneous(self, message: impl Into<String>) -> Result<T, Erroneous> {
        let constructor = Constructor::here();
        self.map_err(|error| constructor.build([msg(message, None), err(error)]))
    }

    #[track_caller]
    fn erroneous_with<I, F>(self, opts: F) -> Result<T, Erroneous>
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = ErrOpt>,
    {
        let constructor = Constructor::here();
        self.map_err(|error| constructor.build(opts().into_iter().chain([err(error)])))
    }
}
