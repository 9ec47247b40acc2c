/// Build a record from a list of configuration units.
///
/// Shorthand for [`new`](crate::new); the record is attributed to the
/// macro call site.
///
/// ```text
/// let error = erroneous![msg("parsing header", None), err(parse_error)];
/// let bare = erroneous![];
/// ```
#[macro_export]
macro_rules! erroneous {
    ($($opt:expr),* $(,)?) => {
        $crate::new(::std::vec::Vec::<$crate::ErrOpt>::from([$($opt),*]))
    };
}
