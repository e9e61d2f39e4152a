use std::error::Error;

pub(crate) trait ResultExtension<T, E: Error> {
    /// Backs the infallible convenience methods (`push`, `insert`, `reserve`, indexing) with their
    /// fallible counterparts. Similar to [`Result::unwrap`], except that the panic message is the
    /// message of the error itself, and the location reported is that of the caller.
    ///
    /// # Panics
    /// Panics if the [`Result`] is an [`Err`].
    fn throw(self) -> T;
}

impl<T, E: Error> ResultExtension<T, E> for Result<T, E> {
    #[track_caller]
    fn throw(self) -> T {
        match self {
            Ok(val) => val,
            Err(error) => panic!("{error}"),
        }
    }
}
