use std::hint;

use super::error::EmptyCollection;

pub(crate) trait OptionExtension<T> {
    /// Unwraps an [`Option`] that the caller has proven to be [`Some`]. Debug builds still check
    /// with [`unreachable!`], release builds use [`unreachable_unchecked`](hint::unreachable_unchecked).
    ///
    /// # Safety
    /// The value must be [`Some`]. Every call site states why with an `// UNREACHABLE:` comment.
    unsafe fn unreachable(self) -> T;

    /// Converts a missing element into [`EmptyCollection`], for the accessors that look at the
    /// ends of a collection.
    fn or_empty(self) -> Result<T, EmptyCollection>;
}

impl<T> OptionExtension<T> for Option<T> {
    #[track_caller]
    unsafe fn unreachable(self) -> T {
        match self {
            Some(val) => val,
            None if cfg!(debug_assertions) => unreachable!(),
            // SAFETY: It is the responsibility of the caller to ensure that None is impossible when
            // invoking this method.
            None => unsafe { hint::unreachable_unchecked() },
        }
    }

    fn or_empty(self) -> Result<T, EmptyCollection> {
        self.ok_or(EmptyCollection)
    }
}
