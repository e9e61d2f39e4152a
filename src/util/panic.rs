/// Asserts that a block panics. With `contains`, also checks that the panic message includes the
/// given text, which is how the infallible wrappers report the underlying error.
macro_rules! assert_panics {
    ($run:block, contains $expected:literal) => {{
        let payload = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run))
            .expect_err("assertion failed to panic");
        let message = payload.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or_default();
        assert!(
            message.contains($expected),
            "panic message {message:?} should contain {:?}",
            $expected
        );
    }};
    ($run:block) => {
        assert_panics!($run, "assertion failed to panic")
    };
    ($run:block, $msg:literal) => {
        assert!(std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)).is_err(), $msg);
    };
}

pub(crate) use assert_panics;
