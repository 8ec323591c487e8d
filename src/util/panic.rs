/// Asserts that a block panics, and that the panic message contains `$expected`. The block is
/// treated as unwind safe, since the trees it touches are no longer inspected once it has panicked.
#[allow(unused_macros)]
macro_rules! assert_panics {
    ($run:block) => {
        assert_panics!($run, "")
    };
    ($run:block, $expected:expr) => {{
        let payload = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $run)) {
            Ok(_) => panic!("block was expected to panic"),
            Err(payload) => payload,
        };
        let message = payload
            .downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| payload.downcast_ref::<&str>().copied())
            .unwrap_or_default();
        assert!(
            message.contains($expected),
            "panic message {message:?} should contain {:?}",
            $expected
        );
    }};
}

#[allow(unused_imports)]
pub(crate) use assert_panics;
