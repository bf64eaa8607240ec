//! Custom assertion macros and utilities
//!
//! Provides enhanced assertion macros for better test output and
//! more descriptive error messages.

/// Assert that a result is ok and return the value
///
/// This macro unwraps a Result, providing a better error message
/// if the result is an error.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that a session is fully logged out, in memory and in storage
#[macro_export]
macro_rules! assert_logged_out {
    ($session:expr, $storage:expr) => {{
        let current = $session.current_session();
        assert!(!current.is_authenticated(), "session is still authenticated");
        assert!(current.token.is_none(), "token still in memory");
        assert!(current.user.is_none(), "user still in memory");
        assert!(
            kobun_vocab::app::SessionStorage::get(&*$storage, kobun_vocab::app::TOKEN_KEY)
                .is_none(),
            "token still persisted"
        );
        assert!(
            kobun_vocab::app::SessionStorage::get(&*$storage, kobun_vocab::app::USER_KEY)
                .is_none(),
            "user still persisted"
        );
    }};
}
