//! Proptest generators for property-based testing.

use proptest::prelude::*;

use badger_core::{Key, MAX_PASSWORD_LEN};

/// Generate a printable password within the length limit.
pub fn password() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!("[ -~]{{0,{}}}", MAX_PASSWORD_LEN))
        .expect("valid password regex")
}

/// Generate a printable password over the length limit.
pub fn overlong_password() -> impl Strategy<Value = String> {
    proptest::string::string_regex(&format!(
        "[ -~]{{{},{}}}",
        MAX_PASSWORD_LEN + 1,
        MAX_PASSWORD_LEN * 2
    ))
    .expect("valid password regex")
}

/// Generate a password-derived key.
pub fn key() -> impl Strategy<Value = Key> {
    password().prop_map(|p| Key::generate(&p).expect("password within limit"))
}

/// Generate a non-empty token.
pub fn token(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..=max_len.max(1))
}

/// Generate a scheme name (no colon).
pub fn scheme() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9+.-]{0,7}"
}

/// Generate a locator with one of the built-in schemes.
pub fn builtin_locator() -> impl Strategy<Value = String> {
    (
        prop_oneof![Just("id:"), Just("nmc:"), Just("http://"), Just("https://")],
        "[a-z0-9/._-]{1,24}",
    )
        .prop_map(|(prefix, rest)| format!("{}{}", prefix, rest))
}

/// Generate a locator whose scheme none of the built-in handlers accept.
pub fn foreign_locator() -> impl Strategy<Value = String> {
    (scheme(), "[ -~]{0,24}")
        .prop_filter("built-in scheme", |(scheme, _)| {
            !matches!(scheme.as_str(), "id" | "nmc" | "http" | "https")
        })
        .prop_map(|(scheme, rest)| format!("{}:{}", scheme, rest))
}
