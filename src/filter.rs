//! Recognition of machine-obfuscated identifiers.

/// Length of every obfuscated identifier.
pub const OBFUSCATED_LEN: usize = 11;

/// Returns `true` if `name` looks like an obfuscated identifier: exactly
/// eleven characters, all of them `A`–`Z`.
#[must_use]
pub fn is_candidate(name: &str) -> bool {
    name.len() == OBFUSCATED_LEN && name.bytes().all(|b| b.is_ascii_uppercase())
}
