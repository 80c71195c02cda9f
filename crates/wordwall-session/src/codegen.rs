//! Session code and bearer token generation.
//!
//! Codes are typed by humans off a projected screen, so the alphabet
//! drops every visually confusable character (no `O`/`0`, no `I`/`1`).
//! Tokens are bearer secrets and only ever pasted by machines; they use
//! the same alphabet plus its lowercase.
//!
//! Both draw from the thread-local generator behind [`rand::rng`], which
//! is cryptographically secure — tokens must resist guessing.

use rand::Rng;

/// Length of a session display code.
pub const CODE_LEN: usize = 6;

/// Length of a host or player bearer token.
pub const TOKEN_LEN: usize = 24;

/// The unambiguous display alphabet (32 characters).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// The display alphabet plus its lowercase, for tokens.
const TOKEN_ALPHABET: &[u8] =
    b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789abcdefghjklmnpqrstuvwxyz23456789";

fn random_string(len: usize, alphabet: &[u8]) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| alphabet[rng.random_range(0..alphabet.len())] as char)
        .collect()
}

/// Draws a candidate session code.
///
/// Carries no uniqueness guarantee by itself — the session manager
/// checks candidates against currently-known codes and retries.
pub fn generate_code() -> String {
    random_string(CODE_LEN, CODE_ALPHABET)
}

/// Draws a fresh bearer token (used for both hosts and players).
pub fn generate_token() -> String {
    random_string(TOKEN_LEN, TOKEN_ALPHABET)
}

/// Compares two tokens without early exit, so the comparison time leaks
/// nothing about how many leading bytes matched.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (byte_a, byte_b) in a.bytes().zip(b.bytes()) {
        result |= byte_a ^ byte_b;
    }

    result == 0
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_code_has_expected_length() {
        assert_eq!(generate_code().len(), CODE_LEN);
    }

    #[test]
    fn test_generate_code_uses_only_display_alphabet() {
        for _ in 0..100 {
            let code = generate_code();
            for c in code.bytes() {
                assert!(
                    CODE_ALPHABET.contains(&c),
                    "unexpected character {:?} in code {code}",
                    c as char
                );
            }
        }
    }

    #[test]
    fn test_generate_code_never_emits_confusable_characters() {
        for _ in 0..100 {
            let code = generate_code();
            assert!(!code.contains(['O', '0', 'I', '1']), "confusable in {code}");
        }
    }

    #[test]
    fn test_generate_token_has_expected_length() {
        assert_eq!(generate_token().len(), TOKEN_LEN);
    }

    #[test]
    fn test_generate_token_uses_only_token_alphabet() {
        for _ in 0..100 {
            let token = generate_token();
            for c in token.bytes() {
                assert!(TOKEN_ALPHABET.contains(&c));
            }
        }
    }

    #[test]
    fn test_generated_tokens_are_unique() {
        // 24 characters over a 64-symbol alphabet; a collision here
        // means the generator is broken.
        let a = generate_token();
        let b = generate_token();
        assert_ne!(a, b);
    }

    #[test]
    fn test_constant_time_eq_matches_equality() {
        assert!(constant_time_eq("hello", "hello"));
        assert!(!constant_time_eq("hello", "world"));
        assert!(!constant_time_eq("hello", "hell"));
        assert!(!constant_time_eq("", "a"));
        assert!(constant_time_eq("", ""));
    }
}
