//! Opaque session token generation.

use rand::RngCore;

/// Number of random bytes in a session token. Tokens are hex-encoded,
/// so the string form is twice this length.
const TOKEN_BYTES: usize = 32;

/// Generates a random opaque session token.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_length() {
        let token = generate_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
    }

    #[test]
    fn test_generate_token_is_hex() {
        let token = generate_token();
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generate_token_unique() {
        let mut tokens = std::collections::HashSet::new();
        for _ in 0..100 {
            assert!(tokens.insert(generate_token()));
        }
    }
}
