use rand::Rng;
use rand::rngs::OsRng;

use gate_model::Token;

/// Alphabet tokens are drawn from. Lowercase ASCII only.
const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Generate a token of `len` characters drawn uniformly from the lowercase
/// alphabet.
///
/// Uses the OS entropy source. Tokens carry no uniqueness guarantee;
/// collisions between sessions are possible and harmless because the store
/// is keyed by session, not by token.
pub fn generate(len: usize) -> Token {
    let mut rng = OsRng;
    let s: String = (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    Token::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_length_matches_request() {
        for len in [0, 1, 10, 30] {
            assert_eq!(generate(len).len(), len);
        }
    }

    #[test]
    fn generated_chars_are_lowercase_ascii() {
        let token = generate(200);
        assert!(token.as_str().bytes().all(|b| b.is_ascii_lowercase()));
    }

    #[test]
    fn consecutive_tokens_differ() {
        // 26^30 values; a collision here means the RNG is broken.
        let a = generate(30);
        let b = generate(30);
        assert_ne!(a, b);
    }
}
