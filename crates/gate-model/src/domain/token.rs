use serde::{Deserialize, Serialize};

/// Short random string issued to a session and echoed back for validation.
///
/// A token is a shared secret for exactly one issuance cycle: reissuing for
/// the same session overwrites the previous value. Comparison is
/// byte-for-byte; no normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Byte-for-byte comparison against a client-supplied candidate.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_bytes() == candidate.as_bytes()
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_exact() {
        let token = Token::from("abcdefghij");
        assert!(token.matches("abcdefghij"));
        assert!(!token.matches("abcdefghiJ"));
        assert!(!token.matches("abcdefghij "));
        assert!(!token.matches(""));
    }

    #[test]
    fn serde_is_transparent() {
        let token = Token::from("xyz");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#""xyz""#);

        let back: Token = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
