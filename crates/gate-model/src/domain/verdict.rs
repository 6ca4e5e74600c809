use serde::{Deserialize, Serialize};

use crate::Token;

/// Outcome of comparing a client-supplied token against the stored one.
///
/// Rejection is ordinary control flow, never an error: a mismatch, a missing
/// query parameter and a session with no stored token all collapse here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    /// Supplied token equals the stored token; carries the stored value for
    /// rendering the confirmation page.
    Accepted(Token),
    /// Anything else.
    Rejected,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_carries_stored_token() {
        let v = Verdict::Accepted(Token::from("abc"));
        assert!(v.is_accepted());
        assert!(!Verdict::Rejected.is_accepted());
    }
}
