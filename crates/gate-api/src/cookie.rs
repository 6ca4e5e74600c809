use sha2::{Digest, Sha256};

use gate_model::SessionId;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "gate_session";

/// Signs and verifies the session cookie value.
///
/// Wire format is `<session-id>.<hex sha256(secret ":" session-id)>`. A bad
/// or missing signature is indistinguishable from no cookie: the caller
/// mints a fresh session either way.
#[derive(Clone)]
pub struct CookieCodec {
    secret: String,
}

impl CookieCodec {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn signature(&self, sid: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(sid.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Cookie value for a session id.
    pub fn encode(&self, id: &SessionId) -> String {
        format!("{}.{}", id.as_str(), self.signature(id.as_str()))
    }

    /// Full `Set-Cookie` header value for a session id.
    pub fn set_cookie(&self, id: &SessionId) -> String {
        format!("{}={}; Path=/; HttpOnly", SESSION_COOKIE, self.encode(id))
    }

    /// Verify a raw cookie value; `None` on any tampering or malformation.
    pub fn decode(&self, raw: &str) -> Option<SessionId> {
        let (sid, sig) = raw.rsplit_once('.')?;
        if sid.is_empty() {
            return None;
        }
        if self.signature(sid) != sig {
            return None;
        }
        Some(SessionId::from(sid))
    }

    /// Pull the session id out of a `Cookie` request header, if present and
    /// validly signed.
    pub fn from_cookie_header(&self, header: &str) -> Option<SessionId> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .and_then(|(_, value)| self.decode(value))
    }
}
