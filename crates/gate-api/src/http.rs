use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{Html, IntoResponse},
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use gate_model::{SessionId, Token, Verdict};

use crate::{cookie::CookieCodec, error::ApiError, handler::ApiHandler};

/// HTTP API service builder.
pub struct HttpApi<H> {
    handler: Arc<H>,
    codec: CookieCodec,
}

/// Shared route state: the handler seam plus the cookie codec.
pub(crate) struct AppState<H> {
    handler: Arc<H>,
    codec: CookieCodec,
}

impl<H> Clone for AppState<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
            codec: self.codec.clone(),
        }
    }
}

impl<H> HttpApi<H>
where
    H: ApiHandler,
{
    pub fn new(handler: Arc<H>, codec: CookieCodec) -> Self {
        Self { handler, codec }
    }

    /// Build axum router with mounted endpoints.
    ///
    /// Routes:
    /// - GET / - issue a session token
    /// - GET /get?token=..&reference=.. - validate and dispatch
    pub fn router(self) -> Router {
        let state = AppState {
            handler: self.handler,
            codec: self.codec,
        };
        Router::new()
            .route("/", get(issue_token::<H>))
            .route("/get", get(validate_token::<H>))
            .with_state(state)
    }
}

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct ValidateParams {
    token: Option<String>,
    reference: Option<String>,
}

fn issued_fragment(token: &Token) -> String {
    format!("<p>The session is set with value: <strong>{token}</strong></p>")
}

fn confirmation_page(token: &Token) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><title>sessiongate</title></head>\n<body>\n<h3>Token accepted</h3>\n<p>Session token: <strong>{token}</strong></p>\n</body>\n</html>"
    )
}

const BAD_TOKEN: &str = "<h4>Bad Token!</h4>";

// ============================================================================
// Handlers
// ============================================================================

fn session_from_headers<H>(state: &AppState<H>, headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| state.codec.from_cookie_header(h))
}

/// GET /
///
/// Issues a token for the caller's session, minting a fresh session when the
/// cookie is absent or fails its signature check. The cookie is set/refreshed
/// on every visit.
async fn issue_token<H>(
    State(state): State<AppState<H>>,
    headers: HeaderMap,
) -> Result<([(header::HeaderName, String); 1], Html<String>), ApiError>
where
    H: ApiHandler,
{
    let id = session_from_headers(&state, &headers).unwrap_or_else(|| {
        let fresh = SessionId::from(uuid::Uuid::new_v4().to_string());
        debug!(target: "gate.api", session = %fresh, "minted fresh session");
        fresh
    });

    let token = state.handler.issue(&id).await?;

    let headers = [(header::SET_COOKIE, state.codec.set_cookie(&id))];
    Ok((headers, Html(issued_fragment(&token))))
}

/// GET /get?token=..&reference=..
///
/// Validation route: read-only on the session. A request with no valid
/// session cookie cannot match anything and is Rejected outright; so is any
/// request missing a query parameter.
async fn validate_token<H>(
    State(state): State<AppState<H>>,
    headers: HeaderMap,
    Query(params): Query<ValidateParams>,
) -> Result<Html<String>, ApiError>
where
    H: ApiHandler,
{
    let Some(id) = session_from_headers(&state, &headers) else {
        return Ok(Html(BAD_TOKEN.to_string()));
    };

    let verdict = state
        .handler
        .validate(&id, params.token, params.reference)
        .await?;

    Ok(match verdict {
        Verdict::Accepted(stored) => Html(confirmation_page(&stored)),
        Verdict::Rejected => Html(BAD_TOKEN.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Handler fake: fixed token, accepts only "letmein"/some reference.
    struct Fixed;

    #[async_trait]
    impl ApiHandler for Fixed {
        async fn issue(&self, _id: &SessionId) -> Result<Token, ApiError> {
            Ok(Token::from("abcdefghij"))
        }

        async fn validate(
            &self,
            _id: &SessionId,
            token: Option<String>,
            reference: Option<String>,
        ) -> Result<Verdict, ApiError> {
            if token.as_deref() == Some("letmein") && reference.is_some() {
                Ok(Verdict::Accepted(Token::from("letmein")))
            } else {
                Ok(Verdict::Rejected)
            }
        }
    }

    fn state() -> AppState<Fixed> {
        AppState {
            handler: Arc::new(Fixed),
            codec: CookieCodec::new("test-secret"),
        }
    }

    fn headers_with_session(state: &AppState<Fixed>, id: &SessionId) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{}={}", crate::SESSION_COOKIE, state.codec.encode(id))
                .parse()
                .unwrap(),
        );
        headers
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn issue_sets_cookie_and_embeds_token() {
        let resp = issue_token(State(state()), HeaderMap::new())
            .await
            .unwrap()
            .into_response();

        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .expect("session cookie must be set")
            .to_str()
            .unwrap()
            .to_string();
        assert!(set_cookie.starts_with("gate_session="));

        let body = body_string(resp).await;
        assert_eq!(
            body,
            "<p>The session is set with value: <strong>abcdefghij</strong></p>"
        );
    }

    #[tokio::test]
    async fn issue_refreshes_existing_session_cookie() {
        let st = state();
        let id = SessionId::from("existing");
        let resp = issue_token(State(st.clone()), headers_with_session(&st, &id))
            .await
            .unwrap()
            .into_response();

        let set_cookie = resp
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("existing."));
    }

    #[tokio::test]
    async fn validate_with_matching_token_renders_page() {
        let st = state();
        let id = SessionId::from("s-1");
        let Html(body) = validate_token(
            State(st.clone()),
            headers_with_session(&st, &id),
            Query(ValidateParams {
                token: Some("letmein".into()),
                reference: Some("marker".into()),
            }),
        )
        .await
        .unwrap();

        assert!(body.contains("<strong>letmein</strong>"));
    }

    #[tokio::test]
    async fn validate_with_wrong_token_is_bad_token() {
        let st = state();
        let id = SessionId::from("s-1");
        let Html(body) = validate_token(
            State(st.clone()),
            headers_with_session(&st, &id),
            Query(ValidateParams {
                token: Some("wrong".into()),
                reference: Some("marker".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body, BAD_TOKEN);
    }

    #[tokio::test]
    async fn validate_without_session_cookie_is_bad_token() {
        let Html(body) = validate_token(
            State(state()),
            HeaderMap::new(),
            Query(ValidateParams {
                token: Some("letmein".into()),
                reference: Some("marker".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body, BAD_TOKEN);
    }

    #[tokio::test]
    async fn validate_with_forged_cookie_is_bad_token() {
        let st = state();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "gate_session=forged.0000000000000000".parse().unwrap(),
        );

        let Html(body) = validate_token(
            State(st),
            headers,
            Query(ValidateParams {
                token: Some("letmein".into()),
                reference: Some("marker".into()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body, BAD_TOKEN);
    }

    /// Handler fake whose session store is down.
    struct StoreDown;

    fn store_down_error() -> ApiError {
        ApiError::Core(gate_core::CoreError::Store(
            gate_core::StoreError::Unavailable("connection refused".into()),
        ))
    }

    #[async_trait]
    impl ApiHandler for StoreDown {
        async fn issue(&self, _id: &SessionId) -> Result<Token, ApiError> {
            Err(store_down_error())
        }

        async fn validate(
            &self,
            _id: &SessionId,
            _token: Option<String>,
            _reference: Option<String>,
        ) -> Result<Verdict, ApiError> {
            Err(store_down_error())
        }
    }

    fn store_down_state() -> AppState<StoreDown> {
        AppState {
            handler: Arc::new(StoreDown),
            codec: CookieCodec::new("test-secret"),
        }
    }

    #[tokio::test]
    async fn issue_with_unreachable_store_is_500() {
        let resp = issue_token(State(store_down_state()), HeaderMap::new())
            .await
            .unwrap_err()
            .into_response();

        assert_eq!(resp.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(resp).await, "session store unavailable");
    }

    #[tokio::test]
    async fn validate_with_unreachable_store_is_500() {
        let st = store_down_state();
        let id = SessionId::from("s-1");
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            format!("{}={}", crate::SESSION_COOKIE, st.codec.encode(&id))
                .parse()
                .unwrap(),
        );

        let resp = validate_token(
            State(st),
            headers,
            Query(ValidateParams {
                token: Some("letmein".into()),
                reference: Some("marker".into()),
            }),
        )
        .await
        .unwrap_err()
        .into_response();

        assert_eq!(resp.status(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_string(resp).await, "session store unavailable");
    }

    #[tokio::test]
    async fn validate_with_missing_params_is_bad_token() {
        let st = state();
        let id = SessionId::from("s-1");
        let Html(body) = validate_token(
            State(st.clone()),
            headers_with_session(&st, &id),
            Query(ValidateParams {
                token: None,
                reference: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(body, BAD_TOKEN);
    }
}
