use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

/// HTTP header carrying the session identity
pub const SESSION_ID_HEADER: &str = "x-session-id";

/// Extension type for the session identity of a request
///
/// Preferences are keyed by this value. A valid incoming header is kept;
/// anything else gets a freshly minted identity, echoed on the response
/// so the client can persist it.
#[derive(Clone, Debug)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Mints a new random session identity
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Middleware that resolves the session identity of every request
///
/// A parseable `x-session-id` header is reused; a missing or malformed
/// one is replaced. The resolved identity lands in the request extensions
/// and on the response headers.
pub async fn session_middleware(mut request: Request, next: Next) -> Response {
    let session_id = request
        .headers()
        .get(SESSION_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| Uuid::parse_str(s).ok())
        .map(SessionId)
        .unwrap_or_else(SessionId::new);

    request.extensions_mut().insert(session_id.clone());

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&session_id.as_str()) {
        response
            .headers_mut()
            .insert(SESSION_ID_HEADER, header_value);
    }

    response
}
