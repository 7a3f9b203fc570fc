//! `Caller` extractor: the optional session token plus the request deadline.

use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use serde::Deserialize;

use docvault_service::RequestContext;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Request context for service calls.
///
/// The token comes from `Authorization: Bearer <token>` or, failing that,
/// the `token` query parameter. Its absence is not a rejection: the
/// service decides what an anonymous caller may do.
#[derive(Debug, Clone)]
pub struct Caller(pub RequestContext);

impl std::ops::Deref for Caller {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The raw token carried by a request, if any.
pub fn request_token(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(value) = header {
        // A non-Bearer value still counts as a presented (invalid) token.
        let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
        return Some(token.to_string());
    }

    Query::<TokenQuery>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(q)| q.token)
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = match request_token(parts) {
            Some(token) => RequestContext::with_token(token),
            None => RequestContext::anonymous(),
        };
        Ok(Caller(ctx.with_timeout(state.config.server.request_timeout())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(builder: axum::http::request::Builder) -> Parts {
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn bearer_header_takes_precedence() {
        let p = parts(
            Request::builder()
                .uri("/api/docs?token=fromquery")
                .header("Authorization", "Bearer fromheader"),
        );
        assert_eq!(request_token(&p).as_deref(), Some("fromheader"));
    }

    #[test]
    fn query_token_is_accepted() {
        let p = parts(Request::builder().uri("/api/docs?limit=3&token=abc"));
        assert_eq!(request_token(&p).as_deref(), Some("abc"));
    }

    #[test]
    fn missing_token_is_none() {
        let p = parts(Request::builder().uri("/api/docs"));
        assert_eq!(request_token(&p), None);
    }
}
