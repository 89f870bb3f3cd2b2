use axum::{
    extract::FromRequestParts,
    http::{request::Parts, Method, StatusCode},
};
use tower_cookies::Cookies;
use tracing::warn;

pub const CSRF_COOKIE: &str = "csrf_token";
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Double-submit check: on unsafe methods the `csrf_token` cookie and the
/// `X-CSRF-Token` header must both be present and equal.
pub struct CsrfGuard;

impl<S> FromRequestParts<S> for CsrfGuard
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let method = &parts.method;
        if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
            return Ok(CsrfGuard);
        }

        let cookies = parts.extensions.get::<Cookies>()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

        let cookie_val = cookies.get(CSRF_COOKIE)
            .map(|c| c.value().to_string())
            .ok_or_else(|| {
                warn!("Rejected {} {}: missing anti-forgery cookie", method, parts.uri.path());
                StatusCode::FORBIDDEN
            })?;

        let header_val = parts.headers.get(CSRF_HEADER)
            .ok_or(StatusCode::FORBIDDEN)?
            .to_str()
            .map_err(|_| StatusCode::FORBIDDEN)?;

        if cookie_val.is_empty() || header_val != cookie_val {
            warn!("Rejected {} {}: anti-forgery token mismatch", method, parts.uri.path());
            return Err(StatusCode::FORBIDDEN);
        }

        Ok(CsrfGuard)
    }
}
