use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::responses::CsrfTokenResponse;
use crate::api::extractors::csrf::CSRF_COOKIE;
use std::sync::Arc;
use tower_cookies::{Cookies, Cookie};
use tower_cookies::cookie::SameSite;
use time::Duration;
use rand::{distributions::Alphanumeric, Rng};
use tracing::debug;

/// Issues a fresh anti-forgery token. The client echoes it in `X-CSRF-Token`.
pub async fn issue_token(
    State(state): State<Arc<AppState>>,
    cookies: Cookies,
) -> impl IntoResponse {
    let csrf_token: String = rand::thread_rng().sample_iter(&Alphanumeric).take(32).map(char::from).collect();

    let mut cookie = Cookie::new(CSRF_COOKIE, csrf_token.clone());
    cookie.set_http_only(true);
    cookie.set_secure(state.config.secure_cookies);
    cookie.set_same_site(SameSite::Strict);
    cookie.set_path("/");
    cookie.set_max_age(Duration::hours(8));
    cookies.add(cookie);

    debug!("Issued anti-forgery token");

    Json(CsrfTokenResponse { csrf_token })
}
