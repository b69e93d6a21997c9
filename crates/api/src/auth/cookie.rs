//! Session cookie encoding and extraction.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::{Cookie, SameSite};

use super::session::SessionConfig;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "portal_session";

/// Build the `Set-Cookie` value that hands `token` to the client.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    Cookie::build((SESSION_COOKIE_NAME, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(cookie::time::Duration::hours(config.ttl_hours))
        .build()
        .to_string()
}

/// Build the `Set-Cookie` value that tells the client to drop its session.
pub fn removal_cookie(config: &SessionConfig) -> String {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build();
    cookie.make_removal();
    cookie.to_string()
}

/// Extract the session token from the request's `Cookie` headers, if any.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value))
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE_NAME)
        .map(|c| c.value().to_owned())
        .filter(|token| !token.is_empty())
}
