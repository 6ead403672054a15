//! Cookie service — set and clear the httpOnly auth cookie.

use axum_extra::extract::cookie::{Cookie, SameSite};
use roster_core::auth::jwt::TOKEN_TTL_MINUTES;
use time::{Duration, OffsetDateTime};

/// Cookie name for the identity token.
pub const AUTH_COOKIE: &str = "AuthToken";

/// Build the auth cookie: httpOnly, secure, strict same-site, expiring with the token.
pub fn auth_cookie(token: &str) -> Cookie<'static> {
    auth_cookie_expiring(token, OffsetDateTime::now_utc() + Duration::minutes(TOKEN_TTL_MINUTES))
}

/// Build the auth cookie with an explicit expiry.
pub fn auth_cookie_expiring(token: &str, expires: OffsetDateTime) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE.to_string(), token.to_string()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .expires(expires)
        .build()
}

/// Build an expired auth cookie so the browser drops whatever it holds.
pub fn clear_auth_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE.to_string(), String::new()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .path("/".to_string())
        .max_age(Duration::ZERO)
        .expires(OffsetDateTime::UNIX_EPOCH)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_cookie_has_required_flags() {
        let before = OffsetDateTime::now_utc();
        let cookie = auth_cookie("tok");

        assert_eq!(AUTH_COOKIE, cookie.name());
        assert_eq!("tok", cookie.value());
        assert_eq!(Some(true), cookie.http_only());
        assert_eq!(Some(true), cookie.secure());
        assert_eq!(Some(SameSite::Strict), cookie.same_site());

        let expires = cookie.expires_datetime().expect("expiry set");
        let lifetime = expires - before;
        assert!(lifetime <= Duration::minutes(TOKEN_TTL_MINUTES) + Duration::seconds(1));
        assert!(lifetime > Duration::minutes(TOKEN_TTL_MINUTES - 1));
    }

    #[test]
    fn clear_cookie_is_expired_and_empty() {
        let cookie = clear_auth_cookie();
        assert_eq!(AUTH_COOKIE, cookie.name());
        assert!(cookie.value().is_empty());
        assert_eq!(Some(Duration::ZERO), cookie.max_age());

        let rendered = cookie.to_string();
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("HttpOnly"));
    }
}
