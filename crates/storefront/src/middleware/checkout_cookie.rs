//! The `checkoutId` cookie carrying the visitor's checkout across page loads.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header::COOKIE, header::SET_COOKIE, request::Parts},
};
use quickshop_core::CheckoutId;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

/// Name of the cookie holding the checkout ID.
pub const CHECKOUT_COOKIE_NAME: &str = "checkoutId";

/// How long the browser keeps the checkout cookie.
const CHECKOUT_COOKIE_MAX_AGE_DAYS: i64 = 30;

/// Extractor for the checkout ID stored in the request cookies.
///
/// Never rejects: a missing, empty or malformed cookie yields `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutCookie(pub Option<CheckoutId>);

impl CheckoutCookie {
    /// Read the checkout ID from `Cookie` headers.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(Cookie::split_parse)
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == CHECKOUT_COOKIE_NAME)
            .and_then(|cookie| CheckoutId::parse(cookie.value()).ok());

        Self(id)
    }
}

impl<S> FromRequestParts<S> for CheckoutCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Build the `Set-Cookie` value persisting `id`.
#[must_use]
pub fn checkout_cookie_value(id: &CheckoutId, secure: bool) -> String {
    Cookie::build((CHECKOUT_COOKIE_NAME, id.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::days(CHECKOUT_COOKIE_MAX_AGE_DAYS))
        .build()
        .to_string()
}

/// Append a `Set-Cookie` header for `id` to a response's headers.
pub fn set_checkout_cookie(headers: &mut HeaderMap, id: &CheckoutId, secure: bool) {
    match HeaderValue::from_str(&checkout_cookie_value(id, secure)) {
        Ok(value) => {
            headers.append(SET_COOKIE, value);
        }
        Err(e) => tracing::warn!(checkout_id = %id, error = %e, "Invalid checkout cookie value"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headers(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_reads_checkout_cookie_among_others() {
        let cookie = CheckoutCookie::from_headers(&headers("theme=dark; checkoutId=Q2hlY2tvdXQ6MQ=="));
        assert_eq!(cookie, CheckoutCookie(Some(CheckoutId::new("Q2hlY2tvdXQ6MQ=="))));
    }

    #[test]
    fn test_missing_cookie() {
        assert_eq!(CheckoutCookie::from_headers(&HeaderMap::new()), CheckoutCookie(None));
        assert_eq!(
            CheckoutCookie::from_headers(&headers("theme=dark")),
            CheckoutCookie(None)
        );
    }

    #[test]
    fn test_empty_cookie_is_none() {
        assert_eq!(
            CheckoutCookie::from_headers(&headers("checkoutId=")),
            CheckoutCookie(None)
        );
    }

    #[test]
    fn test_cookie_attributes() {
        let value = checkout_cookie_value(&CheckoutId::new("c1"), false);
        assert!(value.starts_with("checkoutId=c1"));
        assert!(value.contains("HttpOnly"));
        assert!(value.contains("SameSite=Lax"));
        assert!(value.contains("Path=/"));
        assert!(!value.contains("Secure"));

        let value = checkout_cookie_value(&CheckoutId::new("c1"), true);
        assert!(value.contains("Secure"));
    }

    #[test]
    fn test_set_checkout_cookie_appends_header() {
        let mut headers = HeaderMap::new();
        set_checkout_cookie(&mut headers, &CheckoutId::new("c1"), false);
        let value = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(value.starts_with("checkoutId=c1"));
    }
}
