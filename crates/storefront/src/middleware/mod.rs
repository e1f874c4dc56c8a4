//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, frame and referrer policy)
//!
//! The checkout cookie is not a layer: handlers read it through the
//! [`CheckoutCookie`] extractor and write it back with [`set_checkout_cookie`].

pub mod checkout_cookie;
pub mod request_id;
pub mod security_headers;

pub use checkout_cookie::{CHECKOUT_COOKIE_NAME, CheckoutCookie, set_checkout_cookie};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
