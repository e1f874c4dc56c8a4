//! Quickshop storefront library.
//!
//! Server-rendered product listing with a quick-add-to-cart modal, backed by
//! a GraphQL commerce API. Exposed as a library so the binary and the
//! integration tests share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod components;
pub mod config;
pub mod error;
pub mod graphql;
pub mod middleware;
pub mod quick_add;
pub mod routes;
pub mod state;
