//! Quickshop Core - Shared types library.
//!
//! This crate provides the types exchanged between the storefront's
//! GraphQL client and its listing/quick-add views:
//! - product summaries shown in the listing grid
//! - product details and variants loaded by the quick-add modal
//! - the opaque checkout identity carried in the `checkoutId` cookie
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and lets the state machine tests run without a network.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money and catalog view models

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
