//! Core types for Quickshop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::*;
pub use price::{CurrencyCode, Money, MoneyRange};
pub use product::{ProductDetail, ProductSummary, Thumbnail, Variant};
