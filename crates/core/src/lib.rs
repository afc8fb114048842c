//! Sole Supply Core - Shared types library.
//!
//! This crate provides common types used across all Sole Supply components:
//! - `storefront` - The headless storefront client library
//! - `cli` - Command-line shell driving the storefront library
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
