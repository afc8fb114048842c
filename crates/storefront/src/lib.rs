//! Sole Supply Storefront library.
//!
//! Client-side storefront plumbing for a sneaker catalog: a persisted
//! shopping cart, a schema-tolerant product fetch layer with fallbacks,
//! a lightweight login flow, and an external identity collaborator.
//!
//! # Architecture
//!
//! - [`catalog`] - Product listing/detail client over the upstream catalog
//!   API, with field normalization and a three-tier fallback chain
//! - [`cart`] - Cart state reducer plus its durable-storage wrapper
//! - [`storage`] - Key-value persistence (file-backed, survives restarts)
//! - [`services`] - Login flow backed by durable storage
//! - [`identity`] - External session/identity provider client
//! - [`state`] - `AppContext`, the explicit application context passed to
//!   whichever shell drives this library

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod identity;
pub mod services;
pub mod state;
pub mod storage;
