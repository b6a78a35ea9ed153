//! Geek Store Core - Shared domain types.
//!
//! This crate provides the types shared by the Geek Store components:
//! - `storefront` - Public-facing e-commerce site
//! - `cli` - Command-line tools for migrations and catalog seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP. The shopping cart lives here because it is a plain value
//! that the storefront loads from and writes back to the visitor's session.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, emails, money formatting and the cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
