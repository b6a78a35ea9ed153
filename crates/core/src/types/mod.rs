//! Core types for Geek Store.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod money;

pub use cart::{Cart, CartItem, MAX_QUANTITY};
pub use email::{Email, EmailError};
pub use id::*;
pub use money::{format_money, line_subtotal};
