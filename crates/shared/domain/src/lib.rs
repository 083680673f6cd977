//! # Domain Models
//!
//! This crate contains pure storefront types with minimal dependencies (`serde`, `bitflags`).
//! Keep it lean: no I/O, networking, or heavy logic. Just data and the invariants that
//! both the server and the browser page script must agree on (e.g. checkout field trimming).

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod constants;
pub mod flash;
pub mod registry;
