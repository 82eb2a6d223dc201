//! Carnet Types - Shared domain types
//!
//! This crate contains domain identifiers used across Carnet crates:
//! - User identity
//! - Contact identity

pub mod contact;
pub mod user;

pub use contact::*;
pub use user::*;
