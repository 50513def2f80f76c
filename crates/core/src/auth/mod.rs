//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed, time-limited session tokens.

pub mod jwt;
pub mod password;
