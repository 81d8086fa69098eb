//! Authentication primitives.
//!
//! - [`jwt`] -- JWT access-token generation and validation.
//!
//! Users and sessions live with the identity provider; this service only
//! verifies the bearer tokens it issues.

pub mod jwt;
