//! Domain logic for the Lingua multi-language page service.
//!
//! Everything in this crate is free of I/O: the database and HTTP layers
//! feed rows in and act on the decisions made here.

pub mod error;
pub mod language;
pub mod locales;
pub mod navigation;
pub mod page_hooks;
pub mod page_types;
pub mod permissions;
pub mod translation;
pub mod tree_path;
pub mod types;
