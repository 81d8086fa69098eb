//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the API.
//! Handlers delegate to the repositories in `lingua_db` and map errors via
//! [`AppError`](crate::error::AppError).

pub mod languages;
pub mod navigation;
pub mod pages;
pub mod site;
pub mod translations;
