//! Request handlers.
//!
//! Each submodule provides the async handler functions for one resource.
//! Handlers delegate to the auth service or the corresponding repository in
//! `linkportal_db` and map errors via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod links;
