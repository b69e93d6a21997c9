//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`session`] -- Opaque session tokens and the server-side [`session::SessionManager`].
//! - [`cookie`] -- Encoding and reading the session cookie.
//! - [`service`] -- Register / login / logout / current-user flows.

pub mod cookie;
pub mod password;
pub mod service;
pub mod session;
