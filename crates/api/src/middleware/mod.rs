//! Request extractors that gate access.
//!
//! - [`auth::AuthUser`] -- Resolves the session cookie to the calling user.

pub mod auth;
