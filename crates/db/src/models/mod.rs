//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - DTOs for inserts and updates

pub mod link;
pub mod session;
pub mod user;
