//! Domain types and pure logic shared by the database and API crates.
//!
//! Nothing in here performs I/O.

pub mod credentials;
pub mod error;
pub mod links;
pub mod types;
