//! Database module: SQLite storage for activity entries.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite-first)
//! - `actor.rs`: the actor owning the connection pool

pub mod actor;
pub mod models;
pub mod schema;

pub use models::DbEntry;
pub use schema::SQLITE_INIT;

pub use actor::{DbActorHandle, spawn};
