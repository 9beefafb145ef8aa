//! SQLite implementation of the store gateway.
//!
//! One database file per profile; each collection is a table of JSON
//! documents keyed by `id`.

mod connection;
mod store;


pub use connection::SqliteStore;
