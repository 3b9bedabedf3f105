//! SQLite backend for askdata.
//!
//! Wraps [`tokio_rusqlite`] so query execution runs on a dedicated thread
//! without blocking the async runtime.

mod decode;
mod seed;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
