//! Core types for askdata: the SQL safety pipeline and the analytics that
//! run over its results.
//!
//! This crate is free of HTTP and database dependencies. Storage backends
//! implement [`store::QueryStore`]; transport layers drive a
//! [`pipeline::Pipeline`].

pub mod anomaly;
pub mod compose;
pub mod config;
pub mod correct;
pub mod error;
pub mod insight;
pub mod lexer;
pub mod pipeline;
pub mod plan;
pub mod profile;
pub mod result;
pub mod schema;
pub mod store;
pub mod validate;

pub use error::{Error, ExecutionError, ExecutionErrorKind, Result};
