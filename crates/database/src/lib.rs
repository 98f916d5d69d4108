//! # Jokes Database Crate
//!
//! This crate acts as the application-specific interface to the PostgreSQL
//! database holding jokes, categories and the associations between them.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The web server only sees typed methods on
//!   [`DbRepository`] and the rows from `core-types`.
//! - **Asynchronous & Pooled:** Every operation is async and runs on a bounded
//!   connection pool (`PgPool`) owned by whoever called [`connect`]. Connections
//!   go back to the pool on every exit path, errors included.
//! - **Schema first:** [`run_migrations`] creates the three tables in dependency
//!   order. Callers run it before accepting traffic.
//!
//! ## Public API
//!
//! - `connect` / `connect_lazy`: build the connection pool from `DatabaseSettings`.
//! - `run_migrations`: apply the embedded schema migrations.
//! - `DbRepository`: one method per jokes/categories operation.
//! - `DbError`: the errors that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{MIGRATOR, connect, connect_lazy, run_migrations};
pub use error::DbError;
pub use repository::{AssignOutcome, DbRepository};
