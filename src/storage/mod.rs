//! SQLite storage layer for projtrack.
//!
//! This module provides the persistence layer using SQLite with:
//! - One connection per operation (no pooling, no held state)
//! - Transaction discipline for atomic writes
//! - Idempotent schema creation and reference-data seeding
//!
//! # Submodules
//!
//! - [`schema`] - Table definitions and seed data
//! - [`sqlite`] - The `Database` data access layer

pub mod schema;
pub mod sqlite;

pub use sqlite::Database;
