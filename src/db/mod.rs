//! SQLite store holding vessels, sales and hedges.
//!
//! This module provides:
//! - Store initialization, pragmas and schema
//! - `Repository` for writing records and reading denormalized vessel snapshots

pub mod migrations;
pub mod repo;

pub use migrations::init_db;
pub use repo::Repository;
