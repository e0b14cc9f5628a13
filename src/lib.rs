//! pidbm library crate
//!
//! This is the library component of pidbm, the command-line manager for
//! the Piduino board and pin database. The library provides:
//!
//! - Token resolution: numeric-id match first, case-insensitive substring
//!   name match as the fallback
//! - A structured query builder producing parameterized SELECT, INSERT,
//!   UPDATE and DELETE statements from a declarative view projection
//! - A generic record access engine with idempotent inserts and
//!   confirmation-gated deletes
//! - Tabular result rendering with database-computed column widths
//! - Entity aggregates for connectors (pin grid), GPIOs, SoCs and their
//!   satellites
//!
//! The binary in `main.rs` wires these pieces to the command line; the
//! library keeps them testable without a terminal.

pub mod cli;
pub mod config;
pub mod conninfo;
pub mod connector;
pub mod db;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod gpio;
pub mod pin;
pub mod prompt;
pub mod query;
pub mod render;
pub mod resolver;
pub mod soc;
pub mod views;
