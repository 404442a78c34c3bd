//! DERBY — weighted-odds horse race betting round
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod race;
pub mod session;
