//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - DuckDB and in-memory maps for the KeyValueStore port
//! - PostgREST HTTP client (remote) and key-value JSON collection (local) for ExpenseStore
//! - Gemini HTTP client for ExpenseExtractor
//! - System and fixed clocks for Clock

pub mod clock;
pub mod demo;
pub mod duckdb;
pub mod gemini;
pub mod local;
pub mod memory;
pub mod postgrest;

#[cfg(test)]
pub mod mock_server;
