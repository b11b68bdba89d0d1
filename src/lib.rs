//! Endorsement Network API
//!
//! Backend for the intern endorsement tree diagram: a seed binary that
//! populates MongoDB from JSON fixtures, and a read-only HTTP server that
//! returns the endorsement edges in display order.

pub mod config;
pub mod db;
pub mod routes;
pub mod seed;
pub mod server;
pub mod types;

pub use config::Args;
pub use server::{run, AppState};
pub use types::{ApiError, Result};
