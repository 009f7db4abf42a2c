//! Lagoon-api: HTTP API layer for Lagoon
//!
//! Exposes each pricing derivation to the web front end in the
//! `{value, isLoading, error}` shape.

pub mod dto;
pub mod routes;
pub mod server;
pub mod state;

pub use server::*;
pub use state::{AppState, Engine};
