//! HTTP API module.
//!
//! This module provides the HTTP server, API types, and the SSE logging
//! layer for the Coretax converter.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::start_server;
pub use types::*;
