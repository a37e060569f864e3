//! HTTP API module.
//!
//! This module provides the HTTP server, response types and log streaming.

pub mod server;
pub mod types;
pub mod logs;

pub use server::{build_router, start_server};
pub use types::*;
pub use logs::*;
