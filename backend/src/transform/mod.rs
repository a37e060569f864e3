//! Transformation module.
//!
//! - Operations: echo, flatten, invert, sum, multiply
//! - Pipeline: CSV bytes to response body

pub mod operations;
pub mod pipeline;

pub use operations::{operations_description, Operation};
pub use pipeline::*;
