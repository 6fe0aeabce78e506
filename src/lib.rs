//! Moxie Frame: Shared Library
//!
//! This crate contains the earnings client, the frame screens,
//! the renderer, and the runtime glue used across all API handlers.
//!
//! Each serverless function in `api/` imports from this library
//! to keep handlers thin and logic reusable.

pub mod app;
pub mod config;
pub mod earnings;
pub mod error;
pub mod frame;
pub mod models;
pub mod render;
pub mod telemetry;
pub mod validation;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
