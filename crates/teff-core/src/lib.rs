//! Shared building blocks for trigeff.
//!
//! This crate hosts the error type used across the workspace and the run
//! configuration (trigger paths, base selections, taggers, grids) that the
//! efficiency pipeline is driven by.

pub mod config;
pub mod error;

pub use config::{RunConfig, RunOverlay};
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
