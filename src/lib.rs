//! # guardian-content
//!
//! A client for the Guardian content API that flattens search, tag, section
//! and edition results into tables, with simple text charts on top.
//!
//! ## Architecture
//!
//! - [`models`]: Query types, flattened records and [`ResultTable`]
//! - [`client`]: [`GuardianClient`] and its error type
//! - [`plot`]: Histogram and scatterplot rendering
//! - [`config`]: Configuration management
//! - [`utils`]: HTTP client and terminal helpers

pub mod client;
pub mod config;
pub mod models;
pub mod plot;
pub mod utils;

// Re-export commonly used types
pub use client::{ClientError, GuardianClient};
pub use models::{ResultTable, SearchQuery};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
