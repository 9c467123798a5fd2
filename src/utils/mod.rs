//! Utility modules shared by the client, charts and CLI.
//!
//! - [`HttpClient`]: reqwest client configured from [`ApiConfig`](crate::config::ApiConfig)
//! - [`truncate_with_ellipsis`], [`pad_to_width`], [`display_width`]: Unicode-aware
//!   width helpers for tables and charts
//! - [`terminal_width`], [`is_terminal`]: cached terminal detection

mod display;
mod http;

pub use display::{
    display_width, is_terminal, pad_to_width, terminal_width, truncate_with_ellipsis,
    DEFAULT_WIDTH,
};
pub use http::HttpClient;
