//! # Engine Module
//!
//! The plumbing between the stateless [`crate::core`] layer and the [`crate::workflows`]:
//! validated configuration, error types, progress events, the primary/fallback search-path
//! resolver and the color sinks shipped with the library.

pub mod config;
pub mod error;
pub mod progress;
pub mod resolver;
pub mod sink;
