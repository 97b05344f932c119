//! High-level entry points of the library.
//!
//! [`colorize`] is the only workflow: it walks a topology and its include tree and turns every
//! atom charge it meets into a color application.

pub mod colorize;
