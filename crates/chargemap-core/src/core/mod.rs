//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Atom charge records, include directives and atom selectors
//! - **Color Ramp** ([`color`]) - The diverging charge-to-RGB transfer function
//! - **Topology Grammar** ([`topology`]) - Line classification, conditional blocks and parse state
//! - **File I/O** ([`io`]) - Topology scanning and the script/report writers

pub mod color;
pub mod io;
pub mod models;
pub mod topology;
