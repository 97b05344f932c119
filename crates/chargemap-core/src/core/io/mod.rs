//! Provides input/output functionality around topology files.
//!
//! Reading is handled by the line-oriented [`topology::TopologyScanner`]. Output leaves the
//! library through the [`traits::ColorSink`] seam; [`pml`] and [`report`] provide sinks that
//! write a renderer command script and a CSV charge report respectively.

pub mod pml;
pub mod report;
pub mod topology;
pub mod traits;
