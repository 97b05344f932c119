//! # chargemap Core Library
//!
//! Maps the partial charges declared in GROMACS topology files onto per-atom colors, so that a
//! molecular viewer can display the charge distribution of a loaded structure.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data models (`AtomChargeRecord`, `AtomSelector`),
//!   the charge-to-color ramp, the line grammar of `.top`/`.itp` files, and writers that turn
//!   color applications into renderer scripts or CSV reports.
//!
//! - **[`engine`]: The Plumbing.** Configuration, error types, progress reporting, the
//!   primary/fallback search-path resolver and the [`engine::sink::ColorSink`] seam through which
//!   every color application leaves the library.
//!
//! - **[`workflows`]: The Public API.** [`workflows::colorize`] walks a topology and all of its
//!   includes depth-first and feeds every atom charge into a color sink.

pub mod core;
pub mod engine;
pub mod workflows;
