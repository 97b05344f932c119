//! The line grammar of GROMACS `.top`/`.itp` files.
//!
//! Only the subset needed to recover atom charges is understood: preprocessor conditionals,
//! `#include` directives, `[ section ]` headers and the records of `[ atoms ]` sections.

pub mod conditional;
pub mod line;
pub mod names;
pub mod state;

use conditional::ConditionalMode;
use std::collections::BTreeSet;

/// Options that change how individual lines are interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    pub conditional_mode: ConditionalMode,
    /// Symbols treated as defined by `#ifdef`/`#ifndef` in [`ConditionalMode::Evaluate`].
    pub defines: BTreeSet<String>,
    pub normalize_hydrogens: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            conditional_mode: ConditionalMode::default(),
            defines: BTreeSet::new(),
            normalize_hydrogens: true,
        }
    }
}
