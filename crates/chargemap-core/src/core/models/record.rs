use super::selector::AtomSelector;
use crate::core::color::{Rgb, charge_to_color};
use std::path::Path;

/// One atom line of an `[ atoms ]` section, reduced to the fields that drive coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomChargeRecord {
    pub residue_name: String,
    pub atom_name: String,
    pub charge: f64,
}

impl AtomChargeRecord {
    pub fn new(residue_name: impl Into<String>, atom_name: impl Into<String>, charge: f64) -> Self {
        Self {
            residue_name: residue_name.into(),
            atom_name: atom_name.into(),
            charge,
        }
    }

    pub fn selector(&self) -> AtomSelector {
        AtomSelector::new(&self.residue_name, &self.atom_name)
    }

    pub fn color(&self) -> Rgb {
        charge_to_color(self.charge)
    }
}

/// The path named by an `#include` directive, exactly as written between the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeDirective {
    pub raw_path: String,
}

impl IncludeDirective {
    pub fn new(raw_path: impl Into<String>) -> Self {
        Self {
            raw_path: raw_path.into(),
        }
    }

    /// The directory portion of the include, empty for a bare file name.
    pub fn directory(&self) -> &Path {
        Path::new(&self.raw_path)
            .parent()
            .unwrap_or_else(|| Path::new(""))
    }

    /// The leaf file name, or `None` when the path ends in a separator or `..`.
    pub fn file_name(&self) -> Option<&str> {
        Path::new(&self.raw_path)
            .file_name()
            .and_then(|name| name.to_str())
    }
}
