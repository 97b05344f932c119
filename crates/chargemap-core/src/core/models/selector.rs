use std::fmt;

/// Selects every atom of a loaded structure with the given residue name and atom name.
///
/// Renders as a PyMOL-style selection expression: `resn ALA and name CA`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomSelector {
    pub residue_name: String,
    pub atom_name: String,
}

impl AtomSelector {
    pub fn new(residue_name: impl Into<String>, atom_name: impl Into<String>) -> Self {
        Self {
            residue_name: residue_name.into(),
            atom_name: atom_name.into(),
        }
    }
}

impl fmt::Display for AtomSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resn {} and name {}", self.residue_name, self.atom_name)
    }
}
