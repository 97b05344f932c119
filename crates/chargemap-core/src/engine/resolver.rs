use super::error::EngineError;
use std::fs::File;
use std::path::{Component, Path, PathBuf};

/// The two directories a topology file name is looked up in, in order.
///
/// For the top-level file the primary directory is the user's topology directory and the
/// fallback is the force-field directory; an include in a subdirectory descends into the same
/// subdirectory of both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPaths {
    pub primary: PathBuf,
    pub fallback: PathBuf,
}

impl SearchPaths {
    pub fn new(primary: impl Into<PathBuf>, fallback: impl Into<PathBuf>) -> Self {
        Self {
            primary: normalize(&primary.into()),
            fallback: normalize(&fallback.into()),
        }
    }

    /// Splits a topology path into its search paths and file name. The topology's own
    /// directory becomes the primary directory.
    ///
    /// # Return
    ///
    /// `None` if `topology` has no file name component.
    pub fn for_topology(topology: &Path, forcefield_dir: &Path) -> Option<(Self, String)> {
        let filename = topology.file_name()?.to_str()?.to_string();
        let directory = topology.parent().unwrap_or_else(|| Path::new(""));
        Some((Self::new(directory, forcefield_dir), filename))
    }

    pub fn candidates(&self, filename: &str) -> [PathBuf; 2] {
        [
            normalize(&self.primary.join(filename)),
            normalize(&self.fallback.join(filename)),
        ]
    }

    /// Opens `filename` from the primary directory, falling back to the fallback directory.
    ///
    /// # Return
    ///
    /// The path that was opened together with the open file.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if neither candidate is a readable regular file.
    pub fn open(&self, filename: &str) -> Result<(PathBuf, File), EngineError> {
        for candidate in self.candidates(filename) {
            let Ok(file) = File::open(&candidate) else {
                continue;
            };
            if file.metadata().is_ok_and(|meta| meta.is_file()) {
                return Ok((candidate, file));
            }
        }
        Err(EngineError::NotFound {
            filename: filename.to_string(),
            primary: self.primary.clone(),
            fallback: self.fallback.clone(),
        })
    }

    /// The search paths for an include whose path has the given directory portion.
    pub fn descend(&self, directory: &Path) -> Self {
        Self::new(self.primary.join(directory), self.fallback.join(directory))
    }
}

/// Lexically removes `.` components and folds `..` into the preceding component.
///
/// Leading `..` components of relative paths are kept; `..` directly below the root is
/// dropped. Symbolic links are not resolved.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(".."),
            },
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn normalize_folds_dot_segments() {
        assert_eq!(normalize(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize(Path::new("../x/../../y")), PathBuf::from("../../y"));
        assert_eq!(normalize(Path::new("/top/../..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("a/..")), PathBuf::from(""));
        assert_eq!(normalize(Path::new("./a.itp")), PathBuf::from("a.itp"));
    }

    #[test]
    fn candidates_join_without_trailing_separator() {
        let paths = SearchPaths::new("/work/sim", "/usr/share/gromacs/top");
        assert_eq!(
            paths.candidates("topol.top"),
            [
                PathBuf::from("/work/sim/topol.top"),
                PathBuf::from("/usr/share/gromacs/top/topol.top")
            ]
        );
    }

    #[test]
    fn descend_applies_directory_to_both_roots() {
        let paths = SearchPaths::new("/work/sim", "/ff");
        let child = paths.descend(Path::new("oplsaa.ff"));
        assert_eq!(child, SearchPaths::new("/work/sim/oplsaa.ff", "/ff/oplsaa.ff"));
        let back = child.descend(Path::new("../amber99.ff"));
        assert_eq!(back, SearchPaths::new("/work/sim/amber99.ff", "/ff/amber99.ff"));
    }

    #[test]
    fn descend_with_absolute_directory_replaces_both_roots() {
        let paths = SearchPaths::new("/work/sim", "/ff");
        let child = paths.descend(Path::new("/opt/top"));
        assert_eq!(child, SearchPaths::new("/opt/top", "/opt/top"));
    }

    #[test]
    fn for_topology_splits_directory_and_name() {
        let (paths, name) =
            SearchPaths::for_topology(Path::new("/work/sim/topol.top"), Path::new("/ff")).unwrap();
        assert_eq!(paths, SearchPaths::new("/work/sim", "/ff"));
        assert_eq!(name, "topol.top");

        let (paths, name) =
            SearchPaths::for_topology(Path::new("topol.top"), Path::new("/ff")).unwrap();
        assert_eq!(paths.primary, PathBuf::new());
        assert_eq!(name, "topol.top");

        assert!(SearchPaths::for_topology(Path::new("/"), Path::new("/ff")).is_none());
    }

    #[test]
    fn open_prefers_primary_then_fallback() {
        let primary = tempdir().unwrap();
        let fallback = tempdir().unwrap();
        fs::write(fallback.path().join("ions.itp"), "").unwrap();
        let paths = SearchPaths::new(primary.path(), fallback.path());

        let (opened, _) = paths.open("ions.itp").unwrap();
        assert_eq!(opened, fallback.path().join("ions.itp"));

        fs::write(primary.path().join("ions.itp"), "").unwrap();
        let (opened, _) = paths.open("ions.itp").unwrap();
        assert_eq!(opened, primary.path().join("ions.itp"));
    }

    #[test]
    fn open_reports_not_found_for_missing_file_and_directories() {
        let primary = tempdir().unwrap();
        let fallback = tempdir().unwrap();
        fs::create_dir(primary.path().join("oplsaa.ff")).unwrap();
        let paths = SearchPaths::new(primary.path(), fallback.path());

        for name in ["missing.itp", "oplsaa.ff"] {
            match paths.open(name) {
                Err(EngineError::NotFound { filename, .. }) => assert_eq!(filename, name),
                other => panic!("expected NotFound, got {:?}", other.map(|(p, _)| p)),
            }
        }
    }
}
