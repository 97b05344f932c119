use chargemap::core::io::pml::DEFAULT_REPRESENTATION;
use chargemap::core::topology::conditional::ConditionalMode;
use chargemap::engine::config::DEFAULT_MAX_INCLUDE_DEPTH;
use std::ffi::OsString;
use std::path::PathBuf;

pub struct DefaultsConfig {
    pub conditional_mode: ConditionalMode,
    pub max_include_depth: usize,
    pub normalize_hydrogens: bool,
    pub representation: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            conditional_mode: ConditionalMode::Nested,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
            normalize_hydrogens: true,
            representation: DEFAULT_REPRESENTATION.to_string(),
        }
    }
}

/// Locates the force-field directory the way GROMACS does: the first entry of `GMXLIB`, else
/// `GMXDATA/top`.
pub fn forcefield_dir_from_env(lookup: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    if let Some(gmxlib) = lookup("GMXLIB") {
        if let Some(first) = std::env::split_paths(&gmxlib).find(|p| !p.as_os_str().is_empty()) {
            return Some(first);
        }
    }
    lookup("GMXDATA")
        .filter(|data| !data.is_empty())
        .map(|data| PathBuf::from(data).join("top"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |key| {
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| OsString::from(v))
        }
    }

    #[test]
    fn gmxlib_takes_precedence_over_gmxdata() {
        let dir = forcefield_dir_from_env(env(&[
            ("GMXLIB", "/opt/ff"),
            ("GMXDATA", "/usr/share/gromacs"),
        ]));
        assert_eq!(dir, Some(PathBuf::from("/opt/ff")));
    }

    #[cfg(unix)]
    #[test]
    fn first_gmxlib_entry_is_used() {
        let dir = forcefield_dir_from_env(env(&[("GMXLIB", ":/opt/ff:/usr/local/ff")]));
        assert_eq!(dir, Some(PathBuf::from("/opt/ff")));
    }

    #[test]
    fn gmxdata_points_at_its_top_directory() {
        let dir = forcefield_dir_from_env(env(&[("GMXDATA", "/usr/share/gromacs")]));
        assert_eq!(dir, Some(PathBuf::from("/usr/share/gromacs/top")));
    }

    #[test]
    fn no_environment_means_no_directory() {
        assert_eq!(forcefield_dir_from_env(env(&[])), None);
        assert_eq!(forcefield_dir_from_env(env(&[("GMXDATA", "")])), None);
    }
}
