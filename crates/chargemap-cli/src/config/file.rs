use crate::error::{CliError, Result};
use chargemap::core::topology::conditional::ConditionalMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTopologyConfig {
    pub forcefield_dir: Option<PathBuf>,
    pub conditional_mode: Option<ConditionalMode>,
    pub defines: Option<Vec<String>>,
    pub max_include_depth: Option<usize>,
    pub normalize_hydrogens: Option<bool>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub structure: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub representation: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub topology: Option<FileTopologyConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    /// Reads a configuration file. Relative paths inside it are taken relative to the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: FileConfig =
            toml::from_str(&content).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    fn rebase(&mut self, base: &Path) {
        let rebase = |p: &mut Option<PathBuf>| {
            if let Some(p) = p.as_mut() {
                if p.is_relative() {
                    *p = base.join(&*p);
                }
            }
        };
        if let Some(topology) = self.topology.as_mut() {
            rebase(&mut topology.forcefield_dir);
        }
        if let Some(output) = self.output.as_mut() {
            rebase(&mut output.structure);
            rebase(&mut output.script);
            rebase(&mut output.report);
        }
    }
}
