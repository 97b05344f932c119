use crate::core::topology::ScanOptions;
use crate::core::topology::conditional::ConditionalMode;
use std::collections::BTreeSet;
use thiserror::Error;

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 64;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorizeConfig {
    pub scan: ScanOptions,
    /// How many levels of `#include` are followed below the top-level file.
    pub max_include_depth: usize,
}

impl Default for ColorizeConfig {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

#[derive(Default)]
pub struct ColorizeConfigBuilder {
    conditional_mode: Option<ConditionalMode>,
    defines: Vec<String>,
    max_include_depth: Option<usize>,
    normalize_hydrogens: Option<bool>,
}

impl ColorizeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conditional_mode(mut self, mode: ConditionalMode) -> Self {
        self.conditional_mode = Some(mode);
        self
    }
    pub fn define(mut self, symbol: impl Into<String>) -> Self {
        self.defines.push(symbol.into());
        self
    }
    pub fn defines<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defines.extend(symbols.into_iter().map(Into::into));
        self
    }
    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = Some(depth);
        self
    }
    pub fn normalize_hydrogens(mut self, enabled: bool) -> Self {
        self.normalize_hydrogens = Some(enabled);
        self
    }

    pub fn build(self) -> Result<ColorizeConfig, ConfigError> {
        let defaults = ColorizeConfig::default();

        let max_include_depth = self
            .max_include_depth
            .unwrap_or(defaults.max_include_depth);

        let conditional_mode = self
            .conditional_mode
            .unwrap_or(defaults.scan.conditional_mode);
        if !self.defines.is_empty() && !conditional_mode.uses_defines() {
            return Err(ConfigError::InvalidParameter {
                name: "defines",
                reason: format!(
                    "defines are only read in '{}' conditional mode, not '{}'",
                    ConditionalMode::Evaluate,
                    conditional_mode
                ),
            });
        }

        let mut defines = BTreeSet::new();
        for symbol in self.defines {
            if symbol.is_empty() || symbol.contains(char::is_whitespace) {
                return Err(ConfigError::InvalidParameter {
                    name: "defines",
                    reason: format!("'{}' is not a preprocessor symbol", symbol),
                });
            }
            defines.insert(symbol);
        }

        Ok(ColorizeConfig {
            scan: ScanOptions {
                conditional_mode,
                defines,
                normalize_hydrogens: self
                    .normalize_hydrogens
                    .unwrap_or(defaults.scan.normalize_hydrogens),
            },
            max_include_depth,
        })
    }
}
