use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

/// How `#ifdef`/`#endif` blocks are tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionalMode {
    /// A stack of open blocks. Every `#ifdef` block is skipped up to its matching `#endif`,
    /// `#else` branch included. `#ifndef` blocks are never skipped; they are tracked only so
    /// that their `#endif` closes the right block.
    #[default]
    Nested,
    /// A single flag: `#ifdef` always starts skipping and any `#endif` stops it, whatever the
    /// nesting. `#ifndef` and `#else` are ignored.
    Flat,
    /// A stack of open blocks evaluated against the configured defines. `#ifdef X` is taken
    /// when X is defined, `#ifndef X` when it is not, and `#else` flips the innermost block.
    /// This is the only mode that reads the defines.
    Evaluate,
}

impl ConditionalMode {
    pub fn uses_defines(self) -> bool {
        self == Self::Evaluate
    }
}

impl fmt::Display for ConditionalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Nested => "nested",
            Self::Flat => "flat",
            Self::Evaluate => "evaluate",
        };
        f.write_str(name)
    }
}

/// Tracks which conditional blocks are open at the current line.
#[derive(Debug, Clone)]
pub struct ConditionalStack {
    mode: ConditionalMode,
    frames: Vec<bool>,
    flat_skip: bool,
}

impl ConditionalStack {
    pub fn new(mode: ConditionalMode) -> Self {
        Self {
            mode,
            frames: Vec::new(),
            flat_skip: false,
        }
    }

    pub fn enter_ifdef(&mut self, symbol: &str, defines: &BTreeSet<String>) {
        match self.mode {
            ConditionalMode::Nested => self.frames.push(false),
            ConditionalMode::Flat => self.flat_skip = true,
            ConditionalMode::Evaluate => self.frames.push(defines.contains(symbol)),
        }
    }

    pub fn enter_ifndef(&mut self, symbol: &str, defines: &BTreeSet<String>) {
        match self.mode {
            ConditionalMode::Nested => self.frames.push(true),
            ConditionalMode::Flat => {}
            ConditionalMode::Evaluate => self.frames.push(!defines.contains(symbol)),
        }
    }

    pub fn flip_else(&mut self) {
        if self.mode != ConditionalMode::Evaluate {
            return;
        }
        if let Some(active) = self.frames.last_mut() {
            *active = !*active;
        }
    }

    /// Closes the innermost block. A stray `#endif` is ignored.
    pub fn exit(&mut self) {
        match self.mode {
            ConditionalMode::Nested | ConditionalMode::Evaluate => {
                self.frames.pop();
            }
            ConditionalMode::Flat => self.flat_skip = false,
        }
    }

    pub fn is_skipping(&self) -> bool {
        match self.mode {
            ConditionalMode::Nested | ConditionalMode::Evaluate => {
                self.frames.iter().any(|active| !active)
            }
            ConditionalMode::Flat => self.flat_skip,
        }
    }
}
