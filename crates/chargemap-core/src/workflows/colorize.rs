use crate::core::io::topology::{ScanEvent, TopologyScanner};
use crate::core::models::record::IncludeDirective;
use crate::engine::config::ColorizeConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter, SkipReason};
use crate::engine::resolver::SearchPaths;
use crate::engine::sink::ColorSink;
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// What a traversal did, for reporting back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalSummary {
    /// Every file that was opened and scanned, in traversal order.
    pub files_processed: Vec<PathBuf>,
    pub colors_applied: usize,
    pub records_skipped: usize,
    /// Include paths, as written, that exist in neither search directory.
    pub missing_includes: Vec<String>,
    /// Includes that were not followed: cycles, depth limit, unreadable files, bad paths.
    pub includes_skipped: usize,
}

struct TopologyWalker<'a, 'r, S: ColorSink + ?Sized> {
    config: &'a ColorizeConfig,
    sink: &'a mut S,
    reporter: &'a ProgressReporter<'r>,
    summary: TraversalSummary,
    include_chain: HashSet<PathBuf>,
}

impl<S: ColorSink + ?Sized> TopologyWalker<'_, '_, S> {
    fn visit(&mut self, filename: &str, search: &SearchPaths, depth: usize) -> Result<(), EngineError> {
        let (path, file) = search.open(filename).inspect_err(|e| {
            if let EngineError::NotFound { filename, primary, fallback } = e {
                self.reporter.report(Progress::FileMissing {
                    filename: filename.clone(),
                    primary: primary.clone(),
                    fallback: fallback.clone(),
                    depth,
                });
            }
        })?;

        let chain_key = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.include_chain.contains(&chain_key) {
            return Err(EngineError::IncludeCycle { path });
        }

        self.reporter.report(Progress::FileOpened {
            path: path.clone(),
            depth,
        });
        let includes = self.scan(&path, file).inspect_err(|e| {
            if let EngineError::Io { path, source } = e {
                self.reporter.report(Progress::FileUnreadable {
                    path: path.clone(),
                    message: source.to_string(),
                });
            }
        })?;
        self.summary.files_processed.push(path.clone());

        self.include_chain.insert(chain_key.clone());
        let result = self.visit_includes(&path, search, includes, depth);
        self.include_chain.remove(&chain_key);
        result
    }

    // The file is owned by the scanner and closed when this returns.
    fn scan(&mut self, path: &Path, file: File) -> Result<Vec<IncludeDirective>, EngineError> {
        let mut includes = Vec::new();
        let mut colors_applied = 0;

        for event in TopologyScanner::new(BufReader::new(file), &self.config.scan) {
            let event = event.map_err(|source| EngineError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            match event {
                ScanEvent::Record { record, .. } => {
                    self.sink
                        .apply_record(&record, record.color())
                        .map_err(|source| EngineError::Sink { source })?;
                    colors_applied += 1;
                }
                ScanEvent::Include { directive, .. } => includes.push(directive),
                ScanEvent::MalformedCharge { line, value } => {
                    self.summary.records_skipped += 1;
                    self.reporter.report(Progress::RecordSkipped {
                        path: path.to_path_buf(),
                        line,
                        value,
                    });
                }
            }
        }

        self.summary.colors_applied += colors_applied;
        self.reporter.report(Progress::FileFinished {
            path: path.to_path_buf(),
            colors_applied,
        });
        Ok(includes)
    }

    fn visit_includes(
        &mut self,
        from: &Path,
        search: &SearchPaths,
        includes: Vec<IncludeDirective>,
        depth: usize,
    ) -> Result<(), EngineError> {
        for include in includes {
            let Some(leaf) = include.file_name() else {
                self.skip_include(from, &include, SkipReason::NoFileName);
                continue;
            };
            if depth >= self.config.max_include_depth {
                self.skip_include(from, &include, SkipReason::DepthLimit);
                continue;
            }

            let child = search.descend(include.directory());
            match self.visit(leaf, &child, depth + 1) {
                Ok(()) => {}
                Err(EngineError::NotFound { .. }) => {
                    self.summary.missing_includes.push(include.raw_path.clone());
                }
                Err(EngineError::IncludeCycle { .. }) => {
                    self.skip_include(from, &include, SkipReason::Cycle);
                }
                Err(e) if e.is_branch_local() => {
                    self.summary.includes_skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn skip_include(&mut self, from: &Path, include: &IncludeDirective, reason: SkipReason) {
        self.summary.includes_skipped += 1;
        self.reporter.report(Progress::IncludeSkipped {
            from: from.to_path_buf(),
            include: include.raw_path.clone(),
            reason,
        });
    }
}

/// Colors every atom declared by a topology file and, recursively, by everything it includes.
///
/// The file is looked up as `primary_dir/filename`, then `fallback_dir/filename`. Each atom
/// record of an `[ atoms ]` section is colored through `sink` as soon as it is read. Once the
/// file is scanned and closed, its includes are processed depth-first in the order they
/// appear, each one searched in the include's directory below both `primary_dir` and
/// `fallback_dir`.
///
/// # Arguments
///
/// * `filename` - The top-level topology file name, relative to both directories.
/// * `primary_dir` - The user topology directory.
/// * `fallback_dir` - The force-field (system topology) directory.
/// * `config` - Parsing and traversal options.
/// * `sink` - Receives one application per atom record.
/// * `reporter` - Receives progress events, including every skipped branch.
///
/// # Return
///
/// A summary of the traversal.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] or [`EngineError::Io`] if the top-level file cannot be
/// opened or read, and [`EngineError::Sink`] if the sink fails at any depth. A missing,
/// unreadable or cyclic include only skips its own branch.
pub fn process<S: ColorSink + ?Sized>(
    filename: &str,
    primary_dir: &Path,
    fallback_dir: &Path,
    config: &ColorizeConfig,
    sink: &mut S,
    reporter: &ProgressReporter,
) -> Result<TraversalSummary, EngineError> {
    let search = SearchPaths::new(primary_dir, fallback_dir);
    let mut walker = TopologyWalker {
        config,
        sink,
        reporter,
        summary: TraversalSummary::default(),
        include_chain: HashSet::new(),
    };
    walker.visit(filename, &search, 0)?;
    Ok(walker.summary)
}

/// Finds the file [`run`] would start from, without reading it.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] if `topology` has no file name or exists in neither
/// its own directory nor `forcefield_dir`.
pub fn locate(topology: &Path, forcefield_dir: &Path) -> Result<PathBuf, EngineError> {
    let (search, filename) = split_topology(topology, forcefield_dir)?;
    search.open(&filename).map(|(path, _)| path)
}

/// Runs [`process`] on a topology path, using the topology's own directory as the primary
/// directory and `forcefield_dir` as the fallback.
///
/// # Errors
///
/// Returns [`EngineError::NotFound`] if `topology` has no file name, and otherwise whatever
/// [`process`] returns.
pub fn run<S: ColorSink + ?Sized>(
    topology: &Path,
    forcefield_dir: &Path,
    config: &ColorizeConfig,
    sink: &mut S,
    reporter: &ProgressReporter,
) -> Result<TraversalSummary, EngineError> {
    let (search, filename) = split_topology(topology, forcefield_dir)?;
    process(
        &filename,
        &search.primary,
        &search.fallback,
        config,
        sink,
        reporter,
    )
}

fn split_topology(
    topology: &Path,
    forcefield_dir: &Path,
) -> Result<(SearchPaths, String), EngineError> {
    SearchPaths::for_topology(topology, forcefield_dir).ok_or_else(|| EngineError::NotFound {
        filename: topology.display().to_string(),
        primary: PathBuf::new(),
        fallback: forcefield_dir.to_path_buf(),
    })
}
