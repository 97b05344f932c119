use chargemap::engine::progress::{Progress, ProgressCallback, SkipReason};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info, warn};

const SPINNER_TICK_MS: u64 = 80;

/// Turns traversal events into log records and a spinner naming the file being scanned.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new_spinner()
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());

        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::FileOpened { path, depth } => {
                    debug!("Opened {} (include depth {})", path.display(), depth);
                    if depth == 0 {
                        pb_guard.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                    }
                    pb_guard.set_message(format!("Scanning {}", display_name(&path)));
                }
                Progress::FileFinished {
                    path,
                    colors_applied,
                } => {
                    pb_guard.inc(1);
                    info!(
                        "File {} loaded: {} color(s) applied",
                        display_name(&path),
                        colors_applied
                    );
                }
                Progress::FileMissing {
                    filename,
                    primary,
                    fallback,
                    depth,
                } => pb_guard.suspend(|| {
                    warn!(
                        "File {} does not exist in {} or {} (include depth {})",
                        filename,
                        primary.display(),
                        fallback.display(),
                        depth
                    );
                }),
                Progress::FileUnreadable { path, message } => pb_guard.suspend(|| {
                    warn!("Could not read {}: {}", path.display(), message);
                }),
                Progress::RecordSkipped { path, line, value } => pb_guard.suspend(|| {
                    warn!(
                        "Skipping atom record at {}:{}: charge '{}' is not a number",
                        path.display(),
                        line,
                        value
                    );
                }),
                Progress::IncludeSkipped {
                    from,
                    include,
                    reason,
                } => pb_guard.suspend(|| {
                    let why = match reason {
                        SkipReason::Cycle => "it is already being processed (include cycle)",
                        SkipReason::DepthLimit => "the maximum include depth was reached",
                        SkipReason::NoFileName => "the path has no file name",
                    };
                    warn!(
                        "Not following #include \"{}\" in {}: {}",
                        include,
                        from.display(),
                        why
                    );
                }),
            }
        })
    }

    /// Stops the spinner and removes it from the terminal.
    pub fn finish(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.finish_and_clear();
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} [{pos} file(s)] {msg}")
            .expect("Failed to create spinner style template")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 0);
        assert_eq!(pb.message(), "Initializing...");
    }

    #[test]
    fn callback_tracks_scanned_files() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::FileOpened {
            path: PathBuf::from("/work/sim/topol.top"),
            depth: 0,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.message(), "Scanning topol.top");
        }

        callback(Progress::FileFinished {
            path: PathBuf::from("/work/sim/topol.top"),
            colors_applied: 12,
        });
        callback(Progress::RecordSkipped {
            path: PathBuf::from("/work/sim/topol.top"),
            line: 7,
            value: "abc".to_string(),
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 1);
        }

        handler.finish();
        assert!(handler.pb.lock().unwrap().is_finished());
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::IncludeSkipped {
                from: PathBuf::from("a.itp"),
                include: "a.itp".to_string(),
                reason: SkipReason::Cycle,
            });
            callback(Progress::FileFinished {
                path: PathBuf::from("a.itp"),
                colors_applied: 0,
            });
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.position(), 1);
    }

    #[test]
    fn display_name_prefers_file_name() {
        assert_eq!(display_name(Path::new("/a/b/ions.itp")), "ions.itp");
        assert_eq!(display_name(Path::new("/")), "/");
    }
}
