use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The included file is already open further up the include chain.
    Cycle,
    /// Following the include would exceed the configured maximum depth.
    DepthLimit,
    /// The include path has no file name component.
    NoFileName,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    FileOpened {
        path: PathBuf,
        depth: usize,
    },
    FileFinished {
        path: PathBuf,
        colors_applied: usize,
    },
    FileMissing {
        filename: String,
        primary: PathBuf,
        fallback: PathBuf,
        depth: usize,
    },
    FileUnreadable {
        path: PathBuf,
        message: String,
    },
    RecordSkipped {
        path: PathBuf,
        line: usize,
        value: String,
    },
    IncludeSkipped {
        from: PathBuf,
        include: String,
        reason: SkipReason,
    },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
