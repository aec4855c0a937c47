//! End-to-end run: scan, list, confirm, delete.
//!
//! A [`Pipeline`] is used once. It moves through
//!
//! ```text
//! Idle -> Scanning -> Grouped -> NoDuplicates
//!                             -> AwaitingConfirmation -> Cancelled
//!                                                     -> Executing -> Done
//! ```
//!
//! and writes operator output to the stream it is given. The fingerprint
//! index and the deletion plan are owned by the run and dropped with it.
//!
//! # Example
//!
//! ```no_run
//! use dupsweep::actions::AutoAnswer;
//! use dupsweep::config::Config;
//! use dupsweep::pipeline::{Outcome, Pipeline};
//! use std::path::Path;
//!
//! let outcome = Pipeline::new(Config::default())
//!     .run(Path::new("./downloads"), &mut AutoAnswer(false), &mut std::io::stdout())
//!     .unwrap();
//! assert!(matches!(outcome, Outcome::NoDuplicates { .. } | Outcome::Cancelled { .. }));
//! ```

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::actions::{execute, Confirm, DeletionPlan, ExecutionReport};
use crate::config::Config;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
use crate::output::{confirmation_prompt, DeletionEcho, TextOutput};
use crate::progress::ProgressCallback;

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Created, nothing done yet.
    Idle,
    /// Walking and hashing the tree.
    Scanning,
    /// Groups built and listed.
    Grouped,
    /// Terminal: the scan found nothing to delete.
    NoDuplicates,
    /// Waiting for the operator's answer.
    AwaitingConfirmation,
    /// Terminal: the operator declined.
    Cancelled,
    /// Deleting the planned files.
    Executing,
    /// Terminal: every planned deletion was attempted.
    Done,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Grouped => "grouped",
            Self::NoDuplicates => "no-duplicates",
            Self::AwaitingConfirmation => "awaiting-confirmation",
            Self::Cancelled => "cancelled",
            Self::Executing => "executing",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// How a run ended.
#[derive(Debug)]
pub enum Outcome {
    /// No file content occurred more than once.
    NoDuplicates {
        /// Scan counts and skips.
        summary: ScanSummary,
    },
    /// Duplicates were listed but the operator declined. Nothing was deleted.
    Cancelled {
        /// Scan counts and skips.
        summary: ScanSummary,
        /// The plan that was not executed.
        plan: DeletionPlan,
    },
    /// Deletion was confirmed and attempted.
    Done {
        /// Scan counts and skips.
        summary: ScanSummary,
        /// Per-file deletion results.
        report: ExecutionReport,
    },
}

impl Outcome {
    /// Scan summary of the run.
    #[must_use]
    pub fn summary(&self) -> &ScanSummary {
        match self {
            Self::NoDuplicates { summary }
            | Self::Cancelled { summary, .. }
            | Self::Done { summary, .. } => summary,
        }
    }

    /// Terminal state this outcome corresponds to.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        match self {
            Self::NoDuplicates { .. } => PipelineState::NoDuplicates,
            Self::Cancelled { .. } => PipelineState::Cancelled,
            Self::Done { .. } => PipelineState::Done,
        }
    }

    /// True if any file was skipped during the scan or failed to delete.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        let failed_deletes = match self {
            Self::Done { report, .. } => !report.all_succeeded(),
            _ => false,
        };
        self.summary().has_skips() || failed_deletes
    }
}

/// Errors that end a run early.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The tree could not be scanned.
    #[error(transparent)]
    Finder(FinderError),

    /// Writing output or reading the answer failed.
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    /// Shutdown was requested before the run finished.
    #[error("Interrupted by user")]
    Interrupted,
}

impl From<FinderError> for PipelineError {
    fn from(e: FinderError) -> Self {
        match e {
            FinderError::Interrupted => Self::Interrupted,
            other => Self::Finder(other),
        }
    }
}

/// One scan-confirm-delete run.
pub struct Pipeline {
    config: Config,
    state: PipelineState,
    shutdown_flag: Option<Arc<AtomicBool>>,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("shutdown_flag", &self.shutdown_flag)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<callback>"),
            )
            .finish()
    }
}

impl Pipeline {
    /// Create an idle pipeline.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: PipelineState::Idle,
            shutdown_flag: None,
            progress_callback: None,
        }
    }

    /// Stop at the next phase boundary once `flag` is set.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Report scan progress to `callback`.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    /// Scan `root`, list duplicates on `out`, ask `confirm`, and delete on yes.
    ///
    /// Consumes the pipeline; a new run needs a new pipeline.
    ///
    /// # Errors
    ///
    /// - `PipelineError::Finder` if the root is missing, not a directory,
    ///   or cannot be enumerated. Nothing is deleted.
    /// - `PipelineError::Interrupted` if the shutdown flag is set before
    ///   execution starts.
    /// - `PipelineError::Io` if `out` cannot be written or the answer
    ///   cannot be read.
    pub fn run(
        mut self,
        root: &Path,
        confirm: &mut dyn Confirm,
        out: &mut dyn Write,
    ) -> Result<Outcome, PipelineError> {
        let mut output = TextOutput::new(out);

        self.transition(PipelineState::Scanning);
        output.scan_started(root)?;

        let finder = DuplicateFinder::new(self.finder_config());
        let (groups, summary) = finder.find_duplicates(root)?;

        self.transition(PipelineState::Grouped);
        output.scan_summary(&summary)?;

        let plan = DeletionPlan::from_groups(groups);
        if plan.is_empty() {
            self.transition(PipelineState::NoDuplicates);
            output.no_duplicates()?;
            return Ok(Outcome::NoDuplicates { summary });
        }

        output.plan(&plan)?;
        self.check_shutdown()?;

        self.transition(PipelineState::AwaitingConfirmation);
        if !confirm.confirm(&confirmation_prompt(&plan))? {
            self.transition(PipelineState::Cancelled);
            log::debug!("Deletion declined, {} file(s) kept", plan.delete_count());
            output.cancelled()?;
            return Ok(Outcome::Cancelled { summary, plan });
        }

        self.check_shutdown()?;

        self.transition(PipelineState::Executing);
        let echo = DeletionEcho::new(&mut output);
        let report = execute(&plan, Some(&echo));
        echo.finish()?;

        self.transition(PipelineState::Done);
        output.report(&report)?;
        Ok(Outcome::Done { summary, report })
    }

    fn finder_config(&self) -> FinderConfig {
        let mut config = self.config.finder_config(self.shutdown_flag.clone());
        if let Some(cb) = &self.progress_callback {
            config = config.with_progress_callback(Arc::clone(cb));
        }
        config
    }

    fn transition(&mut self, next: PipelineState) {
        log::debug!("Pipeline state: {} -> {}", self.state, next);
        self.state = next;
    }

    fn check_shutdown(&self) -> Result<(), PipelineError> {
        let requested = self
            .shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst));
        if requested {
            log::info!("Shutdown requested in state {}", self.state);
            return Err(PipelineError::Interrupted);
        }
        Ok(())
    }
}
