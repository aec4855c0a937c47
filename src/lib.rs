//! dupsweep - duplicate file sweeper
//!
//! Walks a directory tree, fingerprints every regular file with SHA-256,
//! lists groups of byte-identical files, and after an explicit yes deletes
//! every copy except the first one found.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::io;
use std::sync::Arc;

use anyhow::Context;

use crate::actions::LineConfirm;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::ExitCode;
use crate::pipeline::{Outcome, Pipeline, PipelineError};
use crate::progress::Progress;

/// Run the application with parsed arguments.
///
/// # Errors
///
/// Returns an error for fatal failures (missing or unreadable root,
/// broken terminal I/O, signal handler setup). An interrupted run is not
/// an error; it yields [`ExitCode::Interrupted`].
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    log::debug!("Log level: {}", logging::current_level_name());

    let config = Config::from_cli(&cli);
    log::debug!("Configuration: {:?}", config);

    let handler = signal::install_handler().context("Failed to set up Ctrl+C handling")?;

    let mut pipeline = Pipeline::new(config.clone()).with_shutdown_flag(handler.get_flag());
    if config.show_progress {
        pipeline = pipeline.with_progress_callback(Arc::new(Progress::new(config.accessible)));
    }

    let mut confirm = LineConfirm::stdio();
    let mut stdout = io::stdout();

    match pipeline.run(&cli.path, &mut confirm, &mut stdout) {
        Ok(outcome) => Ok(exit_code_for(&outcome)),
        Err(PipelineError::Interrupted) => {
            log::warn!("Run interrupted, no further files were deleted");
            Ok(ExitCode::Interrupted)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to sweep '{}'", cli.path.display())),
    }
}

/// Exit code for a run that reached a terminal state.
#[must_use]
pub fn exit_code_for(outcome: &Outcome) -> ExitCode {
    if outcome.has_failures() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    }
}
