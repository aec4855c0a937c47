//! Run configuration.
//!
//! A [`Config`] is built once per invocation from the command line and
//! handed to the pipeline. Nothing is read from or written to disk; every
//! run starts from [`Config::default`] plus the flags given.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::cli::Cli;
use crate::duplicates::FinderConfig;
use crate::scanner::{WalkerConfig, DEFAULT_BUFFER_SIZE};

/// Settings for one run of the pipeline.
#[derive(Debug, Clone)]
pub struct Config {
    /// Exclude hidden files from the scan.
    pub skip_hidden: bool,
    /// Hasher read buffer size in bytes.
    pub read_buffer_size: usize,
    /// Show the scan progress spinner.
    pub show_progress: bool,
    /// Use the simplified, animation-free progress line.
    pub accessible: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_hidden: true,
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            show_progress: true,
            accessible: false,
        }
    }
}

impl Config {
    /// Build the configuration for the given command line.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self::default()
            .with_skip_hidden(!cli.include_hidden)
            .with_show_progress(!cli.quiet && !cli.no_progress)
            .with_accessible(cli.accessible)
    }

    /// Enable/disable the hidden-file filter.
    #[must_use]
    pub fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    /// Set the hasher read buffer size (clamped to at least 1 byte).
    #[must_use]
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Enable/disable the progress spinner.
    #[must_use]
    pub fn with_show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Enable/disable accessible progress output.
    #[must_use]
    pub fn with_accessible(mut self, accessible: bool) -> Self {
        self.accessible = accessible;
        self
    }

    /// Walker settings derived from this configuration.
    #[must_use]
    pub fn walker_config(&self) -> WalkerConfig {
        WalkerConfig::default().with_skip_hidden(self.skip_hidden)
    }

    /// Finder settings derived from this configuration.
    #[must_use]
    pub fn finder_config(&self, shutdown_flag: Option<Arc<AtomicBool>>) -> FinderConfig {
        let mut config = FinderConfig::default()
            .with_walker_config(self.walker_config())
            .with_buffer_size(self.read_buffer_size);
        if let Some(flag) = shutdown_flag {
            config = config.with_shutdown_flag(flag);
        }
        config
    }
}
