//! cli
//!
//! Command-line interface layer for branchwork.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Resolve the working directory and load configuration
//! - Install the log subscriber
//! - Delegate to command handlers
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to
//! handlers in [`commands`], which drive a
//! [`BranchManager`](crate::core::manager::BranchManager). All tree state
//! changes flow through the manager.

pub mod args;
pub mod commands;

pub use args::{Cli, Shell};

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use tracing::{warn, Level};

use crate::core::config::Config;
use crate::core::paths::RepoPaths;
use crate::ui::output::Verbosity;

/// Everything a command handler needs besides its own arguments.
#[derive(Debug, Clone)]
pub struct Context {
    /// Storage locations for the working directory.
    pub paths: RepoPaths,
    /// Merged global and repo configuration.
    pub config: Config,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
}

impl Context {
    /// Build a context for `work_dir`, loading its configuration.
    ///
    /// Config warnings are logged, not returned.
    pub fn load(work_dir: PathBuf, debug: bool, quiet: bool) -> Result<Self> {
        let paths = RepoPaths::new(work_dir);
        let loaded = Config::load(Some(&paths)).context("Failed to load config")?;

        for warning in &loaded.warnings {
            warn!(path = %warning.path.display(), "{}", warning.message);
        }

        Ok(Self {
            paths,
            config: loaded.config,
            debug,
            quiet,
        })
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }
}

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();

    let work_dir = match cli.cwd.clone() {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    // Config can turn on debug logging, but a broken config must still be
    // reported, so install a WARN subscriber first if the flag is off.
    let ctx = match Context::load(work_dir, cli.debug, cli.quiet) {
        Ok(ctx) => ctx,
        Err(err) => {
            init_tracing(cli.debug);
            return Err(err);
        }
    };
    init_tracing(ctx.debug || ctx.config.debug());

    commands::dispatch(cli.command, &ctx)
}

fn init_tracing(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };

    // A second install (e.g. in tests) is harmless; keep the first.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .try_init();
}
