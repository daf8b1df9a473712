//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Tree commands run against a [`Session`]: an opened
//! [`BranchManager`] plus the settings its output needs. Each handler:
//! 1. Validates command-specific arguments
//! 2. Calls the manager to execute the command
//! 3. Formats and displays output
//!
//! A one-shot `bw <command>` opens a session, runs one handler and drops it.
//! `bw shell` opens one session and feeds every line through the same
//! handlers, which is what lets `checkout` affect later commands.
//!
//! Mutating commands hold the repo lock for the life of their session.

mod branch;
mod checkout;
mod completion;
mod config_cmd;
mod log_cmd;
mod merge;
mod shell;
mod status;

// Re-export command functions for testing and direct invocation
pub use branch::{create as branch_create, delete as branch_delete, list as branch_list};
pub use checkout::checkout;
pub use completion::completion;
pub use config_cmd::{get as config_get, list as config_list, set as config_set};
pub use log_cmd::log;
pub use merge::merge;
pub use shell::shell;
pub use status::status;

use anyhow::{bail, Context as _, Result};

use crate::cli::args::{Command, ConfigAction};
use crate::cli::Context;
use crate::core::lock::RepoLock;
use crate::core::manager::BranchManager;
use crate::core::store::TreeStore;
use crate::ui::output::Verbosity;

/// An opened branch tree and the settings its handlers need.
#[derive(Debug)]
pub struct Session {
    manager: BranchManager,
    list_indent: usize,
    verbosity: Verbosity,
    // Dropped after the manager.
    _lock: Option<RepoLock>,
}

impl Session {
    /// Open the branch tree for `ctx`.
    ///
    /// With `exclusive`, the repo lock is acquired before the tree is read
    /// and held until the session is dropped.
    pub fn open(ctx: &Context, exclusive: bool) -> Result<Self> {
        let lock = if exclusive {
            Some(RepoLock::acquire(&ctx.paths).context("Failed to lock branch tree")?)
        } else {
            None
        };

        let store = TreeStore::new(ctx.paths.store_path(ctx.config.store_file()));
        let manager = BranchManager::open(store).context("Failed to load branch tree")?;

        Ok(Self {
            manager,
            list_indent: ctx.config.list_indent(),
            verbosity: ctx.verbosity(),
            _lock: lock,
        })
    }

    pub fn manager(&self) -> &BranchManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut BranchManager {
        &mut self.manager
    }

    pub fn list_indent(&self) -> usize {
        self.list_indent
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Config { action } => match action {
            ConfigAction::Get { key } => config_cmd::get(ctx, &key),
            ConfigAction::Set { key, value } => config_cmd::set(ctx, &key, &value),
            ConfigAction::List => config_cmd::list(ctx),
        },
        Command::Completion { shell } => completion::completion(shell),
        Command::Shell => shell::shell(ctx),
        command => {
            let mut session = Session::open(ctx, command.is_mutating())?;
            execute(command, &mut session)
        }
    }
}

/// Run a tree command against an open session.
pub(crate) fn execute(command: Command, session: &mut Session) -> Result<()> {
    match command {
        Command::Branch { name, delete, list } => {
            if list {
                branch::list(session)
            } else if let Some(name) = delete {
                branch::delete(session, &name)
            } else if let Some(name) = name {
                branch::create(session, &name)
            } else {
                bail!("Specify a branch name, -d <name>, or --list")
            }
        }
        Command::Checkout { name } => checkout::checkout(session, &name),
        Command::Merge { source } => merge::merge(session, &source),
        Command::Status => status::status(session),
        Command::Log { branch } => log_cmd::log(session, branch.as_deref()),
        Command::Shell => bail!("Already in a shell"),
        Command::Config { .. } | Command::Completion { .. } => {
            bail!("This command is not available inside the shell")
        }
    }
}
