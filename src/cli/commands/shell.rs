//! shell command - Run commands interactively against one open tree

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;

use super::{execute, Session};
use crate::cli::args::ShellLine;
use crate::cli::Context;
use crate::ui::output::{self, Verbosity};

const PROMPT: &str = "bw> ";

/// What the loop should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineOutcome {
    Continue,
    Exit,
}

/// Read commands from stdin until `exit` or end of input.
///
/// The repo lock is held for the whole session.
pub fn shell(ctx: &Context) -> Result<()> {
    let mut session = Session::open(ctx, true)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    repl(&mut session, &mut input, &mut io::stdout())
}

fn repl(session: &mut Session, input: &mut impl BufRead, prompt: &mut impl Write) -> Result<()> {
    let mut line = String::new();
    loop {
        if session.verbosity() != Verbosity::Quiet {
            write!(prompt, "{}", PROMPT)?;
            prompt.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match run_line(session, &line) {
            Ok(LineOutcome::Continue) => {}
            Ok(LineOutcome::Exit) => break,
            Err(err) => output::error(format!("{:#}", err)),
        }
    }
    Ok(())
}

/// Run one line of input.
///
/// A leading `git` is accepted and ignored. Usage errors and `--help` are
/// printed by clap and do not end the session.
pub(crate) fn run_line(session: &mut Session, line: &str) -> Result<LineOutcome> {
    let mut words: Vec<&str> = line.split_whitespace().collect();
    if words.first() == Some(&"git") {
        words.remove(0);
    }

    match words.as_slice() {
        [] => return Ok(LineOutcome::Continue),
        [word] if word.eq_ignore_ascii_case("exit") || word.eq_ignore_ascii_case("quit") => {
            return Ok(LineOutcome::Exit)
        }
        _ => {}
    }

    match ShellLine::try_parse_from(words) {
        Ok(parsed) => execute(parsed.command, session)?,
        Err(err) => err.print()?,
    }
    Ok(LineOutcome::Continue)
}
