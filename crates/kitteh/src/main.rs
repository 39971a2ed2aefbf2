
mod cli;
mod repl;
mod runner;

use std::io;
use std::process::ExitCode;

use clap::Parser as _;
use cli::{Cli, Command};
use kitteh_session::diagnostics::PrettyDiagnosticEmitter;
use kitteh_session::{ErrorsEmitted, Session};
use rustyline::error::ReadlineError;

#[derive(thiserror::Error, Debug)]
enum DriverError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("error in the line editor: {0}")]
    Readline(#[from] ReadlineError),

    #[error("errors while running")]
    HadErrors,
}

impl From<ErrorsEmitted> for DriverError {
    fn from(_: ErrorsEmitted) -> Self {
        Self::HadErrors
    }
}

type DriverResult<T> = Result<T, DriverError>;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,

        // already reported as diagnostics
        Err(DriverError::HadErrors) => ExitCode::FAILURE,

        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> DriverResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Run {
            input,
            source,
            color,
        } => {
            let (name, source) = if source {
                ("<unnamed>".to_owned(), input)
            } else {
                let source = std::fs::read_to_string(&input)?;
                (input, source)
            };

            let mut session = Session::new(PrettyDiagnosticEmitter::new(color.into()));
            runner::run_program(&mut session, name, source, io::stdin().lock(), io::stdout())
        }

        Command::Repl { color } => repl::run_repl(color.into()),
    }
}
