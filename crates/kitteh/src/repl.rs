use std::io::{self, BufRead, Write};
use std::mem;

use kitteh_frontend::ast::Stmt;
use kitteh_frontend::{FunctionTable, Parser, SyntaxResult};
use kitteh_interp::Interpreter;
use kitteh_session::diagnostics::termcolor::ColorChoice;
use kitteh_session::diagnostics::{DiagnosticEmitter, PrettyDiagnosticEmitter};
use kitteh_session::sourcemap::Source;
use kitteh_session::Session;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::DriverResult;

const PROMPT: &str = " > ";
const CONTINUATION_PROMPT: &str = " … ";

pub fn run_repl(color: ColorChoice) -> DriverResult<()> {
    let mut session = Session::new(PrettyDiagnosticEmitter::new(color));
    let interp = Interpreter::new(io::stdin().lock(), io::stdout());
    let mut repl = Repl::new(&mut session, interp);

    let mut editor = DefaultEditor::new()?;

    println!("Ctrl-C clears the current input, Ctrl-D exits.");

    loop {
        let prompt = if repl.is_pending() {
            CONTINUATION_PROMPT
        } else {
            PROMPT
        };

        match editor.readline(prompt) {
            Ok(line) => {
                editor.add_history_entry(line.as_str())?;
                repl.feed(&line);
            }
            Err(ReadlineError::Interrupted) => repl.clear(),
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    /// The input was run, or its errors reported.
    Done,
    /// The input stops partway through a statement.
    NeedMore,
}

/// An interactive session.
///
/// Lines are collected until they form whole statements, which then run one
/// at a time against a persistent interpreter. Errors are reported and the
/// session carries on.
pub struct Repl<'s, D: DiagnosticEmitter, I, O> {
    session: &'s mut Session<D>,
    interp: Interpreter<I, O>,

    /// Functions seen so far, so later inputs parse calls to them.
    functions: FunctionTable,
    pending: String,
    inputs: usize,
}

impl<'s, D: DiagnosticEmitter, I: BufRead, O: Write> Repl<'s, D, I, O> {
    pub fn new(session: &'s mut Session<D>, interp: Interpreter<I, O>) -> Self {
        Self {
            session,
            interp,
            functions: FunctionTable::new(),
            pending: String::new(),
            inputs: 0,
        }
    }

    #[cfg(test)]
    pub fn interp(&self) -> &Interpreter<I, O> {
        &self.interp
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn feed(&mut self, line: &str) -> Feed {
        self.pending.push_str(line);
        self.pending.push('\n');

        if self.pending.trim().is_empty() {
            self.pending.clear();
            return Feed::Done;
        }

        let mut parser =
            Parser::from_reader(self.pending.as_bytes()).with_functions(self.functions.clone());
        let stmts = parse_statements(&mut parser);

        if matches!(&stmts, Err(err) if err.is_incomplete()) {
            return Feed::NeedMore;
        }

        let warnings = parser.take_warnings();
        let functions = parser.into_functions();

        self.inputs += 1;
        let name = format!("<input {}>", self.inputs);
        let source = mem::take(&mut self.pending);
        let source_id = self.session.sources.insert(Source::new(name, source));

        let _ = self.session.report_all(warnings, &source_id);

        let stmts = match stmts {
            Ok(stmts) => stmts,
            Err(err) => {
                let _ = self.session.report(err, &source_id);
                return Feed::Done;
            }
        };

        self.functions = functions;

        for stmt in &stmts {
            if let Err(err) = self.interp.execute_statement(stmt) {
                let _ = self.session.report(err, &source_id);
                break;
            }
        }

        Feed::Done
    }
}

fn parse_statements<R: BufRead>(parser: &mut Parser<R>) -> SyntaxResult<Vec<Stmt>> {
    let mut stmts = vec![];
    while let Some(stmt) = parser.parse_statement()? {
        stmts.push(stmt);
    }

    Ok(stmts)
}
