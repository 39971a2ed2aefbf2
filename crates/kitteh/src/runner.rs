use std::io::{BufRead, Write};

use kitteh_frontend::parse_program;
use kitteh_interp::Interpreter;
use kitteh_session::diagnostics::DiagnosticEmitter;
use kitteh_session::sourcemap::Source;
use kitteh_session::Session;

use crate::{DriverError, DriverResult};

/// Parses and runs a whole program, reporting any problems to the session.
pub fn run_program<D, I, O>(
    session: &mut Session<D>,
    name: impl Into<String>,
    source: String,
    input: I,
    output: O,
) -> DriverResult<()>
where
    D: DiagnosticEmitter,
    I: BufRead,
    O: Write,
{
    let (program, warnings) = parse_program(source.as_bytes());
    let source_id = session.sources.insert(Source::new(name, source));

    session.report_all(warnings, &source_id)?;

    let program = match program {
        Ok(program) => program,
        Err(err) => {
            let _ = session.report(err, &source_id);
            return Err(DriverError::HadErrors);
        }
    };

    let mut interp = Interpreter::new(input, output);
    if let Err(err) = interp.run(&program) {
        let _ = session.report(err, &source_id);
        return Err(DriverError::HadErrors);
    }

    Ok(())
}
