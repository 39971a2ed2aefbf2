mod expr;
mod stmt;

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::mem;
use std::rc::Rc;

use kitteh_frontend::ast::{Block, FuncDef, Program, Stmt, StmtKind};

use crate::error::{EvalResult, RuntimeError, RuntimeErrorKind, RuntimeResult};
use crate::scope::Scope;
use crate::value::Value;

/// How a statement or block finished.
#[derive(Debug, Clone, PartialEq)]
enum Flow {
    Completed,
    Broke,
    Returned(Value),
}

/// A tree-walking interpreter.
///
/// Holds the state that persists between statements: the active variable
/// scope, the known functions and the input and output collaborators.
pub struct Interpreter<I, O> {
    input: I,
    output: O,

    scope: Scope,
    functions: HashMap<String, Rc<FuncDef>>,

    /// Line of the statement currently running, for error reporting.
    line: u32,
}

impl<I: BufRead, O: Write> Interpreter<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self {
            input,
            output,
            scope: Scope::new(),
            functions: HashMap::new(),
            line: 0,
        }
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn into_output(self) -> O {
        self.output
    }

    /// The current value of `IT`.
    pub fn it(&self) -> &Value {
        self.scope.it()
    }

    /// Runs a whole program.
    ///
    /// Top-level functions are known before the first statement runs, so they
    /// can be called before their definition.
    pub fn run(&mut self, program: &Program) -> RuntimeResult<()> {
        for stmt in &program.block.stmts {
            if let StmtKind::FuncDef(def) = &stmt.kind {
                self.functions
                    .insert(def.name.clone(), Rc::new(def.clone()));
            }
        }

        self.guarded(|interp| interp.exec_block(&program.block))
    }

    /// Runs one statement against the persistent state, as the interactive
    /// session does. Function definitions take effect when executed.
    pub fn execute_statement(&mut self, stmt: &Stmt) -> RuntimeResult<()> {
        self.guarded(|interp| {
            interp.line = stmt.line;
            interp.exec_stmt(stmt)
        })
    }

    /// Turns a stray break or return into an error and attaches the line of
    /// the failing statement.
    fn guarded(
        &mut self,
        f: impl FnOnce(&mut Self) -> EvalResult<Flow>,
    ) -> RuntimeResult<()> {
        let result = f(self).and_then(|flow| match flow {
            Flow::Completed => Ok(()),
            Flow::Broke => Err(RuntimeErrorKind::IllegalBreak),
            Flow::Returned(_) => Err(RuntimeErrorKind::IllegalReturn),
        });

        result.map_err(|kind| RuntimeError::new(kind, self.line))
    }

    fn exec_block(&mut self, block: &Block) -> EvalResult<Flow> {
        for stmt in &block.stmts {
            self.line = stmt.line;

            match self.exec_stmt(stmt)? {
                Flow::Completed => {}
                flow => return Ok(flow),
            }
        }

        Ok(Flow::Completed)
    }

    fn define_function(&mut self, def: &FuncDef) -> EvalResult<()> {
        match self.functions.get(&def.name) {
            // registered up front by `run`
            Some(known) if **known == *def => Ok(()),

            Some(_) => Err(RuntimeErrorKind::FunctionAlreadyDeclared(
                def.name.clone(),
            )),

            None => {
                self.functions.insert(def.name.clone(), Rc::new(def.clone()));
                Ok(())
            }
        }
    }

    /// Calls a function in a fresh scope that sees only its parameters.
    fn call_function(&mut self, name: &str, args: Vec<Value>) -> EvalResult<Value> {
        let func = self
            .functions
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeErrorKind::UndeclaredFunction(name.to_owned()))?;

        if args.len() != func.params.len() {
            return Err(RuntimeErrorKind::WrongArgumentCount {
                name: name.to_owned(),
                expected: func.params.len(),
                found: args.len(),
            });
        }

        let mut scope = Scope::new();
        for (param, arg) in func.params.iter().zip(args) {
            scope.bind(param, arg);
        }

        let caller = mem::replace(&mut self.scope, scope);
        let line = self.line;

        let flow = self.exec_block(&func.body);
        let callee = mem::replace(&mut self.scope, caller);

        // errors keep the line inside the function
        let flow = flow?;
        self.line = line;

        Ok(match flow {
            Flow::Completed => callee.it().clone(),
            Flow::Broke => Value::Noob,
            Flow::Returned(value) => value,
        })
    }
}
