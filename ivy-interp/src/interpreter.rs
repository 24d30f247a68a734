use crate::error::{ExecError, RuntimeError};
use crate::value::{self, Value};
use ivy_parser::ast::{Assignment, BinOp, Condition, Expr, Number, Program, Stmt};
use std::collections::HashMap;
use std::io::Write;
use tracing::{debug, trace};

/// Result of a run that went to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// At least one [`RuntimeError`] was reported.
    CompletedWithErrors,
}

/// Executes a [`Program`] by walking its AST.
///
/// All variables live in one flat table regardless of the block that declared them.
/// Program output and error diagnostics are written to `out`, in execution order.
pub struct Interpreter<W> {
    variables: HashMap<String, Value>,
    /// Recoverable errors reported during the current run. The run has failed if this is not empty.
    errors: Vec<RuntimeError>,
    out: W,
    step_limit: Option<u64>,
    steps: u64,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        Self {
            variables: HashMap::new(),
            errors: Vec::new(),
            out,
            step_limit: None,
            steps: 0,
        }
    }

    /// Aborts runs after `limit` steps. A step is an executed statement or a loop iteration.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Forgets all variables and errors.
    pub fn reset(&mut self) {
        self.variables.clear();
        self.errors.clear();
        self.steps = 0;
    }

    /// Runs `program` from a clean state.
    pub fn run(&mut self, program: &Program) -> Result<Status, ExecError> {
        self.reset();
        debug!(statements = program.body.len(), "executing program");
        self.exec_block(&program.body)?;
        self.out.flush()?;
        debug!(
            steps = self.steps,
            errors = self.errors.len(),
            "program finished"
        );
        Ok(self.status())
    }

    pub fn status(&self) -> Status {
        if self.had_error() {
            Status::CompletedWithErrors
        } else {
            Status::Success
        }
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RuntimeError] {
        &self.errors
    }

    /// Returns the current value of a variable or `None` if not declared.
    pub fn get(&self, ident: &str) -> Option<Value> {
        self.variables.get(ident).copied()
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/* Statements */
impl<W: Write> Interpreter<W> {
    fn exec_block(&mut self, block: &[Stmt]) -> Result<(), ExecError> {
        for stmt in block {
            self.exec_stmt(stmt)?;
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), ExecError> {
        self.tick()?;
        trace!(stmt = stmt.name(), "exec");

        match stmt {
            Stmt::Declaration { idents, .. } => {
                for ident in idents {
                    // re-declaration resets the value
                    self.variables.insert(ident.clone(), Value::Uninit);
                }
            }
            Stmt::Assignment(assignment) => self.exec_assignment(assignment)?,
            Stmt::If {
                condition,
                then_block,
                else_block,
            } => {
                if self.eval_condition(condition)? {
                    self.exec_block(then_block)?;
                } else if let Some(else_block) = else_block {
                    self.exec_block(else_block)?;
                }
            }
            Stmt::While { condition, body } => {
                while self.eval_condition(condition)? {
                    self.tick()?;
                    self.exec_block(body)?;
                }
            }
            Stmt::For {
                init,
                condition,
                step,
                body,
            } => {
                self.exec_assignment(init)?;
                while self.eval_condition(condition)? {
                    self.tick()?;
                    self.exec_block(body)?;
                    self.exec_assignment(step)?;
                }
            }
            Stmt::Print(args) => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg)?.to_string());
                }
                writeln!(self.out, "{}", values.join(" "))?;
            }
        }

        Ok(())
    }

    fn exec_assignment(&mut self, assignment: &Assignment) -> Result<(), ExecError> {
        if !self.variables.contains_key(&assignment.ident) {
            return self.report(RuntimeError::UndeclaredVariable {
                name: assignment.ident.clone(),
            });
        }

        let value = self.eval_expr(&assignment.value)?;
        self.variables.insert(assignment.ident.clone(), value);
        Ok(())
    }

    /// Counts one step against the step limit.
    fn tick(&mut self) -> Result<(), ExecError> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => Err(ExecError::StepLimitExceeded { limit }),
            _ => Ok(()),
        }
    }

    /// Writes the diagnostic for a recoverable error and records it.
    fn report(&mut self, err: RuntimeError) -> Result<(), ExecError> {
        debug!(%err, "runtime error");
        writeln!(self.out, "Error: {}", err)?;
        self.errors.push(err);
        Ok(())
    }
}

/* Expressions */
impl<W: Write> Interpreter<W> {
    fn eval_expr(&mut self, expr: &Expr) -> Result<Value, ExecError> {
        match expr {
            Expr::Number(val) => Ok(Value::from(*val)),
            Expr::Variable(ident) => match self.variables.get(ident) {
                Some(val) => Ok(*val),
                None => {
                    self.report(RuntimeError::UndeclaredVariable {
                        name: ident.clone(),
                    })?;
                    Ok(Value::Int(0))
                }
            },
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.eval_operand(lhs, op.symbol())?;
                let rhs = self.eval_operand(rhs, op.symbol())?;

                if *op == BinOp::Div && value::is_zero(rhs) {
                    self.report(RuntimeError::DivisionByZero)?;
                    return Ok(Value::Int(0));
                }

                Ok(Value::from(value::binary(*op, lhs, rhs)))
            }
        }
    }

    /// Evaluates an operand of the operator `op`. Uninitialized values are reported and replaced by `0`.
    fn eval_operand(&mut self, expr: &Expr, op: &'static str) -> Result<Number, ExecError> {
        match self.eval_expr(expr)?.cast_to_number() {
            Some(number) => Ok(number),
            None => {
                self.report(RuntimeError::UninitializedOperand { op })?;
                Ok(Number::Int(0))
            }
        }
    }

    fn eval_condition(&mut self, condition: &Condition) -> Result<bool, ExecError> {
        let lhs = self.eval_operand(&condition.lhs, condition.op.symbol())?;
        let rhs = self.eval_operand(&condition.rhs, condition.op.symbol())?;
        Ok(value::compare(condition.op, lhs, rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ivy_parser::parser::Parser;

    fn program(source: &str) -> Program {
        let source = source.into();
        let program = Parser::new(&source).parse_program();
        assert!(source.has_no_errors(), "{}", source.errors);
        program.unwrap()
    }

    /// Runs `source` and returns the status and everything written to the output.
    fn run(source: &str) -> (Status, String) {
        let mut interpreter = Interpreter::new(Vec::new());
        let status = interpreter.run(&program(source)).unwrap();
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        (status, output)
    }

    #[test]
    fn test_declare_assign_print() {
        let (status, output) = run("int x, y; x = 1; y = x + 1; x = 10; print(x, y);");
        assert_eq!(status, Status::Success);
        assert_eq!(output, "10 2\n");
    }

    #[test]
    fn test_precedence() {
        let (_, output) = run("int x; x = 2 + 3 * 4; print(x, (2 + 3) * 4);");
        assert_eq!(output, "14 20\n");
    }

    #[test]
    fn test_float_arithmetic() {
        let (_, output) = run("float f; f = 7 / 2; print(f, 4 / 2, 1 + 2.5, 2.5 * 2);");
        assert_eq!(output, "3.5 2.0 3.5 5.0\n");
    }

    #[test]
    fn test_division_by_zero() {
        let (status, output) = run("int x; x = 5 / (2 - 2); print(x + 1); print(1.5 / 0.0);");
        assert_eq!(status, Status::CompletedWithErrors);
        assert_eq!(
            output,
            "Error: Division by zero\n1\nError: Division by zero\n0\n"
        );
    }

    #[test]
    fn test_undeclared_read() {
        let mut interpreter = Interpreter::new(Vec::new());
        let status = interpreter.run(&program("print(y + 1, y);")).unwrap();
        assert_eq!(status, Status::CompletedWithErrors);
        assert_eq!(
            interpreter.errors(),
            &[
                RuntimeError::UndeclaredVariable {
                    name: "y".to_string()
                },
                RuntimeError::UndeclaredVariable {
                    name: "y".to_string()
                },
            ]
        );
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        assert_eq!(
            output,
            "Error: Variable 'y' not declared\nError: Variable 'y' not declared\n1 0\n"
        );
    }

    #[test]
    fn test_undeclared_assignment_is_skipped() {
        let mut interpreter = Interpreter::new(Vec::new());
        let status = interpreter.run(&program("z = 1 / 0;")).unwrap();
        assert_eq!(status, Status::CompletedWithErrors);
        // the right hand side is not evaluated, so no division by zero
        assert_eq!(interpreter.errors().len(), 1);
        assert_eq!(interpreter.get("z"), None);
    }

    #[test]
    fn test_declaration_is_uninitialized() {
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.run(&program("int x; float y; y = x; print(x, y);")).unwrap();
        assert_eq!(interpreter.get("x"), Some(Value::Uninit));
        assert_eq!(interpreter.get("y"), Some(Value::Uninit));
        assert!(!interpreter.had_error());
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        assert_eq!(output, "null null\n");
    }

    #[test]
    fn test_redeclaration_resets() {
        let mut interpreter = Interpreter::new(Vec::new());
        let status = interpreter.run(&program("int x; x = 5; int x;")).unwrap();
        assert_eq!(status, Status::Success);
        assert_eq!(interpreter.get("x"), Some(Value::Uninit));
    }

    #[test]
    fn test_uninitialized_operand() {
        let (status, output) = run("int x; print(x + 1); if (x < 1) { print(2); }");
        assert_eq!(status, Status::CompletedWithErrors);
        assert_eq!(
            output,
            "Error: Uninitialized value used as operand of '+'\n1\n\
             Error: Uninitialized value used as operand of '<'\n2\n"
        );
    }

    #[test]
    fn test_if_else() {
        let (_, output) = run("int x; x = 1; if (x > 1) { print(1); } else { print(2); }");
        assert_eq!(output, "2\n");
        let (_, output) = run("int x; x = 2; if (x > 1) { print(1); } else { print(2); }");
        assert_eq!(output, "1\n");
        let (_, output) = run("int x; x = 0; if (x != 0) { print(1); }");
        assert_eq!(output, "");
    }

    #[test]
    fn test_while() {
        let (_, output) = run("int i; i = 0; while (i < 3) { print(i); i = i + 1; }");
        assert_eq!(output, "0\n1\n2\n");
        let (_, output) = run("int i; i = 5; while (i < 3) { print(i); }");
        assert_eq!(output, "");
    }

    #[test]
    fn test_for() {
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter
            .run(&program("int i; for (i = 0; i < 3; i = i + 1) { print(i); }"))
            .unwrap();
        // the step runs after the last body execution
        assert_eq!(interpreter.get("i"), Some(Value::Int(3)));
        let output = String::from_utf8(interpreter.into_output()).unwrap();
        assert_eq!(output, "0\n1\n2\n");
    }

    #[test]
    fn test_for_init_runs_once() {
        let (_, output) =
            run("int i, n; n = 0; for (i = 10; i > 7; i = i - 1) { n = n + 1; } print(n, i);");
        assert_eq!(output, "3 7\n");
    }

    #[test]
    fn test_flat_namespace() {
        let (status, output) = run("int x; x = 1; if (x == 1) { int y; y = 2; } print(y);");
        assert_eq!(status, Status::Success);
        assert_eq!(output, "2\n");
    }

    #[test]
    fn test_step_limit() {
        let mut interpreter = Interpreter::new(Vec::new()).with_step_limit(100);
        let err = interpreter
            .run(&program("int i; i = 0; while (1 > 0) { i = i + 1; }"))
            .unwrap_err();
        assert!(matches!(err, ExecError::StepLimitExceeded { limit: 100 }));
        assert!(interpreter.get("i").is_some());
    }

    #[test]
    fn test_step_limit_allows_terminating_programs() {
        let mut interpreter = Interpreter::new(Vec::new()).with_step_limit(1_000);
        let status = interpreter
            .run(&program("int i; for (i = 0; i < 10; i = i + 1) { print(i); }"))
            .unwrap();
        assert_eq!(status, Status::Success);
    }

    #[test]
    fn test_run_resets_state() {
        let mut interpreter = Interpreter::new(Vec::new());
        let status = interpreter.run(&program("int x; x = 1 / 0;")).unwrap();
        assert_eq!(status, Status::CompletedWithErrors);
        let status = interpreter.run(&program("print(1);")).unwrap();
        assert_eq!(status, Status::Success);
        assert_eq!(interpreter.get("x"), None);
    }
}
