//! Pretty printing of the AST back into source code.

use crate::ast::{Assignment, BinOp, CmpOp, Condition, Expr, Number, Program, Stmt};
use console::style;
use std::fmt;

const INDENT: &str = "    ";

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(val) => write!(f, "{}", val),
            // always keep a decimal point so that the literal stays a float
            Number::Float(val) if val.fract() == 0.0 => write!(f, "{:.1}", val),
            Number::Float(val) => write!(f, "{}", val),
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(val) => write!(f, "{}", val),
            Expr::Variable(ident) => f.write_str(ident),
            Expr::Binary { lhs, op, rhs } => {
                let (l_bp, _) = op.binding_power();
                write_operand(f, lhs, |child| child < l_bp)?;
                write!(f, " {} ", op)?;
                // operators are left associative, so an equal binding power on the right needs parentheses
                write_operand(f, rhs, |child| child <= l_bp)
            }
        }
    }
}

/// Writes `expr`, wrapped in parentheses if `needs_parens` returns `true` for its binding power.
fn write_operand(
    f: &mut fmt::Formatter<'_>,
    expr: &Expr,
    needs_parens: impl Fn(u8) -> bool,
) -> fmt::Result {
    match expr {
        Expr::Binary { op, .. } if needs_parens(op.binding_power().0) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.ident, self.value)
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmt(f, self, 0)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_block(f, &self.body, 0)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &[Stmt], depth: usize) -> fmt::Result {
    for stmt in block {
        write_stmt(f, stmt, depth)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    match stmt {
        Stmt::Declaration { ty, idents } => {
            writeln!(f, "{}{} {};", indent, style(ty.keyword()).bold(), idents.join(", "))
        }
        Stmt::Assignment(assignment) => writeln!(f, "{}{};", indent, assignment),
        Stmt::If {
            condition,
            then_block,
            else_block,
        } => {
            writeln!(f, "{}{} ({}) {{", indent, style("if").bold(), condition)?;
            write_block(f, then_block, depth + 1)?;
            if let Some(else_block) = else_block {
                writeln!(f, "{}}} {} {{", indent, style("else").bold())?;
                write_block(f, else_block, depth + 1)?;
            }
            writeln!(f, "{}}}", indent)
        }
        Stmt::While { condition, body } => {
            writeln!(f, "{}{} ({}) {{", indent, style("while").bold(), condition)?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", indent)
        }
        Stmt::For {
            init,
            condition,
            step,
            body,
        } => {
            writeln!(
                f,
                "{}{} ({}; {}; {}) {{",
                indent,
                style("for").bold(),
                init,
                condition,
                step
            )?;
            write_block(f, body, depth + 1)?;
            writeln!(f, "{}}}", indent)
        }
        Stmt::Print(args) => {
            let args: Vec<String> = args.iter().map(Expr::to_string).collect();
            writeln!(f, "{}{}({});", indent, style("print").bold(), args.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;

    fn reprint(source: &str) -> String {
        console::set_colors_enabled(false);
        let source = source.into();
        let program = Parser::new(&source).parse_program().unwrap();
        program.to_string()
    }

    #[test]
    fn test_expr_parentheses() {
        assert_eq!(reprint("x = (1 + 2) * 3;"), "x = (1 + 2) * 3;\n");
        assert_eq!(reprint("x = 1 + (2 * 3);"), "x = 1 + 2 * 3;\n");
        assert_eq!(reprint("x = 8 - (4 - 2);"), "x = 8 - (4 - 2);\n");
        assert_eq!(reprint("x = (8 - 4) - 2;"), "x = 8 - 4 - 2;\n");
        assert_eq!(reprint("x = 2.0 / 0.5;"), "x = 2.0 / 0.5;\n");
    }

    #[test]
    fn test_program_layout() {
        let printed = reprint(
            "int i,n; n=3; for(i=0;i<n;i=i+1){if(i==1){print(i,n);}else{print(0);}}",
        );
        assert_eq!(
            printed,
            "int i, n;\n\
             n = 3;\n\
             for (i = 0; i < n; i = i + 1) {\n    \
                 if (i == 1) {\n        \
                     print(i, n);\n    \
                 } else {\n        \
                     print(0);\n    \
                 }\n\
             }\n"
        );
    }

    #[test]
    fn test_reparse() {
        let original = "float a; a = 1.5; while (a < 10) { a = a * (2 - 1 / a); } print(a);";
        let printed = reprint(original);
        let source = printed.as_str().into();
        let reparsed = Parser::new(&source).parse_program();

        let source = original.into();
        let parsed = Parser::new(&source).parse_program();
        assert_eq!(reparsed, parsed);
    }
}
