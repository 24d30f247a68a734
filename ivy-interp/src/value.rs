use ivy_parser::ast::{BinOp, CmpOp, Number};
use std::fmt;

/// A runtime value stored in a variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    /// Value of a declared variable that was never assigned.
    Uninit,
}

impl Value {
    /// Attempts to cast the `Value` into a [`Number`] or `None` if uninitialized.
    pub fn cast_to_number(self) -> Option<Number> {
        match self {
            Value::Int(val) => Some(Number::Int(val)),
            Value::Float(val) => Some(Number::Float(val)),
            Value::Uninit => None,
        }
    }
}

impl From<Number> for Value {
    fn from(number: Number) -> Self {
        match number {
            Number::Int(val) => Value::Int(val),
            Number::Float(val) => Value::Float(val),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(val) => write!(f, "{}", Number::Int(*val)),
            Value::Float(val) => write!(f, "{}", Number::Float(*val)),
            Value::Uninit => f.write_str("null"),
        }
    }
}

/// Returns `true` if `number` is exactly zero (`0`, `0.0` or `-0.0`).
pub fn is_zero(number: Number) -> bool {
    match number {
        Number::Int(val) => val == 0,
        Number::Float(val) => val == 0.0,
    }
}

/// Applies an arithmetic operator.
///
/// Two ints stay an int unless the result overflows, in which case the operation is redone with floats.
/// Division always produces a float. Division by zero must be checked by the caller.
pub fn binary(op: BinOp, lhs: Number, rhs: Number) -> Number {
    if let (Number::Int(a), Number::Int(b)) = (lhs, rhs) {
        let checked = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div => None,
        };
        if let Some(val) = checked {
            return Number::Int(val);
        }
    }

    let (a, b) = (lhs.as_f64(), rhs.as_f64());
    Number::Float(match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => a / b,
    })
}

/// Applies a comparison operator. Ints are compared exactly, anything else as floats.
pub fn compare(op: CmpOp, lhs: Number, rhs: Number) -> bool {
    /// Generate comparison for a pair of operands.
    macro_rules! cmp {
        ($a: expr, $b: expr) => {
            match op {
                CmpOp::Gt => $a > $b,
                CmpOp::Lt => $a < $b,
                CmpOp::Ge => $a >= $b,
                CmpOp::Le => $a <= $b,
                CmpOp::Eq => $a == $b,
                CmpOp::Ne => $a != $b,
            }
        };
    }

    match (lhs, rhs) {
        (Number::Int(a), Number::Int(b)) => cmp!(a, b),
        _ => cmp!(lhs.as_f64(), rhs.as_f64()),
    }
}
