/// A numeric literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(val) => val as f64,
            Number::Float(val) => val,
        }
    }
}

/// An arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Returns the `(left, right)` binding power of the operator.
    /// A right binding power greater than the left one makes the operator left associative.
    pub fn binding_power(self) -> (u8, u8) {
        match self {
            /* Additive */
            BinOp::Add | BinOp::Sub => (1, 2),
            /* Multiplicative */
            BinOp::Mul | BinOp::Div => (3, 4),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
        }
    }
}

/// A comparison operator. Only valid at the top of a [`Condition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

impl CmpOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Lt => "<",
            CmpOp::Ge => ">=",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
            CmpOp::Ne => "!=",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(Number),
    /// A variable reference (e.g. `foo`).
    Variable(String),
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: BinOp,
        rhs: Box<Expr>,
    },
}

/// A single comparison (e.g. `i < 10`).
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: CmpOp,
    pub lhs: Expr,
    pub rhs: Expr,
}

/// The declared kind of a variable. Recorded but not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeName {
    Int,
    Float,
}

impl TypeName {
    pub fn keyword(self) -> &'static str {
        match self {
            TypeName::Int => "int",
            TypeName::Float => "float",
        }
    }
}

/// `ident = value`. Also used for the step clause of a `for` loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub ident: String,
    pub value: Expr,
}

pub type Block = Vec<Stmt>;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration {
        ty: TypeName,
        idents: Vec<String>,
    },
    Assignment(Assignment),
    If {
        condition: Condition,
        then_block: Block,
        else_block: Option<Block>,
    },
    While {
        condition: Condition,
        body: Block,
    },
    For {
        init: Assignment,
        condition: Condition,
        step: Assignment,
        body: Block,
    },
    Print(Vec<Expr>),
}

impl Stmt {
    /// Short name of the statement kind, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Stmt::Declaration { .. } => "declaration",
            Stmt::Assignment(_) => "assignment",
            Stmt::If { .. } => "if",
            Stmt::While { .. } => "while",
            Stmt::For { .. } => "for",
            Stmt::Print(_) => "print",
        }
    }
}

/// A parsed program. Always contains at least one statement.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Stmt>,
}
