//! Abstract syntax tree for Lox: two closed sum types, one per node family.
//!
//! The tree is immutable once the parser returns it. Variable-reference
//! nodes (`Variable`, `Assign`, `This`, `Super`) carry an [`ExprId`] — a
//! stable identity the resolver uses as the key of its binding-distance
//! table. Nodes are never compared structurally for that purpose.
//!
//! Function declarations are shared (`Rc<FunctionDecl>`) rather than owned
//! by their statement so a closure created at runtime can keep its body
//! alive after the statement list that declared it has been dropped (the
//! REPL relies on this).

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::token::Token;

/// Stable identity for a variable-reference node.
///
/// Drawn from a process-wide counter so ids never collide across parses —
/// a REPL session feeds many ASTs to one interpreter, and the resolution
/// table accumulates entries keyed by these ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(usize);

impl ExprId {
    /// Allocate the next unused id.
    pub fn next() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        ExprId(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// A **literal constant** appearing directly in the source. These are the
/// terminal leaves of the expression tree; the parser copies the value out
/// of the token at parse time.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal, stored as IEEE-754 `f64`. Integral lexemes such as
    /// `"3"` are still parsed as `3.0`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    /// The boolean constant `true`.
    True,

    /// The boolean constant `false`.
    False,

    /// The `nil` literal.
    Nil,
}

/// Expression node. Parent exclusively owns children; no cycles.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal constant: number, string, `true`, `false`, or `nil`.
    Literal(LiteralValue),

    /// Parenthesised sub-expression: `"(" expression ")"`.
    Grouping(Box<Expr>),

    /// Prefix unary operator expression: `!isReady`, `-42`.
    Unary {
        /// The operator token (`!` or `-`).
        operator: Token,
        right: Box<Expr>,
    },

    /// Infix binary operator expression: `a + b`, `x <= y`.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short-circuiting `and` / `or`. Yields an operand value, not a bool.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Variable access.
    Variable { name: Token, id: ExprId },

    /// Assignment expression: `identifier "=" expression`.
    Assign {
        name: Token,
        value: Box<Expr>,
        id: ExprId,
    },

    /// Function- or method-call expression.
    Call {
        /// Expression that evaluates to a callable.
        callee: Box<Expr>,
        /// The closing `)` token, retained for error attribution.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// Property access: `object.name`.
    Get { object: Box<Expr>, name: Token },

    /// Property assignment: `object.name = value`.
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },

    /// The `this` keyword inside a method body.
    This { keyword: Token, id: ExprId },

    /// `super.method` inside a subclass method body.
    Super {
        keyword: Token,
        method: Token,
        id: ExprId,
    },
}

/// A function or method declaration: name, parameter tokens, body.
///
/// Shared via `Rc` between the AST and any runtime `Function` values closed
/// over it.
#[derive(Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: Token,

    /// Parameter name tokens (arity ≤ 255, enforced by the parser).
    pub params: Vec<Token>,

    /// Body executed when the function is called.
    pub body: Vec<Stmt>,
}

/// Statement node. A program is an ordered sequence of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// Stand-alone expression terminated by a semicolon.
    Expression(Expr),

    /// `print` statement.
    Print(Expr),

    /// Variable declaration: `"var" IDENT ("=" initializer)? ";"`.
    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    /// Braced scope containing zero or more declarations/statements.
    Block(Vec<Stmt>),

    /// `if` / `else` conditional.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    /// `while` loop. `for` syntax desugars into `Block`/`While` in the
    /// parser, so no dedicated loop variant exists beyond this one.
    While { condition: Expr, body: Box<Stmt> },

    /// Function declaration; becomes a first-class callable value.
    Function(Rc<FunctionDecl>),

    /// `return` statement inside a function body. Absent value ⇒ `nil`.
    Return {
        /// The `return` keyword token (for error attribution).
        keyword: Token,
        value: Option<Expr>,
    },

    /// Class declaration with an optional superclass (always an
    /// `Expr::Variable`, resolved like any other name) and its methods.
    Class {
        name: Token,
        superclass: Option<Expr>,
        methods: Vec<Rc<FunctionDecl>>,
    },
}
