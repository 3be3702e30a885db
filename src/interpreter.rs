//! Tree-walking evaluator.
//!
//! Execution is driven by two mutually recursive entry points: `execute`
//! for statements and `evaluate` for expressions. Statement execution
//! yields a [`Flow`] so a `return` deep inside nested blocks and loops can
//! unwind to the enclosing function call as an ordinary value, distinct
//! from the `Err` path that carries genuine runtime errors.
//!
//! Variable references consult the resolution table built by the resolver:
//! an entry means "exactly that many frames out", absence means "global".
//! The interpreter itself never inspects diagnostic state; it returns
//! errors and lets the driver decide what a failed run means.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::{self, Write};
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, FunctionDecl, LiteralValue, Stmt};
use crate::callable::{clock, Callable, Function};
use crate::class::{Instance, LoxClass};
use crate::environment::Environment;
use crate::error::{LoxError, Result};
use crate::report::Reporter;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Outcome of executing a statement: either control falls through to the
/// next statement, or a `return` is unwinding with its value.
#[derive(Debug)]
pub enum Flow {
    Normal,
    Return(Value),
}

pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// Build an interpreter writing `print` output to `out`. Tests capture
    /// program output this way.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Interpreter instantiated");

        let globals: Rc<RefCell<Environment>> = Rc::new(RefCell::new(Environment::new()));

        globals
            .borrow_mut()
            .define("clock", Value::Native(Rc::new(clock())));

        Interpreter {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
        }
    }

    /// Merge a resolution table for a newly resolved chunk. Node ids are
    /// globally unique, so tables from successive chunks never collide and
    /// earlier entries stay valid across interactive sessions.
    pub fn add_resolutions(&mut self, locals: HashMap<ExprId, usize>) {
        self.locals.extend(locals);
    }

    /// Run a program. The first runtime error aborts the remaining
    /// statements; everything already executed keeps its effects.
    pub fn interpret(&mut self, statements: &[Stmt], reporter: &mut Reporter) {
        info!("Interpreting {} statement(s)", statements.len());

        for stmt in statements {
            match self.execute(stmt) {
                Ok(_) => {}
                Err(err) => {
                    reporter.runtime_error(&err);
                    return;
                }
            }
        }
    }

    // ───────────────────────────── statements ─────────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value)?;
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                // Declaration without an initializer binds nil.
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let enclosing: Rc<RefCell<Environment>> = Rc::clone(&self.environment);
                let block_env = Environment::with_enclosing(enclosing);
                self.execute_block(statements, Rc::new(RefCell::new(block_env)))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch.as_deref() {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function(decl) => {
                // Capture the environment active at the declaration.
                let function = Function::new(
                    Rc::clone(decl),
                    Rc::clone(&self.environment),
                    false,
                );

                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Function(Rc::new(function)));

                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                Ok(Flow::Return(value))
            }

            Stmt::Class {
                name,
                superclass,
                methods,
            } => self.execute_class(name, superclass.as_ref(), methods),
        }
    }

    /// Execute statements with `environment` installed as the current
    /// frame, restoring the previous frame afterwards even on error. Also
    /// the entry point for user-defined function bodies.
    pub fn execute_block(
        &mut self,
        statements: &[Stmt],
        environment: Rc<RefCell<Environment>>,
    ) -> Result<Flow> {
        let previous: Rc<RefCell<Environment>> =
            std::mem::replace(&mut self.environment, environment);

        let mut flow: Result<Flow> = Ok(Flow::Normal);

        for stmt in statements {
            match self.execute(stmt) {
                Ok(Flow::Normal) => {}
                other => {
                    flow = other;
                    break;
                }
            }
        }

        self.environment = previous;
        flow
    }

    fn execute_class(
        &mut self,
        name: &Token,
        superclass: Option<&Expr>,
        methods: &[Rc<FunctionDecl>],
    ) -> Result<Flow> {
        debug!("Declaring class '{}'", name.lexeme);

        let superclass: Option<Rc<LoxClass>> = match superclass {
            Some(expr) => match self.evaluate(expr)? {
                Value::Class(class) => Some(class),
                _ => {
                    let sup_name: &Token = match expr {
                        Expr::Variable { name, .. } => name,
                        _ => name,
                    };

                    return Err(LoxError::runtime(sup_name, "Superclass must be a class"));
                }
            },
            None => None,
        };

        // Two-step definition lets methods close over the class binding.
        self.environment
            .borrow_mut()
            .define(&name.lexeme, Value::Nil);

        // With a superclass, methods close over an extra frame holding
        // 'super'; the resolver assigned distances assuming this frame.
        let method_closure: Rc<RefCell<Environment>> = match &superclass {
            Some(class) => {
                let mut env = Environment::with_enclosing(Rc::clone(&self.environment));
                env.define("super", Value::Class(Rc::clone(class)));
                Rc::new(RefCell::new(env))
            }
            None => Rc::clone(&self.environment),
        };

        let mut method_table: HashMap<String, Function> = HashMap::new();

        for method in methods {
            let is_initializer: bool = method.name.lexeme == "init";
            let function = Function::new(
                Rc::clone(method),
                Rc::clone(&method_closure),
                is_initializer,
            );

            method_table.insert(method.name.lexeme.clone(), function);
        }

        let class = LoxClass::new(name.lexeme.clone(), superclass, method_table);

        self.environment
            .borrow_mut()
            .assign(name, Value::Class(Rc::new(class)))?;

        Ok(Flow::Normal)
    }

    // ──────────────────────────── expressions ─────────────────────────────

    fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right: Value = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::MINUS => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(LoxError::runtime(operator, "Operand must be a number")),
                    },
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    _ => unreachable!("parser only builds '-' and '!' unary nodes"),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                // Both operands evaluate, left first, before any check.
                let left: Value = self.evaluate(left)?;
                let right: Value = self.evaluate(right)?;

                self.binary_op(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                // Short-circuit: yield the deciding operand itself, not a
                // coerced boolean.
                match operator.token_type {
                    TokenType::OR if left.is_truthy() => Ok(left),
                    TokenType::AND if !left.is_truthy() => Ok(left),
                    _ => self.evaluate(right),
                }
            }

            Expr::Variable { name, id } => self.look_up_variable(name, *id),

            Expr::Assign { name, value, id } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(
                            &self.environment,
                            distance,
                            &name.lexeme,
                            value.clone(),
                        );
                    }
                    None => {
                        self.globals.borrow_mut().assign(name, value.clone())?;
                    }
                }

                // Assignment is an expression yielding the assigned value.
                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut args: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }

                self.call_value(callee, args, paren)
            }

            Expr::Get { object, name } => match self.evaluate(object)? {
                Value::Instance(instance) => Instance::get(&instance, name),
                _ => Err(LoxError::runtime(name, "Only instances have properties")),
            },

            Expr::Set {
                object,
                name,
                value,
            } => match self.evaluate(object)? {
                Value::Instance(instance) => {
                    let value: Value = self.evaluate(value)?;
                    instance.borrow_mut().set(name, value.clone());
                    Ok(value)
                }
                _ => Err(LoxError::runtime(name, "Only instances have fields")),
            },

            Expr::This { keyword, id } => self.look_up_variable(keyword, *id),

            Expr::Super { keyword, method, id } => {
                let distance: usize = *self
                    .locals
                    .get(id)
                    .ok_or_else(|| LoxError::runtime(keyword, "Undefined variable 'super'"))?;

                let superclass: Rc<LoxClass> =
                    match Environment::get_at(&self.environment, distance, "super") {
                        Value::Class(class) => class,
                        _ => unreachable!("'super' frame always holds a class"),
                    };

                // 'this' lives one frame inside the 'super' frame.
                let instance: Rc<RefCell<Instance>> =
                    match Environment::get_at(&self.environment, distance - 1, "this") {
                        Value::Instance(instance) => instance,
                        _ => unreachable!("'this' frame always holds an instance"),
                    };

                match superclass.find_method(&method.lexeme) {
                    Some(found) => Ok(Value::Function(Rc::new(found.bind(instance)))),
                    None => Err(LoxError::runtime(
                        method,
                        format!("Undefined property '{}'", method.lexeme),
                    )),
                }
            }
        }
    }

    fn binary_op(&mut self, operator: &Token, left: Value, right: Value) -> Result<Value> {
        match operator.token_type {
            TokenType::PLUS => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => Err(LoxError::runtime(
                    operator,
                    "Operands must be two numbers or two strings",
                )),
            },

            TokenType::MINUS => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Number(a - b))
            }

            TokenType::STAR => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Number(a * b))
            }

            // Division follows IEEE 754: dividing by zero produces an
            // infinity, not an error.
            TokenType::SLASH => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Number(a / b))
            }

            TokenType::GREATER => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Bool(a > b))
            }

            TokenType::GREATER_EQUAL => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Bool(a >= b))
            }

            TokenType::LESS => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Bool(a < b))
            }

            TokenType::LESS_EQUAL => {
                let (a, b) = Self::number_operands(operator, left, right)?;
                Ok(Value::Bool(a <= b))
            }

            TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),

            TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

            _ => unreachable!("parser only builds binary nodes for binary operators"),
        }
    }

    fn number_operands(operator: &Token, left: Value, right: Value) -> Result<(f64, f64)> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok((a, b)),
            _ => Err(LoxError::runtime(operator, "Operands must be numbers")),
        }
    }

    /// Dispatch a call on any value, checking callability and arity.
    fn call_value(&mut self, callee: Value, args: Vec<Value>, paren: &Token) -> Result<Value> {
        let callable: &dyn Callable = match &callee {
            Value::Function(function) => function.as_ref(),
            Value::Native(native) => native.as_ref(),
            Value::Class(class) => class,
            _ => {
                return Err(LoxError::runtime(
                    paren,
                    "Can only call functions and classes",
                ));
            }
        };

        if args.len() != callable.arity() {
            return Err(LoxError::runtime(
                paren,
                format!(
                    "Expected {} arguments but got {}",
                    callable.arity(),
                    args.len()
                ),
            ));
        }

        callable.call(self, args)
    }

    fn look_up_variable(&mut self, name: &Token, id: ExprId) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(&self.environment, distance, &name.lexeme)),
            None => self.globals.borrow().get(name),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
