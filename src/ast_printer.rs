//! Debug rendering of syntax trees as parenthesized prefix notation,
//! e.g. `(* (- 123) (group 45.67))`. Used by the `parse` subcommand.

use crate::ast::{Expr, FunctionDecl, LiteralValue, Stmt};

#[derive(Debug, Default)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn new() -> Self {
        AstPrinter
    }

    pub fn print_stmt(&self, stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("(expr {})", self.print(expr)),

            Stmt::Print(expr) => format!("(print {})", self.print(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(expr) => format!("(var {} {})", name.lexeme, self.print(expr)),
                None => format!("(var {})", name.lexeme),
            },

            Stmt::Block(statements) => {
                let body: Vec<String> = statements.iter().map(|s| self.print_stmt(s)).collect();
                format!("(block {})", body.join(" "))
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    self.print(condition),
                    self.print_stmt(then_branch),
                    self.print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    self.print(condition),
                    self.print_stmt(then_branch)
                ),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                self.print(condition),
                self.print_stmt(body)
            ),

            Stmt::Function(decl) => self.print_function("fun", decl),

            Stmt::Return { value, .. } => match value {
                Some(expr) => format!("(return {})", self.print(expr)),
                None => "(return)".to_owned(),
            },

            Stmt::Class {
                name,
                superclass,
                methods,
            } => {
                let mut rendered: String = format!("(class {}", name.lexeme);

                if let Some(superclass) = superclass {
                    rendered.push_str(&format!(" < {}", self.print(superclass)));
                }

                for method in methods {
                    rendered.push(' ');
                    rendered.push_str(&self.print_function("method", method));
                }

                rendered.push(')');
                rendered
            }
        }
    }

    pub fn print(&self, expr: &Expr) -> String {
        match expr {
            Expr::Literal(literal) => match literal {
                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 {
                        format!("{:.0}", n)
                    } else {
                        format!("{}", n)
                    }
                }
                LiteralValue::Str(s) => s.clone(),
                LiteralValue::True => "true".to_owned(),
                LiteralValue::False => "false".to_owned(),
                LiteralValue::Nil => "nil".to_owned(),
            },

            Expr::Grouping(inner) => self.parenthesize("group", &[inner]),

            Expr::Unary { operator, right } => self.parenthesize(&operator.lexeme, &[right]),

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => self.parenthesize(&operator.lexeme, &[left, right]),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, self.print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut rendered: String = format!("(call {}", self.print(callee));

                for argument in arguments {
                    rendered.push(' ');
                    rendered.push_str(&self.print(argument));
                }

                rendered.push(')');
                rendered
            }

            Expr::Get { object, name } => {
                format!("(. {} {})", self.print(object), name.lexeme)
            }

            Expr::Set {
                object,
                name,
                value,
            } => format!(
                "(.= {} {} {})",
                self.print(object),
                name.lexeme,
                self.print(value)
            ),

            Expr::This { .. } => "this".to_owned(),

            Expr::Super { method, .. } => format!("(super {})", method.lexeme),
        }
    }

    fn print_function(&self, kind: &str, decl: &FunctionDecl) -> String {
        let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
        let body: Vec<String> = decl.body.iter().map(|s| self.print_stmt(s)).collect();

        format!(
            "({} {} ({}) {})",
            kind,
            decl.name.lexeme,
            params.join(" "),
            body.join(" ")
        )
    }

    fn parenthesize(&self, name: &str, exprs: &[&Expr]) -> String {
        let mut rendered: String = format!("({}", name);

        for expr in exprs {
            rendered.push(' ');
            rendered.push_str(&self.print(expr));
        }

        rendered.push(')');
        rendered
    }
}
