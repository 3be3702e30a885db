#[cfg(test)]
mod parser_tests {
    use loxide as lox;

    use lox::ast::{Expr, LiteralValue, Stmt};
    use lox::ast_printer::AstPrinter;
    use lox::parser::Parser;
    use lox::report::Reporter;
    use lox::scanner::Scanner;
    use lox::token::TokenType;

    fn parse(source: &str) -> (Vec<Stmt>, Reporter) {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        let statements = Parser::new(&tokens, &mut reporter).parse();
        (statements, reporter)
    }

    fn parse_expr(source: &str) -> Expr {
        let (statements, reporter) = parse(&format!("{};", source));
        assert!(!reporter.had_error(), "unexpected parse error");
        assert_eq!(statements.len(), 1);

        match statements.into_iter().next().unwrap() {
            Stmt::Expression(expr) => expr,
            other => panic!("expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_precedence_shapes() {
        let printer = AstPrinter::new();

        assert_eq!(printer.print(&parse_expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
        assert_eq!(printer.print(&parse_expr("(1 + 2) * 3")), "(* (group (+ 1 2)) 3)");
        assert_eq!(printer.print(&parse_expr("-1 - -2")), "(- (- 1) (- 2))");
        assert_eq!(
            printer.print(&parse_expr("1 < 2 == true")),
            "(== (< 1 2) true)"
        );
    }

    #[test]
    fn test_logical_binds_looser_than_equality() {
        let printer = AstPrinter::new();

        assert_eq!(
            printer.print(&parse_expr("a == b or c and d")),
            "(or (== a b) (and c d))"
        );
    }

    #[test]
    fn test_call_and_property_chain_left_to_right() {
        // a.b(c).d → Get(Call(Get(a, b), [c]), d)
        let expr = parse_expr("a.b(c).d");

        let Expr::Get { object, name } = expr else {
            panic!("outermost node should be a property access");
        };
        assert_eq!(name.lexeme, "d");

        let Expr::Call { callee, arguments, .. } = *object else {
            panic!("expected a call under the outer access");
        };
        assert_eq!(arguments.len(), 1);

        let Expr::Get { object, name } = *callee else {
            panic!("expected a property access as the callee");
        };
        assert_eq!(name.lexeme, "b");
        assert!(matches!(*object, Expr::Variable { .. }));
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let printer = AstPrinter::new();

        assert_eq!(printer.print(&parse_expr("a = b = c")), "(= a (= b c))");
    }

    #[test]
    fn test_invalid_assignment_target_is_reported_not_fatal() {
        let (statements, reporter) = parse("a + b = c;");

        assert!(reporter.had_error());
        assert!(reporter.diagnostics()[0].contains("Invalid assignment target"));

        // The statement still parses; the un-assignable LHS stands in.
        assert_eq!(statements.len(), 1);
    }

    #[test]
    fn test_recovery_surfaces_multiple_errors() {
        let (statements, reporter) = parse("var = 1;\nprint 2;\nvar = 3;\nprint 4;");

        assert_eq!(reporter.diagnostics().len(), 2);
        for diagnostic in reporter.diagnostics() {
            assert!(diagnostic.contains("Expected variable name"));
        }

        // The two well-formed prints survive recovery.
        assert_eq!(statements.len(), 2);
        assert!(matches!(statements[0], Stmt::Print(_)));
        assert!(matches!(statements[1], Stmt::Print(_)));
    }

    #[test]
    fn test_missing_expression_names_the_offending_token() {
        let (_, reporter) = parse("print ;");

        assert!(reporter.had_error());
        assert!(reporter.diagnostics()[0].contains("Error at ';'"));
        assert!(reporter.diagnostics()[0].contains("Expected expression"));
    }

    #[test]
    fn test_error_at_eof_uses_at_end_location() {
        let (_, reporter) = parse("print 1");

        assert!(reporter.had_error());
        assert!(reporter.diagnostics()[0].contains("Error at end"));
    }

    #[test]
    fn test_for_desugars_into_block_and_while() {
        let (statements, reporter) =
            parse("for (var i = 0; i < 3; i = i + 1) print i;");
        assert!(!reporter.had_error());
        assert_eq!(statements.len(), 1);

        // { var i = 0; while (i < 3) { print i; i = i + 1; } }
        let Stmt::Block(outer) = &statements[0] else {
            panic!("for with an initializer should desugar to a block");
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(outer[0], Stmt::Var { .. }));

        let Stmt::While { condition, body } = &outer[1] else {
            panic!("expected the loop itself");
        };
        assert!(matches!(condition, Expr::Binary { .. }));

        let Stmt::Block(inner) = body.as_ref() else {
            panic!("for with an increment should wrap the body in a block");
        };
        assert_eq!(inner.len(), 2);
        assert!(matches!(inner[0], Stmt::Print(_)));
        assert!(matches!(inner[1], Stmt::Expression(Expr::Assign { .. })));
    }

    #[test]
    fn test_for_without_condition_loops_on_true() {
        let (statements, reporter) = parse("for (;;) print 1;");
        assert!(!reporter.had_error());

        let Stmt::While { condition, .. } = &statements[0] else {
            panic!("bare for should desugar straight to a while");
        };
        assert_eq!(*condition, Expr::Literal(LiteralValue::True));
    }

    #[test]
    fn test_class_declaration_shape() {
        let (statements, reporter) = parse(
            "class Espresso < Coffee {\n  init(size) { this.size = size; }\n  brew() { return 1; }\n}",
        );
        assert!(!reporter.had_error());

        let Stmt::Class {
            name,
            superclass,
            methods,
        } = &statements[0]
        else {
            panic!("expected a class declaration");
        };

        assert_eq!(name.lexeme, "Espresso");
        assert!(matches!(superclass, Some(Expr::Variable { .. })));
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name.lexeme, "init");
        assert_eq!(methods[0].params.len(), 1);
        assert_eq!(methods[1].name.lexeme, "brew");
    }

    #[test]
    fn test_super_and_this_expressions() {
        let expr = parse_expr("super.brew");
        assert!(matches!(expr, Expr::Super { ref method, .. } if method.lexeme == "brew"));

        let expr = parse_expr("this");
        assert!(matches!(expr, Expr::This { .. }));
    }

    #[test]
    fn test_return_without_value() {
        let (statements, reporter) = parse("fun f() { return; }");
        assert!(!reporter.had_error());

        let Stmt::Function(decl) = &statements[0] else {
            panic!("expected a function declaration");
        };
        assert!(matches!(
            decl.body[0],
            Stmt::Return {
                value: None,
                ref keyword
            } if keyword.token_type == TokenType::RETURN
        ));
    }
}
