#[cfg(test)]
mod resolver_tests {
    use loxide as lox;

    use std::collections::HashMap;

    use lox::ast::{Expr, ExprId, Stmt};
    use lox::parser::Parser;
    use lox::report::Reporter;
    use lox::resolver::Resolver;
    use lox::scanner::Scanner;

    fn resolve(source: &str) -> (Vec<Stmt>, HashMap<ExprId, usize>, Reporter) {
        let mut reporter = Reporter::new();
        let tokens = Scanner::new(source).scan_tokens(&mut reporter);
        let statements = Parser::new(&tokens, &mut reporter).parse();
        assert!(!reporter.had_error(), "source should parse cleanly");

        let locals = Resolver::new(&mut reporter).resolve(&statements);
        (statements, locals, reporter)
    }

    fn diagnostics_of(source: &str) -> Vec<String> {
        let (_, _, reporter) = resolve(source);
        reporter.diagnostics().to_vec()
    }

    #[test]
    fn test_duplicate_declaration_in_block() {
        let diagnostics = diagnostics_of("{ var a = 1; var a = 2; }");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("Already a variable with this name in this scope"));
    }

    #[test]
    fn test_top_level_redeclaration_is_legal() {
        let diagnostics = diagnostics_of("var a = 1; var a = 2;");

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_read_local_in_its_own_initializer() {
        let diagnostics = diagnostics_of("var a = 1; { var a = a; }");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("Can't read local variable in its own initializer"));
    }

    #[test]
    fn test_global_initializer_may_reference_itself() {
        // No enclosing block scope, so the declared-but-undefined check
        // does not apply; this is a runtime concern at worst.
        assert!(diagnostics_of("var a = a;").is_empty());
    }

    #[test]
    fn test_return_outside_function() {
        let diagnostics = diagnostics_of("return 1;");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("Can't return from top-level code"));
    }

    #[test]
    fn test_return_value_from_initializer() {
        let diagnostics = diagnostics_of("class C { init() { return 1; } }");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("Can't return a value from an initializer"));
    }

    #[test]
    fn test_bare_return_from_initializer_is_legal() {
        assert!(diagnostics_of("class C { init() { return; } }").is_empty());
    }

    #[test]
    fn test_this_outside_class() {
        let diagnostics = diagnostics_of("print this;");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("Can't use 'this' outside of a class"));
    }

    #[test]
    fn test_super_misuse() {
        let diagnostics = diagnostics_of("print super.x;");
        assert!(diagnostics[0].contains("Can't use 'super' outside of a class"));

        let diagnostics = diagnostics_of("class C { m() { return super.x; } }");
        assert!(diagnostics[0].contains("Can't use 'super' in a class with no superclass"));
    }

    #[test]
    fn test_class_cannot_inherit_from_itself() {
        let diagnostics = diagnostics_of("class C < C {}");

        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].contains("A class can't inherit from itself"));
    }

    #[test]
    fn test_all_static_errors_surface_in_one_pass() {
        let diagnostics = diagnostics_of(
            "return 1;\n{ var a = 1; var a = 2; }\nprint this;",
        );

        assert_eq!(diagnostics.len(), 3);
    }

    #[test]
    fn test_distances_for_nested_blocks() {
        // print a; reads across one scope boundary.
        let (statements, locals, reporter) =
            resolve("{ var a = 1; { print a; } }");
        assert!(!reporter.had_error());

        let Stmt::Block(outer) = &statements[0] else {
            panic!("expected a block");
        };
        let Stmt::Block(inner) = &outer[1] else {
            panic!("expected the inner block");
        };
        let Stmt::Print(Expr::Variable { id, .. }) = &inner[0] else {
            panic!("expected a variable read");
        };

        assert_eq!(locals.get(id), Some(&1));
    }

    #[test]
    fn test_global_references_are_absent_from_the_table() {
        let (statements, locals, _) = resolve("var a = 1; print a;");

        let Stmt::Print(Expr::Variable { id, .. }) = &statements[1] else {
            panic!("expected a variable read");
        };

        assert!(locals.get(id).is_none());
    }

    #[test]
    fn test_closure_distance_through_function_scope() {
        // Inside makeCounter's returned closure, `i` is one function scope
        // out from the reference.
        let (statements, locals, reporter) = resolve(
            "fun makeCounter() {\n  var i = 0;\n  fun count() { i = i + 1; return i; }\n  return count;\n}",
        );
        assert!(!reporter.had_error());

        let Stmt::Function(outer) = &statements[0] else {
            panic!("expected makeCounter");
        };
        let Stmt::Function(inner) = &outer.body[1] else {
            panic!("expected the nested count function");
        };
        let Stmt::Expression(Expr::Assign { id, .. }) = &inner.body[0] else {
            panic!("expected the increment assignment");
        };

        assert_eq!(locals.get(id), Some(&1));
    }

    #[test]
    fn test_this_and_super_distances_in_methods() {
        let (statements, locals, reporter) = resolve(
            "class A { m() {} }\nclass B < A {\n  m() { print this; return super.m; }\n}",
        );
        assert!(!reporter.had_error());

        let Stmt::Class { methods, .. } = &statements[1] else {
            panic!("expected class B");
        };
        let body = &methods[0].body;

        // Method body scope → this scope: one hop.
        let Stmt::Print(Expr::This { id, .. }) = &body[0] else {
            panic!("expected a this read");
        };
        assert_eq!(locals.get(id), Some(&1));

        // Method body scope → this scope → super scope: two hops.
        let Stmt::Return {
            value: Some(Expr::Super { id, .. }),
            ..
        } = &body[1]
        else {
            panic!("expected a super read");
        };
        assert_eq!(locals.get(id), Some(&2));
    }
}
