#[cfg(test)]
mod scanner_tests {
    use loxide as lox;

    use lox::scanner::*;
    use lox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_arithmetic() {
        assert_token_sequence(
            "1 + 2",
            &[
                (TokenType::NUMBER(1.0), "1"),
                (TokenType::PLUS, "+"),
                (TokenType::NUMBER(2.0), "2"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_maximal_munch() {
        assert_token_sequence(
            "! != = == < <= > >=",
            &[
                (TokenType::BANG, "!"),
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::EQUAL, "="),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::LESS, "<"),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::GREATER, ">"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_keywords_and_identifiers() {
        assert_token_sequence(
            "var language = nil; classy",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "language"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::IDENTIFIER, "classy"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_05_string_and_fractional_number() {
        assert_token_sequence(
            "\"hi\" 3.14 5.",
            &[
                (TokenType::STRING("hi".to_owned()), "\"hi\""),
                (TokenType::NUMBER(3.14), "3.14"),
                // The trailing '.' is not part of the number.
                (TokenType::NUMBER(5.0), "5"),
                (TokenType::DOT, "."),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_number_display_keeps_large_integral_values_exact() {
        let tokens: Vec<_> = Scanner::new("9223372036854775808 7")
            .filter_map(Result::ok)
            .collect();

        // 2^63 is exactly representable as f64 but exceeds i64.
        assert_eq!(
            tokens[0].to_string(),
            "NUMBER 9223372036854775808 9223372036854775808.0"
        );
        assert_eq!(tokens[1].to_string(), "NUMBER 7 7.0");
    }

    #[test]
    fn test_scanner_06_comments_and_lines() {
        let source = "// leading comment\nfoo // trailing\nbar";
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].lexeme, "foo");
        assert_eq!(tokens[0].line, 2);
        assert_eq!(tokens[1].lexeme, "bar");
        assert_eq!(tokens[1].line, 3);
        assert!(matches!(tokens[2].token_type, TokenType::EOF));
    }

    #[test]
    fn test_scanner_07_multiline_string_counts_lines() {
        let source = "\"a\nb\"\nafter";
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens[0].token_type, TokenType::STRING("a\nb".to_owned()));
        assert_eq!(tokens[1].lexeme, "after");
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // Expected sequence: COMMA, DOT, error for '$', LEFT_PAREN,
        // error for '#', EOF.
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        let error_count = results.iter().filter(|r| r.is_err()).count();
        assert_eq!(error_count, 2, "Expected 2 error messages");

        for err in results.iter().filter_map(|r| r.as_ref().err()) {
            let message = err.to_string();
            assert!(
                message.contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                message
            );
        }

        assert!(matches!(
            results[5].as_ref().unwrap().token_type,
            TokenType::EOF
        ));
    }

    #[test]
    fn test_non_ascii_character_reports_once() {
        // A multi-byte scalar yields one error naming the character, not
        // one garbled error per byte.
        let results: Vec<_> = Scanner::new("é+").collect();

        assert_eq!(results.len(), 3);

        let err = results[0].as_ref().err().expect("expected a lexical error");
        assert!(err.to_string().contains("Unexpected character: é"));

        assert_eq!(results[1].as_ref().unwrap().token_type, TokenType::PLUS);
        assert!(matches!(
            results[2].as_ref().unwrap().token_type,
            TokenType::EOF
        ));
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        let source = "\"still open";
        let results: Vec<_> = Scanner::new(source).collect();

        let err = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .next()
            .expect("expected a lexical error");

        assert!(err.to_string().contains("Unterminated string"));
        assert!(err.to_string().contains("[line 1]"));
    }

    #[test]
    fn test_scan_tokens_collects_errors_through_reporter() {
        let mut reporter = lox::report::Reporter::new();
        let tokens = Scanner::new("var $ x#").scan_tokens(&mut reporter);

        assert!(reporter.had_error());
        assert_eq!(reporter.diagnostics().len(), 2);

        // Valid tokens survive around the bad bytes.
        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["var", "x", ""]);
    }
}
