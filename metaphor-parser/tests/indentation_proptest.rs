//! Property-based tests for indentation tracking
//!
//! These tests check the lexer's indentation invariants over generated sources:
//! - whole-level indents and outdents always balance
//! - a delta that is not a whole number of levels yields exactly one bad-indent token
//!   and no partial `Indent`/`Outdent` tokens
//! - the token stream always ends with `EndOfFile`

use metaphor_parser::metaphor::lexing::IndentationLexer;
use metaphor_parser::metaphor::token::{Token, TokenType};
use proptest::prelude::*;

fn count(tokens: &[Token], kind: TokenType) -> usize {
    tokens.iter().filter(|t| t.kind == kind).count()
}

/// Generate one source line: some leading spaces and a keyword, text, blank or comment
fn line_strategy() -> impl Strategy<Value = String> {
    let content = prop_oneof![
        Just("Role:".to_string()),
        Just("Context: Name".to_string()),
        Just("action:".to_string()),
        Just("Include: file.m6r".to_string()),
        Just("# comment".to_string()),
        Just(String::new()),
        "[a-z][a-z ]{0,15}",
    ];
    (0usize..14, content).prop_map(|(spaces, content)| format!("{}{}", " ".repeat(spaces), content))
}

proptest! {
    #[test]
    fn indent_then_outdent_returns_to_column_one(unit in 1usize..=8, levels in 1usize..=6) {
        let source = format!("Role:\n{}text\nAction:\n", " ".repeat(unit * levels));
        let tokens = IndentationLexer::tokenize_all(&source, "p.m6r", unit);

        prop_assert_eq!(count(&tokens, TokenType::Indent), levels);
        prop_assert_eq!(count(&tokens, TokenType::Outdent), levels);

        let action = tokens.iter().find(|t| t.kind == TokenType::Action);
        prop_assert_eq!(action.map(|t| t.column), Some(1));
    }

    #[test]
    fn partial_indent_yields_single_bad_indent(unit in 2usize..=8, spaces in 1usize..40) {
        prop_assume!(spaces % unit != 0);
        let source = format!("Role:\n{}text\n", " ".repeat(spaces));
        let tokens = IndentationLexer::tokenize_all(&source, "p.m6r", unit);

        prop_assert_eq!(count(&tokens, TokenType::BadIndent), 1);
        prop_assert_eq!(count(&tokens, TokenType::Indent), 0);
        prop_assert_eq!(count(&tokens, TokenType::Outdent), 0);
        // The offending line produces nothing else
        prop_assert_eq!(count(&tokens, TokenType::Text), 0);
    }

    #[test]
    fn partial_outdent_yields_single_bad_outdent(unit in 2usize..=8, short in 1usize..8) {
        prop_assume!(short < unit);
        let source = format!(
            "Context:\n{}Context:\n{}Role:\n",
            " ".repeat(unit),
            " ".repeat(short)
        );
        let tokens = IndentationLexer::tokenize_all(&source, "p.m6r", unit);

        prop_assert_eq!(count(&tokens, TokenType::BadOutdent), 1);
        prop_assert_eq!(count(&tokens, TokenType::Role), 0);
        // Only the end-of-input unwinding outdents
        prop_assert_eq!(count(&tokens, TokenType::Indent), 1);
        prop_assert_eq!(count(&tokens, TokenType::Outdent), 1);
    }

    #[test]
    fn arbitrary_sources_stay_balanced(lines in prop::collection::vec(line_strategy(), 0..30)) {
        let source = lines.join("\n");
        let tokens = IndentationLexer::tokenize_all(&source, "p.m6r", 4);

        prop_assert_eq!(
            count(&tokens, TokenType::Indent),
            count(&tokens, TokenType::Outdent)
        );
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenType::EndOfFile));
        prop_assert_eq!(count(&tokens, TokenType::EndOfFile), 1);
        for token in &tokens {
            prop_assert!(token.line >= 1 && token.column >= 1);
        }
    }
}
