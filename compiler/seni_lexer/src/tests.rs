use super::*;
use pretty_assertions::assert_eq;
use seni_ir::Literal;

#[expect(clippy::unwrap_used, reason = "test input is known to lex")]
fn lex(source: &str) -> Vec<Token> {
    tokenize(source).unwrap()
}

fn values(tokens: &[Token]) -> Vec<Option<Literal>> {
    tokens.iter().map(|token| token.value.clone()).collect()
}

#[test]
fn call_with_numbers() {
    let tokens = lex("(+ 3 4.25)");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::ListStart,
            TokenKind::Name,
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::ListEnd,
        ]
    );
    assert_eq!(tokens[2].value, Some(Literal::Int(3)));
    assert_eq!(
        tokens[3].value,
        Some(Literal::Float {
            value: 4.25,
            decimals: 2
        })
    );
}

#[test]
fn commas_are_whitespace() {
    let tokens = lex("(vector 1, 2,3)");
    assert_eq!(
        values(&tokens[2..5]),
        vec![
            Some(Literal::Int(1)),
            Some(Literal::Int(2)),
            Some(Literal::Int(3))
        ]
    );
}

#[test]
fn minus_sign_number_or_name() {
    let tokens = lex("(- -5 x)");
    assert_eq!(tokens[1].text(), Some("-"));
    assert_eq!(tokens[2].value, Some(Literal::Int(-5)));

    let tokens = lex("-x -.5");
    assert_eq!(tokens[0].kind, TokenKind::Name);
    assert_eq!(tokens[0].text(), Some("-x"));
    assert_eq!(
        tokens[1].value,
        Some(Literal::Float {
            value: -0.5,
            decimals: 1
        })
    );
}

#[test]
fn labels_drop_colon() {
    let tokens = lex("(circle radius: 10)");
    assert_eq!(tokens[2].kind, TokenKind::Label);
    assert_eq!(tokens[2].text(), Some("radius"));
}

#[test]
fn symbol_names() {
    let tokens = lex("col/rgb vector/append <= on-matrix-stack");
    assert_eq!(
        tokens.iter().filter_map(Token::text).collect::<Vec<_>>(),
        vec!["col/rgb", "vector/append", "<=", "on-matrix-stack"]
    );
    assert!(tokens.iter().all(|token| token.kind == TokenKind::Name));
}

#[test]
fn strings_unescape() {
    let tokens = lex(r#"(print "say \"hi\"")"#);
    assert_eq!(tokens[2].kind, TokenKind::String);
    assert_eq!(tokens[2].text(), Some(r#"say "hi""#));
}

#[test]
fn quote_brackets_and_comments() {
    let tokens = lex("'(a) [4 (int)] ; note\n");
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::QuoteAbbrev,
            TokenKind::ListStart,
            TokenKind::Name,
            TokenKind::ListEnd,
            TokenKind::BracketStart,
            TokenKind::Int,
            TokenKind::ListStart,
            TokenKind::Name,
            TokenKind::ListEnd,
            TokenKind::BracketEnd,
            TokenKind::Comment,
        ]
    );
    assert_eq!(tokens[10].text(), Some(" note"));
}

#[test]
fn trivia_is_kept_on_request() {
    let tokens = tokenize_with_trivia("(a ,\n b)").unwrap_or_default();
    assert_eq!(
        kinds(&tokens),
        vec![
            TokenKind::ListStart,
            TokenKind::Name,
            TokenKind::Whitespace,
            TokenKind::Name,
            TokenKind::ListEnd,
        ]
    );
    assert_eq!(tokens[2].text(), Some(" ,\n "));
}

#[test]
fn unknown_character_fails_hard() {
    let error = tokenize("(+ 1 ~ 2)").err();
    let Some(error) = error else {
        panic!("expected a lex error");
    };
    assert_eq!(error.to_string(), "unknown token: ~");
    assert_eq!(error.token.kind, TokenKind::Unknown);
    assert_eq!(error.span(), Span::new(5, 6));
}

#[test]
fn unterminated_string_is_unknown() {
    let error = tokenize("(print \"abc").err();
    assert_eq!(
        error.map(|error| error.kind),
        Some(LexErrorKind::UnknownCharacter('"'))
    );
}

#[test]
fn spans_cover_source() {
    let tokens = lex("(abc 12)");
    assert_eq!(tokens[1].span, Span::new(1, 4));
    assert_eq!(tokens[2].span, Span::new(5, 7));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn integers_lex_to_themselves(n in -1_000_000i64..1_000_000) {
            let tokens = tokenize(&n.to_string()).unwrap_or_default();
            prop_assert_eq!(tokens.len(), 1);
            prop_assert_eq!(tokens[0].value.clone(), Some(Literal::Int(n)));
        }

        #[test]
        fn trivia_tokens_cover_every_byte(source in "[a-z0-9 (),;\\[\\]\n]{0,40}") {
            if let Ok(tokens) = tokenize_with_trivia(&source) {
                let covered: u32 = tokens.iter().map(|token| token.span.len()).sum();
                prop_assert_eq!(covered as usize, source.len());
            }
        }
    }
}
