use insta::assert_json_snapshot;

use super::Tokenizer;
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};
use crate::token::{Keyword, Token, TokenKind};

fn tokenize(source: &str) -> SyntaxResult<Vec<Token>> {
    let mut tokenizer = Tokenizer::from_reader(source.as_bytes());
    let mut tokens = vec![];

    loop {
        let token = tokenizer.next_token()?;
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        tokens.push(token);
    }
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn kw(keyword: Keyword) -> TokenKind {
    TokenKind::Keyword(keyword)
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Identifier(name.to_owned())
}

#[test]
fn longest_match() {
    assert_eq!(
        kinds("ALL OF NOOB"),
        [kw(Keyword::AllOf), kw(Keyword::Noob), TokenKind::Newline]
    );
}

#[test]
fn positions_come_from_the_first_word() {
    assert_json_snapshot!(tokenize("I HAS A x").unwrap(), @r###"
    [
      {
        "kind": {
          "Keyword": "IHasA"
        },
        "line": 1,
        "column": 1
      },
      {
        "kind": {
          "Identifier": "x"
        },
        "line": 1,
        "column": 9
      },
      {
        "kind": "Newline",
        "line": 1,
        "column": 10
      }
    ]
    "###);
}

#[test]
fn shorter_keyword_when_the_longer_one_is_incomplete() {
    assert_eq!(
        kinds("AN YR x AN y"),
        [
            kw(Keyword::AnYr),
            ident("x"),
            kw(Keyword::An),
            ident("y"),
            TokenKind::Newline,
        ]
    );

    assert_eq!(
        kinds("BOTH SAEM x AN BOTH OF y"),
        [
            kw(Keyword::BothSaem),
            ident("x"),
            kw(Keyword::An),
            kw(Keyword::BothOf),
            ident("y"),
            TokenKind::Newline,
        ]
    );
}

#[test]
fn partial_keywords_are_identifiers() {
    assert_eq!(
        kinds("IM OUTTA x"),
        [ident("IM"), ident("OUTTA"), ident("x"), TokenKind::Newline]
    );
}

#[test]
fn keywords_with_punctuation() {
    assert_eq!(
        kinds("O RLY?, WTF?\nIM IN YR loop"),
        [
            kw(Keyword::ORly),
            TokenKind::Newline,
            kw(Keyword::Wtf),
            TokenKind::Newline,
            kw(Keyword::ImInYr),
            ident("loop"),
            TokenKind::Newline,
        ]
    );
}

#[test]
fn literals() {
    assert_eq!(
        kinds(r#"-5 2.5 WIN FAIL "yo" "" VISIBLE "x"!"#),
        [
            TokenKind::Integer(-5),
            TokenKind::Float(2.5),
            TokenKind::Bool(true),
            TokenKind::Bool(false),
            TokenKind::String("yo".to_owned()),
            TokenKind::String(String::new()),
            kw(Keyword::Visible),
            TokenKind::String("x".to_owned()),
            TokenKind::Bang,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn integer_overflow() {
    assert_eq!(
        tokenize("x R 100000000000000000000").unwrap_err(),
        SyntaxError::new(
            SyntaxErrorKind::IntegerOverflow("100000000000000000000".to_owned()),
            1,
            5
        )
    );
}

#[test]
fn unknown_tokens() {
    assert_eq!(
        tokenize("VISIBLE $x").unwrap_err(),
        SyntaxError::new(SyntaxErrorKind::UnknownToken("$x".to_owned()), 1, 9)
    );
    assert_eq!(
        tokenize("1.").unwrap_err().kind,
        SyntaxErrorKind::UnknownToken("1.".to_owned())
    );
}

#[test]
fn end_of_input_is_sticky() {
    let mut tokenizer = Tokenizer::from_reader("HAI".as_bytes());

    assert_eq!(tokenizer.next_token().unwrap().kind, kw(Keyword::Hai));
    assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Newline);
    assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Eof);
    assert_eq!(tokenizer.next_token().unwrap().kind, TokenKind::Eof);
}
