use insta::assert_debug_snapshot;

use super::{Lexer, LexerWarningKind};
use crate::error::{SyntaxError, SyntaxErrorKind, SyntaxResult};

fn lex(source: &str) -> SyntaxResult<Vec<(String, u32, u32)>> {
    let mut lexer = Lexer::new(source.as_bytes());
    let mut lexemes = vec![];

    while let Some(text) = lexer.next_lexeme().map(|l| l.text.map(|t| (t, l.line, l.column)))? {
        lexemes.push(text);
    }

    Ok(lexemes)
}

macro_rules! assert_lex {
    ($source:expr, [$(($text:expr, $line:expr, $column:expr)),* $(,)?]) => {{
        let expected: Vec<(String, u32, u32)> = vec![$(($text.to_owned(), $line, $column)),*];
        assert_eq!(lex($source).unwrap(), expected);
    }};
}

fn lex_err(source: &str) -> SyntaxError {
    lex(source).unwrap_err()
}

#[test]
fn line_endings_are_normalised() {
    assert_lex!(
        "\n \r\n \r ",
        [("\n", 1, 1), ("\n", 2, 2), ("\n", 3, 2), ("\n", 4, 2)]
    );
}

#[test]
fn whitespace_separates_lexemes() {
    assert_lex!(
        "abc  def   \t\tghi",
        [("abc", 1, 1), ("def", 1, 6), ("ghi", 1, 14), ("\n", 1, 17)]
    );
}

#[test]
fn newlines_separate_lexemes() {
    assert_lex!(
        "abc\rdef\nghi",
        [
            ("abc", 1, 1),
            ("\n", 1, 4),
            ("def", 2, 1),
            ("\n", 2, 4),
            ("ghi", 3, 1),
            ("\n", 3, 4),
        ]
    );
}

#[test]
fn bang_and_comma() {
    assert_lex!(
        "abc! ,def ,",
        [
            ("abc", 1, 1),
            ("!", 1, 4),
            ("\n", 1, 6),
            ("def", 1, 7),
            ("\n", 1, 11),
            ("\n", 1, 12),
        ]
    );
}

#[test]
fn continuation_joins_lines() {
    assert_lex!(
        "abc...\ndef…\nghi",
        [("abc", 1, 1), ("def", 2, 1), ("ghi", 3, 1), ("\n", 3, 4)]
    );
}

#[test]
fn continuation_needs_a_non_empty_line() {
    assert_eq!(
        lex_err("abc...\n  \n"),
        SyntaxError::new(SyntaxErrorKind::EmptyContinuationLine, 1, 4)
    );
    assert_eq!(
        lex_err("abc...").kind,
        SyntaxErrorKind::EmptyContinuationLine
    );
}

#[test]
fn ellipsis_in_the_middle_of_a_line() {
    assert_lex!(
        "a...b",
        [("a", 1, 1), ("...", 1, 2), ("b", 1, 5), ("\n", 1, 6)]
    );
}

#[test]
fn line_comment_keeps_the_newline() {
    assert_lex!(
        "abc BTW it's a comment\ndef",
        [("abc", 1, 1), ("\n", 1, 23), ("def", 2, 1), ("\n", 2, 4)]
    );
}

#[test]
fn block_comment() {
    assert_lex!(
        "ABC\nOBTW this is a long comment block\n  see, more\n  and here\nTLDR\nDEF",
        [
            ("ABC", 1, 1),
            ("\n", 1, 4),
            ("\n", 5, 5),
            ("DEF", 6, 1),
            ("\n", 6, 4),
        ]
    );
}

#[test]
fn commands_around_block_comment() {
    assert_lex!(
        "ABC, OBTW\n  this is comment\n  valid comment\nTLDR, DEF",
        [("ABC", 1, 1), ("\n", 1, 4), ("DEF", 4, 7), ("\n", 4, 10)]
    );
}

#[test]
fn block_comment_only_starts_a_command() {
    assert_lex!("ABC OBTW", [("ABC", 1, 1), ("OBTW", 1, 5), ("\n", 1, 9)]);
}

#[test]
fn unterminated_block_comment() {
    assert_eq!(
        lex_err("OBTW\nno end in sight\nTLDRX\n"),
        SyntaxError::new(SyntaxErrorKind::UnterminatedComment, 1, 1)
    );
}

#[test]
fn strings() {
    assert_debug_snapshot!(lex(r#"VISIBLE "hai world"! "" "a:"b""#).unwrap(), @r###"
    [
        (
            "VISIBLE",
            1,
            1,
        ),
        (
            "\"hai world\"",
            1,
            9,
        ),
        (
            "!",
            1,
            20,
        ),
        (
            "\"\"",
            1,
            22,
        ),
        (
            "\"a\"b\"",
            1,
            25,
        ),
        (
            "\n",
            1,
            31,
        ),
    ]
    "###);
}

#[test]
fn string_escapes() {
    assert_lex!(
        r#""a:)b::" "::{x}""#,
        [("\"a\nb:\"", 1, 1), ("\":{x}\"", 1, 10), ("\n", 1, 17)]
    );
}

#[test]
fn unterminated_strings() {
    assert_eq!(
        lex_err(r#"VISIBLE "abc"#),
        SyntaxError::new(SyntaxErrorKind::UnterminatedString, 1, 9)
    );
    assert_eq!(
        lex_err(r#"VISIBLE "abc"def"#).kind,
        SyntaxErrorKind::UnterminatedString
    );
}

#[test]
fn unknown_char_name_warns() {
    let mut lexer = Lexer::new(r#""a:[NOPE]""#.as_bytes());

    let lexeme = lexer.next_lexeme().unwrap();
    assert_eq!(lexeme.text.as_deref(), Some("\"a:[NOPE]\""));

    let warnings = lexer.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].kind,
        LexerWarningKind::UnknownCharName("NOPE".to_owned())
    );
}

#[test]
fn end_of_input_repeats() {
    let mut lexer = Lexer::new("x".as_bytes());

    lexer.next_lexeme().unwrap();
    lexer.next_lexeme().unwrap();

    assert_eq!(lexer.next_lexeme().unwrap().text, None);
    assert_eq!(lexer.next_lexeme().unwrap().text, None);
}
