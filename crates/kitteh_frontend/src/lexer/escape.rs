use std::str::Chars;

use super::{LexerWarning, LexerWarningKind};
use crate::unicode::CharNames;

/// Replaces the escape sequences in a string body.
///
/// `:{name}` is left alone since interpolation happens at run time. Escapes
/// that can't be resolved are kept as written and reported as warnings.
pub(super) fn substitute_escapes(
    body: &str,
    char_names: &dyn CharNames,
    (line, column): (u32, u32),
    warnings: &mut Vec<LexerWarning>,
) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    let mut warn = |kind: LexerWarningKind| warnings.push(LexerWarning { kind, line, column });

    while let Some(ch) = chars.next() {
        if ch != ':' {
            out.push(ch);
            continue;
        }

        match chars.next() {
            Some(')') => out.push('\n'),
            Some('>') => out.push('\t'),
            Some('o') => out.push('\u{7}'),
            Some('"') => out.push('"'),
            Some(':') => out.push(':'),

            Some('(') => match take_until(&mut chars, ')') {
                Some(hex) => match parse_code_point(hex) {
                    Some(ch) => out.push(ch),
                    None => {
                        warn(LexerWarningKind::InvalidCodePoint(hex.to_owned()));
                        out.push_str(&format!(":({hex})"));
                    }
                },
                None => out.push_str(":("),
            },

            Some('[') => match take_until(&mut chars, ']') {
                Some(name) => match char_names.lookup(name) {
                    Some(ch) => out.push(ch),
                    None => {
                        warn(LexerWarningKind::UnknownCharName(name.to_owned()));
                        out.push_str(&format!(":[{name}]"));
                    }
                },
                None => out.push_str(":["),
            },

            Some(other) => {
                out.push(':');
                out.push(other);
            }

            None => out.push(':'),
        }
    }

    out
}

/// Splits off everything up to `close`, leaving `chars` just past it.
fn take_until<'a>(chars: &mut Chars<'a>, close: char) -> Option<&'a str> {
    let rest = chars.as_str();
    let end = rest.find(close)?;

    *chars = rest[end + close.len_utf8()..].chars();
    Some(&rest[..end])
}

fn parse_code_point(hex: &str) -> Option<char> {
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
