//! Lexical patterns for literals.
//!
//! These are shared between the tokenizer, which classifies lexemes, and the
//! interpreter, which decides whether a YARN can be read as a number.

/// `-?[0-9]+`
pub fn is_integer_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// `-?[0-9]+\.[0-9]+`
pub fn is_float_literal(s: &str) -> bool {
    let unsigned = s.strip_prefix('-').unwrap_or(s);

    match unsigned.split_once('.') {
        Some((whole, frac)) => is_digits(whole) && is_digits(frac),
        None => false,
    }
}

/// `[a-zA-Z][a-zA-Z0-9_]*`
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();

    chars.next().is_some_and(|ch| ch.is_ascii_alphabetic())
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert!(is_integer_literal("0"));
        assert!(is_integer_literal("-42"));
        assert!(!is_integer_literal("-"));
        assert!(!is_integer_literal("4.2"));
        assert!(!is_integer_literal("+4"));
        assert!(!is_integer_literal(""));
    }

    #[test]
    fn floats() {
        assert!(is_float_literal("3.5"));
        assert!(is_float_literal("-0.25"));
        assert!(!is_float_literal("3."));
        assert!(!is_float_literal(".5"));
        assert!(!is_float_literal("3"));
        assert!(!is_float_literal("1.2.3"));
    }

    #[test]
    fn identifiers() {
        assert!(is_identifier("x"));
        assert!(is_identifier("VAR_2"));
        assert!(!is_identifier("_x"));
        assert!(!is_identifier("2x"));
        assert!(!is_identifier("RLY?"));
    }
}
