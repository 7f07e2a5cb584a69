//! Lexer for SQL templates using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// Collapse doubled quotes in a literal body
fn resolve_escapes(body: &str) -> String {
    body.replace("''", "'")
}

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    // Anything outside single quotes, whitespace included
    #[regex(r"[^']+")]
    Text,

    #[regex(r"'([^']|'')*'", |lex| {
        let s = lex.slice();
        resolve_escapes(&s[1..s.len() - 1])
    })]
    Literal(String),

    // Opening quote with no closing quote before end of input
    #[regex(r"'([^']|'')*", |lex| resolve_escapes(&lex.slice()[1..]))]
    Unterminated(String),
}

/// Lex input string into tokens with spans
pub fn lex(input: &str) -> impl Iterator<Item = (Token, Span)> + '_ {
    Token::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).map(|(t, _)| t).collect()
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(tokens("SELECT 1 FROM dual"), vec![Token::Text]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_literal_between_text() {
        assert_eq!(
            tokens("VALUES ('abc')"),
            vec![
                Token::Text,
                Token::Literal("abc".to_string()),
                Token::Text
            ]
        );
    }

    #[test]
    fn test_doubled_quote_collapses() {
        assert_eq!(
            tokens("'it''s'"),
            vec![Token::Literal("it's".to_string())]
        );
        assert_eq!(tokens("''''"), vec![Token::Literal("'".to_string())]);
    }

    #[test]
    fn test_empty_literal() {
        assert_eq!(tokens("''"), vec![Token::Literal(String::new())]);
    }

    #[test]
    fn test_adjacent_literals_are_separate() {
        // A space between the quotes keeps them from reading as an escape
        assert_eq!(
            tokens("'a' 'b'"),
            vec![
                Token::Literal("a".to_string()),
                Token::Text,
                Token::Literal("b".to_string())
            ]
        );
    }

    #[test]
    fn test_unterminated_literal() {
        assert_eq!(
            tokens("x '%m"),
            vec![Token::Text, Token::Unterminated("%m".to_string())]
        );
    }

    #[test]
    fn test_trailing_escape_is_unterminated() {
        assert_eq!(
            tokens("'abc''"),
            vec![Token::Unterminated("abc'".to_string())]
        );
    }

    #[test]
    fn test_lone_quote() {
        assert_eq!(tokens("'"), vec![Token::Unterminated(String::new())]);
    }

    #[test]
    fn test_spans_cover_input() {
        let input = "INSERT INTO T VALUES ( 'a''b', '%d' )";
        let spans: Vec<_> = lex(input).map(|(_, s)| s).collect();
        assert_eq!(spans.first().map(|s| s.start), Some(0));
        assert_eq!(spans.last().map(|s| s.end), Some(input.len()));
        for pair in spans.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(&input[spans[1].clone()], "'a''b'");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(
            tokens("été '%m €'"),
            vec![Token::Text, Token::Literal("%m €".to_string())]
        );
    }
}
