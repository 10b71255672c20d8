//! Logos-based lexer for interface-definition sources
//!
//! Fast tokenization using the logos crate. Every byte of the input ends up in
//! exactly one token, so token offsets can be mapped back to source lines.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(LogosToken::BlockComment) if is_doc_comment(text) => SyntaxKind::DocComment,
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::Error,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// `/** ... */`, but not the empty comment `/**/`.
fn is_doc_comment(text: &str) -> bool {
    text.starts_with("/**") && text.len() > 4
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*")]
    Ident,

    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexInteger,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("=")]
    Eq,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("@")]
    At,

    #[token("<<")]
    #[token(">>")]
    #[regex(r"[|&*/~^%<>!?\[\]]")]
    Operator,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::Whitespace,
            LogosToken::LineComment => SyntaxKind::LineComment,
            LogosToken::BlockComment => SyntaxKind::BlockComment,
            LogosToken::Ident => SyntaxKind::Ident,
            LogosToken::Integer => SyntaxKind::Integer,
            LogosToken::HexInteger => SyntaxKind::HexInteger,
            LogosToken::String => SyntaxKind::String,
            LogosToken::LBrace => SyntaxKind::LBrace,
            LogosToken::RBrace => SyntaxKind::RBrace,
            LogosToken::LParen => SyntaxKind::LParen,
            LogosToken::RParen => SyntaxKind::RParen,
            LogosToken::Semicolon => SyntaxKind::Semicolon,
            LogosToken::Comma => SyntaxKind::Comma,
            LogosToken::Eq => SyntaxKind::Eq,
            LogosToken::Dot => SyntaxKind::Dot,
            LogosToken::Colon => SyntaxKind::Colon,
            LogosToken::Plus => SyntaxKind::Plus,
            LogosToken::Minus => SyntaxKind::Minus,
            LogosToken::At => SyntaxKind::At,
            LogosToken::Operator => SyntaxKind::Operator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        tokenize(input)
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !k.is_trivia())
            .collect()
    }

    #[test]
    fn test_lex_enum_header() {
        assert_eq!(
            kinds("enum Color : int32_t {"),
            vec![
                SyntaxKind::Ident,
                SyntaxKind::Ident,
                SyntaxKind::Colon,
                SyntaxKind::Ident,
                SyntaxKind::LBrace,
            ]
        );
    }

    #[test]
    fn test_lex_numbers() {
        let tokens = tokenize("0x1F 42 0");
        assert_eq!(tokens[0].kind, SyntaxKind::HexInteger);
        assert_eq!(tokens[0].text, "0x1F");
        assert_eq!(tokens[2].kind, SyntaxKind::Integer);
        assert_eq!(tokens[4].kind, SyntaxKind::Integer);
    }

    #[test]
    fn test_doc_comment_vs_block_comment() {
        assert_eq!(kinds("/** doc */"), vec![SyntaxKind::DocComment]);
        assert_eq!(kinds("/**/ /* plain */"), Vec::<SyntaxKind>::new());
        assert_eq!(
            kinds("/**\n * Engine RPM\n **/"),
            vec![SyntaxKind::DocComment]
        );
    }

    #[test]
    fn test_offsets_cover_input() {
        let input = "A = p.E.X + 1, // trailing\n";
        let tokens = tokenize(input);
        let rebuilt: String = tokens.iter().map(|t| t.text).collect();
        assert_eq!(rebuilt, input);
        assert_eq!(tokens[2].offset, TextSize::new(2));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("1 << 2 | 3"),
            vec![
                SyntaxKind::Integer,
                SyntaxKind::Operator,
                SyntaxKind::Integer,
                SyntaxKind::Operator,
                SyntaxKind::Integer,
            ]
        );
    }
}
