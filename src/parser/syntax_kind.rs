//! Token kinds produced by the lexer.

/// Kind of a lexed token.
///
/// Comments are split into plain and documentation comments here rather than in
/// the logos grammar, since both share the same block syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    // Trivia
    Whitespace,
    LineComment,
    BlockComment,
    DocComment,

    // Literals and names
    Ident,
    Integer,
    HexInteger,
    String,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    Semicolon,
    Comma,
    Eq,
    Dot,
    Colon,
    Plus,
    Minus,
    At,
    /// Any operator the evaluator does not support (`|`, `<<`, `*`, ...).
    Operator,

    /// Input the lexer could not match.
    Error,
}

impl SyntaxKind {
    /// Whitespace and non-documentation comments.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            SyntaxKind::Whitespace | SyntaxKind::LineComment | SyntaxKind::BlockComment
        )
    }
}
