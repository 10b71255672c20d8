//! Enum block extraction.
//!
//! Scans a source file for `package`/`import` declarations and `enum Name { ... }`
//! blocks. Two depths are supported:
//!
//! - [`scan_header`] records the package, imports and enum names, skipping enum
//!   bodies by brace matching. This runs once per file at load time.
//! - [`extract_enums`] additionally splits every body into member entries. This
//!   runs once per file, when the file is resolved.
//!
//! Everything outside the recognized declarations (annotations, interfaces,
//! parcelables, stray punctuation) is skipped.

use smol_str::SmolStr;
use text_size::TextSize;
use thiserror::Error;

use super::lexer::{Token, tokenize};
use super::syntax_kind::SyntaxKind;
use crate::base::constants::{KW_ENUM, KW_IMPORT, KW_PACKAGE};

/// A grammar violation at a byte offset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SyntaxError {
    pub message: String,
    pub offset: TextSize,
}

impl SyntaxError {
    fn new(message: impl Into<String>, offset: TextSize) -> Self {
        Self {
            message: message.into(),
            offset,
        }
    }
}

/// One member declaration inside an enum body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberEntry {
    /// Raw text of the documentation comment directly before the member.
    pub comment: Option<String>,
    pub name: SmolStr,
    /// Raw value expression; empty when the member has no `= expression`.
    pub expression: String,
    /// Offset of the member name.
    pub offset: TextSize,
}

/// One `enum Name { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumBlock {
    pub name: SmolStr,
    /// Offset of the `enum` keyword.
    pub offset: TextSize,
    /// Empty when produced by [`scan_header`].
    pub members: Vec<MemberEntry>,
}

/// Declarations found at the top level of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHeader {
    /// First `package` declaration and its offset.
    pub package: Option<(String, TextSize)>,
    /// Every `import` target, in declaration order.
    pub imports: Vec<String>,
    /// Enum blocks, without members.
    pub enums: Vec<EnumBlock>,
}

/// Scan package, imports and enum names without splitting enum bodies.
pub fn scan_header(text: &str) -> Result<SourceHeader, SyntaxError> {
    let tokens = tokenize(text);
    Extractor::new(text, &tokens, Depth::Header).run()
}

/// Extract every enum block with its member entries, in declaration order.
pub fn extract_enums(text: &str) -> Result<Vec<EnumBlock>, SyntaxError> {
    let tokens = tokenize(text);
    Ok(Extractor::new(text, &tokens, Depth::Members).run()?.enums)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Depth {
    Header,
    Members,
}

/// Cursor over the non-trivia tokens of one file.
struct Extractor<'t, 'a> {
    text: &'a str,
    tokens: &'t [Token<'a>],
    pos: usize,
    depth: Depth,
}

impl<'t, 'a> Extractor<'t, 'a> {
    fn new(text: &'a str, tokens: &'t [Token<'a>], depth: Depth) -> Self {
        Self {
            text,
            tokens,
            pos: 0,
            depth,
        }
    }

    fn run(mut self) -> Result<SourceHeader, SyntaxError> {
        let mut header = SourceHeader::default();

        while let Some(token) = self.next_significant() {
            if token.kind != SyntaxKind::Ident {
                continue;
            }
            match token.text {
                KW_PACKAGE => {
                    if let Some(name) = self.dotted_name() {
                        if header.package.is_none() {
                            header.package = Some((name, token.offset));
                        }
                    }
                }
                KW_IMPORT => {
                    if let Some(name) = self.dotted_name() {
                        header.imports.push(name);
                    }
                }
                KW_ENUM => {
                    if let Some(block) = self.enum_block(token.offset)? {
                        header.enums.push(block);
                    }
                }
                _ => {}
            }
        }

        Ok(header)
    }

    // ========================================================================
    // CURSOR
    // ========================================================================

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|t| t.kind.is_trivia())
        {
            self.pos += 1;
        }
    }

    /// Next token that is not whitespace or a plain comment. Doc comments are
    /// significant.
    fn next_significant(&mut self) -> Option<Token<'a>> {
        self.skip_trivia();
        let token = self.tokens.get(self.pos)?.clone();
        self.pos += 1;
        Some(token)
    }

    fn peek_significant(&mut self) -> Option<&'t Token<'a>> {
        self.skip_trivia();
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.peek_significant().is_some_and(|t| t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn end_offset(&self) -> TextSize {
        TextSize::new(self.text.len() as u32)
    }

    /// `Ident ('.' Ident)*`
    fn dotted_name(&mut self) -> Option<String> {
        let first = self.peek_significant()?;
        if first.kind != SyntaxKind::Ident {
            return None;
        }
        let mut name = first.text.to_string();
        self.pos += 1;

        loop {
            let checkpoint = self.pos;
            if !self.eat(SyntaxKind::Dot) {
                break;
            }
            match self.peek_significant() {
                Some(t) if t.kind == SyntaxKind::Ident => {
                    name.push('.');
                    name.push_str(t.text);
                    self.pos += 1;
                }
                _ => {
                    self.pos = checkpoint;
                    break;
                }
            }
        }
        Some(name)
    }

    // ========================================================================
    // ENUM BLOCKS
    // ========================================================================

    /// Parses after the `enum` keyword. Returns `None` for anything that is not a
    /// block definition (e.g. a forward declaration).
    fn enum_block(&mut self, offset: TextSize) -> Result<Option<EnumBlock>, SyntaxError> {
        let name = match self.peek_significant() {
            Some(t) if t.kind == SyntaxKind::Ident => SmolStr::new(t.text),
            _ => return Ok(None),
        };
        self.pos += 1;

        // Backing type clause: `enum Name : int32_t {`
        if self.eat(SyntaxKind::Colon) {
            let _ = self.dotted_name();
        }
        if !self.eat(SyntaxKind::LBrace) {
            return Ok(None);
        }

        let members = match self.depth {
            Depth::Header => {
                self.skip_body(&name, offset)?;
                Vec::new()
            }
            Depth::Members => self.members(&name, offset)?,
        };

        Ok(Some(EnumBlock {
            name,
            offset,
            members,
        }))
    }

    fn skip_body(&mut self, name: &str, offset: TextSize) -> Result<(), SyntaxError> {
        let mut depth = 1usize;
        while let Some(token) = self.next_significant() {
            match token.kind {
                SyntaxKind::LBrace => depth += 1,
                SyntaxKind::RBrace => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
        Err(SyntaxError::new(
            format!("unterminated body of enum `{name}`"),
            offset,
        ))
    }

    fn members(
        &mut self,
        enum_name: &str,
        offset: TextSize,
    ) -> Result<Vec<MemberEntry>, SyntaxError> {
        let mut members = Vec::new();
        let mut comment: Option<String> = None;

        loop {
            let Some(token) = self.next_significant() else {
                return Err(SyntaxError::new(
                    format!("unterminated body of enum `{enum_name}`"),
                    offset,
                ));
            };

            match token.kind {
                SyntaxKind::RBrace => return Ok(members),
                SyntaxKind::DocComment => comment = Some(token.text.to_string()),
                SyntaxKind::Ident => {
                    let expression = self.member_value(enum_name, &token)?;
                    members.push(MemberEntry {
                        comment: comment.take(),
                        name: SmolStr::new(token.text),
                        expression,
                        offset: token.offset,
                    });
                    if self.member_terminator(enum_name, &token)? {
                        return Ok(members);
                    }
                }
                _ => {
                    return Err(SyntaxError::new(
                        format!("unexpected `{}` in body of enum `{enum_name}`", token.text),
                        token.offset,
                    ));
                }
            }
        }
    }

    /// Value expression after `=`, or the empty string when there is none.
    ///
    /// The expression runs to the first `,` or `}` outside parentheses.
    fn member_value(
        &mut self,
        enum_name: &str,
        member: &Token<'a>,
    ) -> Result<String, SyntaxError> {
        if !self.eat(SyntaxKind::Eq) {
            return Ok(String::new());
        }

        let start = self.pos;
        let mut parens = 0usize;
        while let Some(token) = self.tokens.get(self.pos) {
            match token.kind {
                SyntaxKind::LParen => parens += 1,
                SyntaxKind::RParen => parens = parens.saturating_sub(1),
                SyntaxKind::Comma | SyntaxKind::RBrace if parens == 0 => break,
                _ => {}
            }
            self.pos += 1;
        }

        let expression: String = self.tokens[start..self.pos]
            .iter()
            .map(|t| t.text)
            .collect();
        let expression = expression.trim();
        if expression.is_empty() {
            return Err(SyntaxError::new(
                format!(
                    "missing value expression for `{}` in enum `{enum_name}`",
                    member.text
                ),
                member.offset,
            ));
        }
        Ok(expression.to_string())
    }

    /// Consumes the `,` after a member. Returns true when the body closed instead.
    fn member_terminator(
        &mut self,
        enum_name: &str,
        member: &Token<'a>,
    ) -> Result<bool, SyntaxError> {
        match self.next_significant() {
            Some(t) if t.kind == SyntaxKind::Comma => Ok(false),
            Some(t) if t.kind == SyntaxKind::RBrace => Ok(true),
            Some(t) => Err(SyntaxError::new(
                format!(
                    "unexpected `{}` after member `{}` of enum `{enum_name}`",
                    t.text, member.text
                ),
                t.offset,
            )),
            None => Err(SyntaxError::new(
                format!("unterminated body of enum `{enum_name}`"),
                self.end_offset(),
            )),
        }
    }
}
