/// Position tracking for diagnostics
///
/// Converts lexer byte offsets into line/column positions so that malformed
/// source can be reported at the offending line.
use text_size::TextSize;

/// A position in source code (0-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// 1-based line number, as shown to users.
    pub fn display_line(&self) -> usize {
        self.line + 1
    }
}

/// Maps byte offsets to line/column positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Byte offset of the start of every line.
    line_starts: Vec<TextSize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        line_starts.extend(
            text.match_indices('\n')
                .map(|(offset, _)| TextSize::new(offset as u32 + 1)),
        );
        Self { line_starts }
    }

    /// Position of the given byte offset. Offsets past the end clamp to the last line.
    pub fn position(&self, offset: TextSize) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let column = u32::from(offset - self.line_starts[line]) as usize;
        Position::new(line, column)
    }
}
