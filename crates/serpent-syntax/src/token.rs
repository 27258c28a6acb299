use text_size::{TextRange, TextSize};

use crate::TokenKind;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub range: TextRange,
    /// Source text for names, numbers, strings, type comments, and the
    /// description of an `UNKNOWN` token.
    pub text: Option<Box<str>>,
}

impl Token {
    pub fn new(kind: TokenKind, range: TextRange) -> Self {
        Self { kind, range, text: None }
    }

    pub fn with_text(kind: TokenKind, range: TextRange, text: impl Into<Box<str>>) -> Self {
        Self { kind, range, text: Some(text.into()) }
    }

    pub fn eof(offset: TextSize) -> Self {
        Self::new(TokenKind::EOF, TextRange::empty(offset))
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or(self.kind.as_str())
    }
}
