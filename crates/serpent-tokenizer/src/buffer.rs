use serpent_syntax::{Token, TokenKind};
use text_size::TextSize;

use crate::TokenSource;

/// Replays a prepared token vector. Each token is paired with the offset
/// reported while it is current; past the end an `EOF` token is synthesized.
#[derive(Debug, Clone)]
pub struct TokenBuffer {
    tokens: Vec<(Token, TextSize)>,
    position: usize,
    eof: Token,
}

impl TokenBuffer {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_offsets(
            tokens
                .into_iter()
                .map(|token| {
                    let offset = token.range.start();
                    (token, offset)
                })
                .collect(),
        )
    }

    pub fn with_offsets(tokens: Vec<(Token, TextSize)>) -> Self {
        let end = tokens
            .last()
            .map_or(TextSize::new(0), |(token, offset)| token.range.end().max(*offset));
        Self { tokens, position: 0, eof: Token::eof(end) }
    }
}

impl From<Vec<Token>> for TokenBuffer {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}

impl TokenSource for TokenBuffer {
    fn current(&self) -> &Token {
        self.tokens.get(self.position).map_or(&self.eof, |(token, _)| token)
    }

    fn current_offset(&self) -> TextSize {
        self.tokens.get(self.position).map_or(self.eof.range.start(), |(_, offset)| *offset)
    }

    fn advance(&mut self) {
        if self.current().kind != TokenKind::EOF {
            self.position += 1;
        }
    }
}
