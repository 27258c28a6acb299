//! Token sources for the parser.
//!
//! The parser only sees the [`TokenSource`] contract. [`Tokenizer`] scans
//! Python source text; [`TokenBuffer`] replays tokens prepared ahead of time.

mod buffer;
mod cursor;
mod tokenizer;

pub use buffer::TokenBuffer;
pub use serpent_syntax::{Token, TokenKind};
use text_size::TextSize;
pub use tokenizer::{Tokenizer, TokenizerOptions};

pub trait TokenSource {
    /// The token under the cursor. Repeated calls return the same token.
    fn current(&self) -> &Token;

    /// The offset reported for the current token; node spans are built from it.
    fn current_offset(&self) -> TextSize;

    /// Moves to the next token. Does nothing once `EOF` is current.
    fn advance(&mut self);
}

/// Every token of `text`, ending with `EOF`.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with(text, TokenizerOptions::default())
}

pub fn tokenize_with(text: &str, options: TokenizerOptions) -> Vec<Token> {
    let mut tokenizer = Tokenizer::with_options(text, options);
    let mut tokens = Vec::new();

    loop {
        let token = tokenizer.current().clone();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            return tokens;
        }
        tokenizer.advance();
    }
}
