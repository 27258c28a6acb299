//! Tokens and the lossless syntax tree produced by the parser.
//!
//! The tree owns every token it was built from. Walking it through
//! [`AstNode`] yields those tokens back in source order, so the token stream
//! can be reconstructed exactly from the tree.

pub mod ast;
mod dump;
mod token;
mod token_kind;
mod token_set;
mod walk;

pub use dump::DebugTree;
pub use text_size::{TextRange, TextSize};
pub use token::Token;
pub use token_kind::TokenKind;
pub use token_set::TokenSet;
pub use walk::{AstNode, Children, SyntaxElement, children, tokens};

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn as_node(&self) -> Option<&N> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            Self::Node(_) => None,
            Self::Token(token) => Some(token),
        }
    }
}
