use std::fmt;

use crate::walk::{AstNode, children};
use crate::{NodeOrToken, Token, TokenKind};

/// Indented rendering of a subtree: one line per node (`label start..end`)
/// and per token (`KIND start..end "text"`).
pub struct DebugTree<'a>(pub &'a dyn AstNode);

impl fmt::Display for DebugTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &dyn AstNode, depth: usize) -> fmt::Result {
    writeln!(f, "{:indent$}{} {:?}", "", node.label(), node.span(), indent = depth * 2)?;

    for child in children(node) {
        match child {
            NodeOrToken::Node(child) => write_node(f, child, depth + 1)?,
            NodeOrToken::Token(token) => write_token(f, token, depth + 1)?,
        }
    }

    Ok(())
}

fn write_token(f: &mut fmt::Formatter<'_>, token: &Token, depth: usize) -> fmt::Result {
    write!(f, "{:indent$}{:?} {:?}", "", token.kind, token.range, indent = depth * 2)?;

    match (&token.text, token.kind) {
        (Some(text), _) => writeln!(f, " {text:?}"),
        (None, TokenKind::NEWLINE | TokenKind::INDENT | TokenKind::DEDENT | TokenKind::EOF) => {
            writeln!(f)
        }
        (None, kind) => writeln!(f, " {:?}", kind.as_str()),
    }
}
