pub(crate) mod atoms;
pub(crate) mod compound;
pub(crate) mod exprs;
pub(crate) mod inputs;
pub(crate) mod params;
pub(crate) mod stmts;
pub(crate) mod targets;

use serpent_syntax::TokenKind::*;
use serpent_syntax::ast::{Literal, LiteralKind, ListKind, Node, Unary, UnaryKind};
use serpent_syntax::{Token, TokenSet};

use crate::parser::{PResult, Parser};

/// Tokens that can start an expression.
pub(crate) const EXPR_FIRST: TokenSet = TokenSet::new([
    NAME,
    NUMBER,
    STRING,
    FALSE_KW,
    NONE_KW,
    TRUE_KW,
    AWAIT_KW,
    LAMBDA_KW,
    NOT_KW,
    LEFT_PAREN,
    LEFT_BRACKET,
    LEFT_BRACE,
    ELLIPSIS,
    PLUS,
    MINUS,
    TILDE,
    STAR,
]);

pub(crate) const COMPOUND_FIRST: TokenSet =
    TokenSet::new([IF_KW, WHILE_KW, FOR_KW, TRY_KW, WITH_KW, DEF_KW, CLASS_KW, AT, ASYNC_KW]);

pub(crate) fn starts_expression(p: &Parser<'_>) -> bool {
    p.at_set(&EXPR_FIRST)
}

pub(crate) fn always(_: &Parser<'_>) -> bool {
    true
}

/// `element (',' element)* [',']`. A lone element without a comma is
/// returned as is; otherwise the elements are wrapped in a list of `kind`.
/// After each comma `continues` decides whether another element follows.
pub(crate) fn sequence(
    p: &mut Parser<'_>,
    kind: ListKind,
    element: impl Fn(&mut Parser<'_>) -> PResult<Node>,
    continues: impl Fn(&Parser<'_>) -> bool,
) -> PResult<Node> {
    let start = p.offset();
    let first = element(p)?;
    if !p.at(COMMA) {
        return Ok(first);
    }

    let (elements, separators) = separated(p, first, element, continues)?;
    Ok(Node::list(p.span_from(start), kind, elements, separators))
}

/// The rest of a comma separated sequence whose first element is parsed.
pub(crate) fn separated(
    p: &mut Parser<'_>,
    first: Node,
    element: impl Fn(&mut Parser<'_>) -> PResult<Node>,
    continues: impl Fn(&Parser<'_>) -> bool,
) -> PResult<(Vec<Node>, Vec<Token>)> {
    let mut elements = vec![first];
    let mut separators = Vec::new();

    while p.at(COMMA) {
        separators.push(p.bump());
        if !continues(p) {
            break;
        }
        elements.push(element(p)?);
    }

    Ok((elements, separators))
}

pub(crate) fn literal(p: &mut Parser<'_>, kind: LiteralKind) -> Node {
    let start = p.offset();
    let token = p.bump();
    Node::Literal(Literal { span: p.span_from(start), kind, token })
}

pub(crate) fn name(p: &mut Parser<'_>) -> PResult<Node> {
    if !p.at(NAME) {
        return Err(p.unexpected("name"));
    }
    Ok(literal(p, LiteralKind::Name))
}

/// `NAME ('.' NAME)*`
pub(crate) fn dotted_name(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let first = name(p)?;
    if !p.at(DOT) {
        return Ok(first);
    }

    let mut elements = vec![first];
    let mut separators = Vec::new();
    while p.at(DOT) {
        separators.push(p.bump());
        elements.push(name(p)?);
    }

    Ok(Node::list(p.span_from(start), ListKind::DottedName, elements, separators))
}

/// An element followed by its `for` clauses: `x for x in y`.
pub(crate) fn is_comprehension(node: &Node) -> bool {
    let Node::List(list) = node else { return false };
    list.kind == ListKind::TestListComp
        && list.separators.is_empty()
        && matches!(
            list.elements.as_slice(),
            [_, Node::CompFor(_) | Node::Unary(Unary { kind: UnaryKind::AsyncComprehension, .. })]
        )
}
