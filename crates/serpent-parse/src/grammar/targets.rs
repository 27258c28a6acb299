//! Checks on the left-hand side of assignments, deletions, augmented and
//! annotated assignments.

use serpent_errors::ParseError;
use serpent_syntax::ast::*;

use super::is_comprehension;
use crate::parser::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TargetContext {
    Assign,
    Delete,
}

/// Names, attributes, subscripts and tuples or lists of them. Assignments
/// also accept starred targets.
pub(crate) fn check_assignable(
    p: &Parser<'_>,
    target: &Node,
    context: TargetContext,
) -> Result<(), ParseError> {
    match target {
        Node::Literal(Literal { kind: LiteralKind::Name, .. }) => Ok(()),
        Node::AtomExpr(atom) if is_reference(atom) => Ok(()),
        Node::Container(Container { kind: ContainerKind::Paren, inner: Some(inner), .. }) => {
            check_assignable(p, inner, context)
        }
        Node::Container(Container { kind: ContainerKind::Tuple | ContainerKind::List, inner, .. }) => {
            match inner.as_deref() {
                None => Ok(()),
                Some(inner) if is_comprehension(inner) => invalid(p, target, context),
                Some(inner) => check_assignable(p, inner, context),
            }
        }
        Node::List(List {
            kind: ListKind::TestListComp | ListKind::ExprList | ListKind::TestList | ListKind::TestListStarExpr,
            elements,
            ..
        }) if !is_comprehension(target) => {
            elements.iter().try_for_each(|element| check_assignable(p, element, context))
        }
        Node::Unary(Unary { kind: UnaryKind::Star, operand: Some(operand), .. })
            if context == TargetContext::Assign =>
        {
            check_assignable(p, operand, context)
        }
        _ => invalid(p, target, context),
    }
}

pub(crate) fn check_augmented(p: &Parser<'_>, target: &Node) -> Result<(), ParseError> {
    match target {
        Node::Literal(Literal { kind: LiteralKind::Name, .. }) => Ok(()),
        Node::AtomExpr(atom) if is_reference(atom) => Ok(()),
        Node::Container(Container { kind: ContainerKind::Paren, inner: Some(inner), .. }) => {
            check_augmented(p, inner)
        }
        _ => Err(p.error_at(target.span().start(), "illegal expression for augmented assignment")),
    }
}

/// A single name, attribute or subscript, possibly parenthesized.
pub(crate) fn check_annotated(p: &Parser<'_>, target: &Node) -> Result<(), ParseError> {
    let message = match target {
        Node::Literal(Literal { kind: LiteralKind::Name, .. }) => return Ok(()),
        Node::AtomExpr(atom) if is_reference(atom) => return Ok(()),
        Node::Container(Container { kind: ContainerKind::Paren, inner: Some(inner), .. }) => {
            return check_annotated(p, inner);
        }
        Node::List(_) | Node::Container(Container { kind: ContainerKind::Tuple, .. }) => {
            "only single target (not tuple) can be annotated"
        }
        Node::Container(Container { kind: ContainerKind::List, .. }) => {
            "only single target (not list) can be annotated"
        }
        _ => "illegal target for annotation",
    };
    Err(p.error_at(target.span().start(), message))
}

/// An attribute access or subscription that is not awaited.
fn is_reference(atom: &AtomExpr) -> bool {
    atom.await_kw.is_none()
        && matches!(atom.trailers.last(), Some(Trailer::Attribute(_) | Trailer::Subscript(_)))
}

fn invalid(p: &Parser<'_>, target: &Node, context: TargetContext) -> Result<(), ParseError> {
    let what = describe(target);
    let message = match context {
        TargetContext::Assign => format!("cannot assign to {what}"),
        TargetContext::Delete => format!("cannot delete {what}"),
    };
    Err(p.error_at(target.span().start(), message))
}

/// How an expression is referred to in error messages.
pub(crate) fn describe(node: &Node) -> &'static str {
    match node {
        Node::Literal(literal) => match literal.kind {
            LiteralKind::Name => "name",
            LiteralKind::Number | LiteralKind::String => "literal",
            LiteralKind::True => "True",
            LiteralKind::False => "False",
            LiteralKind::None => "None",
            LiteralKind::Ellipsis => "Ellipsis",
        },
        Node::StringSequence(_) => "literal",
        Node::Unary(unary) => match unary.kind {
            UnaryKind::Star => "starred",
            UnaryKind::Yield => "yield expression",
            _ => "operator",
        },
        Node::YieldFrom(_) => "yield expression",
        Node::Binary(binary) if binary.kind == BinaryKind::NamedExpr => "named expression",
        Node::Binary(binary) if binary.kind.is_comparison() => "comparison",
        Node::ExtendedBinary(_) => "comparison",
        Node::Binary(_) => "operator",
        Node::Ternary(ternary) if ternary.kind == TernaryKind::Conditional => "conditional expression",
        Node::Lambda(_) => "lambda",
        Node::AtomExpr(atom) if atom.await_kw.is_some() => "await expression",
        Node::AtomExpr(atom) => match atom.trailers.last() {
            Some(Trailer::Call(_)) => "function call",
            Some(Trailer::Attribute(_)) => "attribute",
            Some(Trailer::Subscript(_)) => "subscript",
            None => "expression",
        },
        Node::Container(Container { kind: ContainerKind::Paren, inner: Some(inner), .. }) => describe(inner),
        Node::Container(container) => {
            let comprehension = container.inner.as_deref().is_some_and(is_comprehension)
                || container.inner.as_deref().is_some_and(is_mapping_comprehension);
            match (container.kind, comprehension) {
                (ContainerKind::Tuple, true) => "generator expression",
                (ContainerKind::Tuple, false) => "tuple",
                (ContainerKind::List, true) => "list comprehension",
                (ContainerKind::List, false) => "list",
                (ContainerKind::Set, true) => "set comprehension",
                (ContainerKind::Set, false) => "set display",
                (ContainerKind::Dict, true) => "dict comprehension",
                (ContainerKind::Dict, false) => "dict display",
                (ContainerKind::Paren, _) => "expression",
            }
        }
        Node::List(_) if is_comprehension(node) => "generator expression",
        Node::List(_) => "tuple",
        _ => "expression",
    }
}

/// The element list of a dict or set comprehension.
fn is_mapping_comprehension(node: &Node) -> bool {
    matches!(
        node,
        Node::List(List { kind: ListKind::DictElements | ListKind::SetElements, elements, separators, .. })
            if separators.is_empty() && elements.len() == 2
    )
}
