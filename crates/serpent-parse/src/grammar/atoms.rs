use serpent_syntax::TokenKind::{self, *};
use serpent_syntax::Token;
use serpent_syntax::ast::*;
use text_size::TextSize;

use super::{exprs, literal, separated, targets};
use crate::parser::{PResult, Parser};

pub(crate) fn atom(p: &mut Parser<'_>) -> PResult<Node> {
    let kind = match p.kind() {
        NAME => LiteralKind::Name,
        NUMBER => LiteralKind::Number,
        TRUE_KW => LiteralKind::True,
        FALSE_KW => LiteralKind::False,
        NONE_KW => LiteralKind::None,
        ELLIPSIS => LiteralKind::Ellipsis,
        STRING => return Ok(strings(p)),
        LEFT_PAREN => return parenthesized(p),
        LEFT_BRACKET => return list_display(p),
        LEFT_BRACE => return brace_display(p),
        _ => return Err(p.unexpected("expression")),
    };
    Ok(literal(p, kind))
}

/// Adjacent string literals are kept together as one sequence.
fn strings(p: &mut Parser<'_>) -> Node {
    let start = p.offset();
    let first = p.bump();
    if !p.at(STRING) {
        return Node::Literal(Literal { span: p.span_from(start), kind: LiteralKind::String, token: first });
    }

    let mut tokens = vec![first];
    while p.at(STRING) {
        tokens.push(p.bump());
    }
    Node::StringSequence(StringSequence { span: p.span_from(start), tokens })
}

fn container(
    p: &Parser<'_>,
    start: TextSize,
    kind: ContainerKind,
    open: Token,
    inner: Option<Node>,
    close: Token,
) -> Node {
    Node::Container(Container {
        span: p.span_from(start),
        kind,
        open,
        inner: inner.map(Box::new),
        close,
    })
}

/// `'(' [yield_expr | testlist_comp] ')'`. A lone expression keeps its
/// parentheses as a `Paren` container.
fn parenthesized(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let open = p.bump();
    let inner = match p.kind() {
        RIGHT_PAREN => None,
        YIELD_KW => Some(exprs::yield_expr(p)?),
        _ => Some(testlist_comp(p, RIGHT_PAREN)?),
    };
    let close = p.expect(RIGHT_PAREN, "')'")?;
    let kind = match &inner {
        Some(Node::List(_) | Node::YieldFrom(_) | Node::Unary(Unary { kind: UnaryKind::Yield, .. }))
        | None => ContainerKind::Tuple,
        Some(_) => ContainerKind::Paren,
    };
    Ok(container(p, start, kind, open, inner, close))
}

fn list_display(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let open = p.bump();
    let inner = if p.at(RIGHT_BRACKET) { None } else { Some(testlist_comp(p, RIGHT_BRACKET)?) };
    let close = p.expect(RIGHT_BRACKET, "']'")?;
    Ok(container(p, start, ContainerKind::List, open, inner, close))
}

/// `(namedexpr_test|star_expr) (comp_for | (',' (namedexpr_test|star_expr))* [','])`
fn testlist_comp(p: &mut Parser<'_>, close: TokenKind) -> PResult<Node> {
    let start = p.offset();
    let first = exprs::namedexpr_or_star(p)?;

    if p.at(FOR_KW) || p.at(ASYNC_KW) {
        let comprehension = comp_for(p)?;
        return Ok(Node::list(
            p.span_from(start),
            ListKind::TestListComp,
            vec![first, comprehension],
            Vec::new(),
        ));
    }
    if !p.at(COMMA) {
        return Ok(first);
    }

    let (elements, separators) = separated(p, first, exprs::namedexpr_or_star, |p| !p.at(close))?;
    Ok(Node::list(p.span_from(start), ListKind::TestListComp, elements, separators))
}

/// `{}` is an empty dict; otherwise the first element decides between a
/// dict and a set.
fn brace_display(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let open = p.bump();
    if p.at(RIGHT_BRACE) {
        let close = p.bump();
        return Ok(container(p, start, ContainerKind::Dict, open, None, close));
    }

    let (kind, inner) = dict_or_set_maker(p)?;
    let close = p.expect(RIGHT_BRACE, "'}'")?;
    Ok(container(p, start, kind, open, Some(inner), close))
}

fn dict_or_set_maker(p: &mut Parser<'_>) -> PResult<(ContainerKind, Node)> {
    let start = p.offset();
    let (kind, first) = match p.kind() {
        DOUBLE_STAR => (ContainerKind::Dict, unpacked_mapping(p)?),
        STAR => (ContainerKind::Set, exprs::star_expr(p)?),
        _ => {
            let key = exprs::test(p)?;
            if p.at(COLON) {
                (ContainerKind::Dict, key_value(p, start, key)?)
            } else {
                (ContainerKind::Set, key)
            }
        }
    };

    let (list_kind, element): (_, fn(&mut Parser<'_>) -> PResult<Node>) = match kind {
        ContainerKind::Dict => (ListKind::DictElements, dict_element),
        _ => (ListKind::SetElements, exprs::test_or_star),
    };

    if p.at(FOR_KW) || p.at(ASYNC_KW) {
        let comprehension = comp_for(p)?;
        let elements = Node::list(p.span_from(start), list_kind, vec![first, comprehension], Vec::new());
        return Ok((kind, elements));
    }

    let (elements, separators) = separated(p, first, element, |p| !p.at(RIGHT_BRACE))?;
    Ok((kind, Node::list(p.span_from(start), list_kind, elements, separators)))
}

fn dict_element(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(DOUBLE_STAR) {
        return unpacked_mapping(p);
    }

    let start = p.offset();
    let key = exprs::test(p)?;
    key_value(p, start, key)
}

fn key_value(p: &mut Parser<'_>, start: TextSize, key: Node) -> PResult<Node> {
    let colon = p.expect(COLON, "':' after dictionary key")?;
    let value = exprs::test(p)?;
    Ok(Node::binary(p.span_from(start), BinaryKind::KeyValue, key, colon, value))
}

/// `'**' expr` inside a dict display.
fn unpacked_mapping(p: &mut Parser<'_>) -> PResult<Node> {
    p.nested(|p| {
        let start = p.offset();
        let op = p.bump();
        let mapping = exprs::expr(p)?;
        Ok(Node::unary(p.span_from(start), UnaryKind::DoubleStar, op, Some(mapping)))
    })
}

/// `['async'] 'for' exprlist 'in' or_test [comp_iter]`
pub(crate) fn comp_for(p: &mut Parser<'_>) -> PResult<Node> {
    if !p.at(ASYNC_KW) {
        return sync_comp_for(p);
    }

    let start = p.offset();
    let async_kw = p.bump();
    if !p.at(FOR_KW) {
        return Err(p.unexpected("'for' after 'async'"));
    }
    let clause = sync_comp_for(p)?;
    Ok(Node::unary(p.span_from(start), UnaryKind::AsyncComprehension, async_kw, Some(clause)))
}

fn sync_comp_for(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let for_kw = p.bump();
    let targets = exprs::exprlist(p)?;
    targets::check_assignable(p, &targets, targets::TargetContext::Assign)?;
    let in_kw = p.expect(IN_KW, "'in'")?;
    let iter = exprs::or_test(p)?;
    let next = comp_iter(p)?;

    Ok(Node::CompFor(CompFor {
        span: p.span_from(start),
        for_kw,
        targets: Box::new(targets),
        in_kw,
        iter: Box::new(iter),
        next: next.map(Box::new),
    }))
}

fn comp_iter(p: &mut Parser<'_>) -> PResult<Option<Node>> {
    match p.kind() {
        FOR_KW | ASYNC_KW => p.nested(comp_for).map(Some),
        IF_KW => p.nested(comp_if).map(Some),
        _ => Ok(None),
    }
}

/// `'if' test_nocond [comp_iter]`
fn comp_if(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let if_kw = p.bump();
    let test = exprs::test_nocond(p)?;
    let next = comp_iter(p)?;

    Ok(Node::CompIf(CompIf {
        span: p.span_from(start),
        if_kw,
        test: Box::new(test),
        next: next.map(Box::new),
    }))
}
