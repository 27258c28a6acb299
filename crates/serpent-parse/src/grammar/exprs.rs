use serpent_syntax::TokenKind::{self, *};
use serpent_syntax::{Token, TokenSet};
use serpent_syntax::ast::*;
use text_size::TextSize;

use super::{atoms, is_comprehension, params, sequence, starts_expression, targets};
use crate::parser::{PResult, Parser};

const SLICE_END: TokenSet = TokenSet::new([RIGHT_BRACKET, COMMA, COLON]);
const STEP_END: TokenSet = TokenSet::new([RIGHT_BRACKET, COMMA]);

/// `or_test ['if' or_test 'else' test] | lambdef`
pub(crate) fn test(p: &mut Parser<'_>) -> PResult<Node> {
    p.nested(|p| {
        if p.at(LAMBDA_KW) {
            return lambda(p, LambdaKind::Lambda);
        }

        let start = p.offset();
        let body = or_test(p)?;
        if !p.at(IF_KW) {
            return Ok(body);
        }

        let if_kw = p.bump();
        let condition = or_test(p)?;
        let else_kw = p.expect(ELSE_KW, "'else' in conditional expression")?;
        let orelse = test(p)?;

        Ok(Node::Ternary(Ternary {
            span: p.span_from(start),
            kind: TernaryKind::Conditional,
            left: Some(Box::new(body)),
            first_op: if_kw,
            middle: Some(Box::new(condition)),
            second_op: Some(else_kw),
            right: Some(Box::new(orelse)),
        }))
    })
}

/// A test without a conditional expression, used after `if` in comprehensions.
pub(crate) fn test_nocond(p: &mut Parser<'_>) -> PResult<Node> {
    p.nested(|p| if p.at(LAMBDA_KW) { lambda(p, LambdaKind::LambdaNoCond) } else { or_test(p) })
}

/// `test [':=' test]`
pub(crate) fn namedexpr_test(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let target = test(p)?;
    if !p.at(COLON_EQ) {
        return Ok(target);
    }
    named_expr(p, start, target)
}

fn named_expr(p: &mut Parser<'_>, start: TextSize, target: Node) -> PResult<Node> {
    if target.as_name().is_none() {
        let message =
            format!("cannot use assignment expressions with {}", targets::describe(&target));
        return Err(p.error_at(start, message));
    }

    let op = p.bump();
    let value = test(p)?;
    Ok(Node::binary(p.span_from(start), BinaryKind::NamedExpr, target, op, value))
}

fn lambda(p: &mut Parser<'_>, kind: LambdaKind) -> PResult<Node> {
    let start = p.offset();
    let lambda_kw = p.bump();
    let parameters = if p.at(COLON) {
        None
    } else {
        Some(params::parameter_list(p, params::Style::Untyped)?)
    };
    let colon = p.expect(COLON, "':' after lambda parameters")?;
    let body = match kind {
        LambdaKind::Lambda => test(p)?,
        LambdaKind::LambdaNoCond => test_nocond(p)?,
    };

    Ok(Node::Lambda(Box::new(Lambda {
        span: p.span_from(start),
        kind,
        lambda_kw,
        parameters,
        colon,
        body,
    })))
}

/// Parses `operand (operator operand)*` into a left-leaning chain.
fn left_assoc(
    p: &mut Parser<'_>,
    operator: fn(TokenKind) -> Option<BinaryKind>,
    operand: fn(&mut Parser<'_>) -> PResult<Node>,
) -> PResult<Node> {
    let start = p.offset();
    let mut left = operand(p)?;

    while let Some(kind) = operator(p.kind()) {
        let op = p.bump();
        let right = operand(p)?;
        left = Node::binary(p.span_from(start), kind, left, op, right);
    }

    Ok(left)
}

pub(crate) fn or_test(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(p, |kind| (kind == OR_KW).then_some(BinaryKind::Or), and_test)
}

fn and_test(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(p, |kind| (kind == AND_KW).then_some(BinaryKind::And), not_test)
}

fn not_test(p: &mut Parser<'_>) -> PResult<Node> {
    if !p.at(NOT_KW) {
        return comparison(p);
    }

    let start = p.offset();
    let op = p.bump();
    let operand = p.nested(not_test)?;
    Ok(Node::unary(p.span_from(start), UnaryKind::Not, op, Some(operand)))
}

fn comparison_operator(kind: TokenKind) -> Option<BinaryKind> {
    let kind = match kind {
        LT => BinaryKind::Less,
        GT => BinaryKind::Greater,
        EQ_EQ => BinaryKind::Equal,
        NOT_EQ => BinaryKind::NotEqual,
        LT_EQ => BinaryKind::LessEqual,
        GT_EQ => BinaryKind::GreaterEqual,
        IN_KW => BinaryKind::In,
        _ => return None,
    };
    Some(kind)
}

/// `expr (comp_op expr)*`. `a < b < c` nests as `(a < b) < c`.
fn comparison(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let mut left = expr(p)?;

    loop {
        left = match p.kind() {
            IS_KW => {
                let is_kw = p.bump();
                if p.at(NOT_KW) {
                    let not_kw = p.bump();
                    let right = expr(p)?;
                    extended(p, start, ExtendedBinaryKind::IsNot, left, is_kw, not_kw, right)
                } else {
                    let right = expr(p)?;
                    Node::binary(p.span_from(start), BinaryKind::Is, left, is_kw, right)
                }
            }
            NOT_KW => {
                let not_kw = p.bump();
                let in_kw = p.expect(IN_KW, "'in' after 'not'")?;
                let right = expr(p)?;
                extended(p, start, ExtendedBinaryKind::NotIn, left, not_kw, in_kw, right)
            }
            kind => {
                let Some(kind) = comparison_operator(kind) else { break };
                let op = p.bump();
                let right = expr(p)?;
                Node::binary(p.span_from(start), kind, left, op, right)
            }
        };
    }

    Ok(left)
}

#[allow(clippy::too_many_arguments)]
fn extended(
    p: &Parser<'_>,
    start: TextSize,
    kind: ExtendedBinaryKind,
    left: Node,
    first_op: Token,
    second_op: Token,
    right: Node,
) -> Node {
    Node::ExtendedBinary(ExtendedBinary {
        span: p.span_from(start),
        kind,
        left: Box::new(left),
        first_op,
        second_op,
        right: Box::new(right),
    })
}

/// `'*' expr`
pub(crate) fn star_expr(p: &mut Parser<'_>) -> PResult<Node> {
    p.nested(|p| {
        let start = p.offset();
        let op = p.bump();
        let operand = expr(p)?;
        Ok(Node::unary(p.span_from(start), UnaryKind::Star, op, Some(operand)))
    })
}

pub(crate) fn test_or_star(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(STAR) { star_expr(p) } else { test(p) }
}

pub(crate) fn namedexpr_or_star(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(STAR) { star_expr(p) } else { namedexpr_test(p) }
}

fn expr_or_star(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(STAR) { star_expr(p) } else { expr(p) }
}

pub(crate) fn testlist(p: &mut Parser<'_>) -> PResult<Node> {
    sequence(p, ListKind::TestList, test, starts_expression)
}

pub(crate) fn testlist_star_expr(p: &mut Parser<'_>) -> PResult<Node> {
    sequence(p, ListKind::TestListStarExpr, test_or_star, starts_expression)
}

pub(crate) fn exprlist(p: &mut Parser<'_>) -> PResult<Node> {
    sequence(p, ListKind::ExprList, expr_or_star, starts_expression)
}

pub(crate) fn expr(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(p, |kind| (kind == PIPE).then_some(BinaryKind::BitOr), xor_expr)
}

fn xor_expr(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(p, |kind| (kind == CARET).then_some(BinaryKind::BitXor), and_expr)
}

fn and_expr(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(p, |kind| (kind == AMP).then_some(BinaryKind::BitAnd), shift_expr)
}

fn shift_expr(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(
        p,
        |kind| match kind {
            SHL => Some(BinaryKind::ShiftLeft),
            SHR => Some(BinaryKind::ShiftRight),
            _ => None,
        },
        arith_expr,
    )
}

fn arith_expr(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(
        p,
        |kind| match kind {
            PLUS => Some(BinaryKind::Add),
            MINUS => Some(BinaryKind::Sub),
            _ => None,
        },
        term,
    )
}

fn term(p: &mut Parser<'_>) -> PResult<Node> {
    left_assoc(
        p,
        |kind| match kind {
            STAR => Some(BinaryKind::Mul),
            SLASH => Some(BinaryKind::Div),
            DOUBLE_SLASH => Some(BinaryKind::FloorDiv),
            PERCENT => Some(BinaryKind::Modulo),
            AT => Some(BinaryKind::MatMul),
            _ => None,
        },
        factor,
    )
}

/// `('+'|'-'|'~') factor | power`
fn factor(p: &mut Parser<'_>) -> PResult<Node> {
    let kind = match p.kind() {
        PLUS => UnaryKind::Plus,
        MINUS => UnaryKind::Minus,
        TILDE => UnaryKind::Invert,
        _ => return power(p),
    };

    let start = p.offset();
    let op = p.bump();
    let operand = p.nested(factor)?;
    Ok(Node::unary(p.span_from(start), kind, op, Some(operand)))
}

/// `atom_expr ['**' factor]`, so `a ** b ** c` nests to the right.
fn power(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let base = atom_expr(p)?;
    if !p.at(DOUBLE_STAR) {
        return Ok(base);
    }

    let op = p.bump();
    let exponent = p.nested(factor)?;
    Ok(Node::binary(p.span_from(start), BinaryKind::Power, base, op, exponent))
}

/// `['await'] atom trailer*`. An atom with neither is returned unwrapped.
fn atom_expr(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let await_kw = p.eat(AWAIT_KW);
    let atom = atoms::atom(p)?;

    let mut trailers = Vec::new();
    loop {
        let trailer = match p.kind() {
            DOT => attribute(p)?,
            LEFT_PAREN => call(p)?,
            LEFT_BRACKET => subscript(p)?,
            _ => break,
        };
        trailers.push(trailer);
    }

    if await_kw.is_none() && trailers.is_empty() {
        return Ok(atom);
    }

    Ok(Node::AtomExpr(AtomExpr { span: p.span_from(start), await_kw, atom: Box::new(atom), trailers }))
}

fn attribute(p: &mut Parser<'_>) -> PResult<Trailer> {
    let start = p.offset();
    let dot = p.bump();
    let name = p.expect(NAME, "attribute name")?;
    Ok(Trailer::Attribute(Attribute { span: p.span_from(start), dot, name }))
}

fn call(p: &mut Parser<'_>) -> PResult<Trailer> {
    let start = p.offset();
    let open = p.bump();
    let arguments = if p.at(RIGHT_PAREN) { None } else { Some(Box::new(arglist(p)?)) };
    let close = p.expect(RIGHT_PAREN, "')'")?;
    Ok(Trailer::Call(Call { span: p.span_from(start), open, arguments, close }))
}

fn subscript(p: &mut Parser<'_>) -> PResult<Trailer> {
    let start = p.offset();
    let open = p.bump();
    let subscripts = sequence(p, ListKind::SubscriptList, slice, |p| !p.at(RIGHT_BRACKET))?;
    let close = p.expect(RIGHT_BRACKET, "']'")?;
    Ok(Trailer::Subscript(Subscript {
        span: p.span_from(start),
        open,
        subscripts: Box::new(subscripts),
        close,
    }))
}

/// `test | [test] ':' [test] [':' [test]]`
fn slice(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let lower = if p.at(COLON) {
        None
    } else {
        let lower = test(p)?;
        if !p.at(COLON) {
            return Ok(lower);
        }
        Some(Box::new(lower))
    };

    let first_op = p.bump();
    let upper = if p.at_set(&SLICE_END) { None } else { Some(Box::new(test(p)?)) };
    let (second_op, step) = match p.eat(COLON) {
        Some(colon) => {
            let step = if p.at_set(&STEP_END) { None } else { Some(Box::new(test(p)?)) };
            (Some(colon), step)
        }
        None => (None, None),
    };

    Ok(Node::Ternary(Ternary {
        span: p.span_from(start),
        kind: TernaryKind::Slice,
        left: lower,
        first_op,
        middle: upper,
        second_op,
        right: step,
    }))
}

/// Call arguments and class bases. A generator expression is allowed only
/// as the sole argument.
pub(crate) fn arglist(p: &mut Parser<'_>) -> PResult<Node> {
    let arguments = sequence(p, ListKind::ArgumentList, argument, |p| !p.at(RIGHT_PAREN))?;

    if let Node::List(List { kind: ListKind::ArgumentList, elements, .. }) = &arguments {
        if let Some(generator) = elements.iter().find(|element| is_comprehension(element)) {
            return Err(
                p.error_at(generator.span().start(), "Generator expression must be parenthesized")
            );
        }
    }

    Ok(arguments)
}

fn argument(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let unpack = match p.kind() {
        STAR => Some(UnaryKind::Star),
        DOUBLE_STAR => Some(UnaryKind::DoubleStar),
        _ => None,
    };
    if let Some(kind) = unpack {
        let op = p.bump();
        let value = test(p)?;
        return Ok(Node::unary(p.span_from(start), kind, op, Some(value)));
    }

    let value = test(p)?;
    match p.kind() {
        COLON_EQ => named_expr(p, start, value),
        EQ => {
            if value.as_name().is_none() {
                return Err(p.error_at(
                    start,
                    "expression cannot contain assignment, perhaps you meant \"==\"?",
                ));
            }
            let op = p.bump();
            let default = test(p)?;
            Ok(Node::binary(p.span_from(start), BinaryKind::Argument, value, op, default))
        }
        FOR_KW | ASYNC_KW => {
            let comprehension = atoms::comp_for(p)?;
            Ok(Node::list(
                p.span_from(start),
                ListKind::TestListComp,
                vec![value, comprehension],
                Vec::new(),
            ))
        }
        _ => Ok(value),
    }
}

/// `'yield' ['from' test | testlist_star_expr]`
pub(crate) fn yield_expr(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let yield_kw = p.bump();

    if let Some(from_kw) = p.eat(FROM_KW) {
        let value = test(p)?;
        return Ok(Node::YieldFrom(YieldFrom {
            span: p.span_from(start),
            yield_kw,
            from_kw,
            value: Box::new(value),
        }));
    }

    let value = if starts_expression(p) { Some(testlist_star_expr(p)?) } else { None };
    Ok(Node::unary(p.span_from(start), UnaryKind::Yield, yield_kw, value))
}
