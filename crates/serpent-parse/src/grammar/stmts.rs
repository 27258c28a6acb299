use serpent_syntax::TokenKind::{self, *};
use serpent_syntax::ast::*;
use text_size::TextSize;

use super::targets::{self, TargetContext};
use super::{COMPOUND_FIRST, always, compound, dotted_name, exprs, name, sequence, starts_expression};
use crate::parser::{PResult, Parser};

pub(crate) fn statement(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at_set(&COMPOUND_FIRST) {
        return compound::compound_statement(p);
    }
    if p.at(INDENT) {
        return Err(p.error("unexpected indent"));
    }
    simple_statement(p)
}

/// `small_stmt (';' small_stmt)* [';'] NEWLINE`
pub(crate) fn simple_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let mut elements = vec![small_statement(p)?];
    let mut separators = Vec::new();

    while p.at(SEMICOLON) {
        separators.push(p.bump());
        if p.at(NEWLINE) {
            break;
        }
        elements.push(small_statement(p)?);
    }

    let statements =
        List { span: p.span_from(start), kind: ListKind::SmallStatements, elements, separators };
    let newline = p.expect(NEWLINE, "newline")?;
    Ok(Node::SimpleStatement(SimpleStatement { span: p.span_from(start), statements, newline }))
}

fn small_statement(p: &mut Parser<'_>) -> PResult<Node> {
    match p.kind() {
        DEL_KW => del_statement(p),
        PASS_KW => Ok(keyword(p, KeywordKind::Pass)),
        BREAK_KW => {
            if !p.in_loop() {
                return Err(p.error("'break' outside loop"));
            }
            Ok(keyword(p, KeywordKind::Break))
        }
        CONTINUE_KW => {
            if !p.in_loop() {
                return Err(p.error("'continue' not properly in loop"));
            }
            Ok(keyword(p, KeywordKind::Continue))
        }
        RETURN_KW => return_statement(p),
        RAISE_KW => raise_statement(p),
        YIELD_KW => exprs::yield_expr(p),
        IMPORT_KW => import_name(p),
        FROM_KW => import_from(p),
        GLOBAL_KW => names_statement(p, UnaryKind::Global),
        NONLOCAL_KW => names_statement(p, UnaryKind::Nonlocal),
        ASSERT_KW => assert_statement(p),
        _ => expr_statement(p),
    }
}

fn keyword(p: &mut Parser<'_>, kind: KeywordKind) -> Node {
    let start = p.offset();
    let token = p.bump();
    Node::Keyword(Keyword { span: p.span_from(start), kind, token })
}

fn expr_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let first = exprs::testlist_star_expr(p)?;

    // `match x:` reads as the name `match` directly followed by another
    // expression, which no other statement allows.
    if is_name(&first, "match") && starts_expression(p) {
        return Err(p.unsupported(start, "match statement"));
    }

    match p.kind() {
        COLON => annotated_assignment(p, start, first),
        EQ => assignment(p, start, first),
        kind if kind.is_augmented_assign() => augmented_assignment(p, start, kind, first),
        _ => Ok(first),
    }
}

fn is_name(node: &Node, text: &str) -> bool {
    node.as_name().is_some_and(|token| token.text() == text)
}

/// `match(x):` and `match[x]:` parse as a call or subscript of `match`
/// up to the colon.
fn is_match_subject(node: &Node) -> bool {
    let Node::AtomExpr(atom) = node else { return false };
    atom.await_kw.is_none()
        && is_name(&atom.atom, "match")
        && matches!(atom.trailers.as_slice(), [Trailer::Call(_) | Trailer::Subscript(_)])
}

fn annotated_assignment(p: &mut Parser<'_>, start: TextSize, target: Node) -> PResult<Node> {
    let colon = p.bump();
    if p.at(NEWLINE) && is_match_subject(&target) {
        return Err(p.unsupported(start, "match statement"));
    }
    targets::check_annotated(p, &target)?;

    let annotation = exprs::test(p)?;
    let (eq, value) = match p.eat(EQ) {
        Some(eq) => (Some(eq), Some(Box::new(assigned_value(p)?))),
        None => (None, None),
    };

    Ok(Node::Ternary(Ternary {
        span: p.span_from(start),
        kind: TernaryKind::AnnotatedAssign,
        left: Some(Box::new(target)),
        first_op: colon,
        middle: Some(Box::new(annotation)),
        second_op: eq,
        right: value,
    }))
}

fn assigned_value(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(YIELD_KW) { exprs::yield_expr(p) } else { exprs::testlist_star_expr(p) }
}

/// `target ('=' target)* '=' value [TYPE_COMMENT]`
fn assignment(p: &mut Parser<'_>, start: TextSize, first: Node) -> PResult<Node> {
    let mut builder = AssignmentBuilder::new(first);
    while p.at(EQ) {
        let op = p.bump();
        let value = assigned_value(p)?;
        builder.push(op, value);
    }

    for target in builder.targets() {
        targets::check_assignable(p, target, TargetContext::Assign)?;
    }
    if let Some(comment) = p.eat(TYPE_COMMENT) {
        builder.type_comment(comment);
    }

    Ok(Node::Assignment(builder.finish(p.span_from(start))))
}

fn augmented_operator(kind: TokenKind) -> Option<BinaryKind> {
    let kind = match kind {
        PLUS_EQ => BinaryKind::AddAssign,
        MINUS_EQ => BinaryKind::SubAssign,
        STAR_EQ => BinaryKind::MulAssign,
        AT_EQ => BinaryKind::MatMulAssign,
        SLASH_EQ => BinaryKind::DivAssign,
        PERCENT_EQ => BinaryKind::ModuloAssign,
        AMP_EQ => BinaryKind::BitAndAssign,
        PIPE_EQ => BinaryKind::BitOrAssign,
        CARET_EQ => BinaryKind::BitXorAssign,
        SHL_EQ => BinaryKind::ShiftLeftAssign,
        SHR_EQ => BinaryKind::ShiftRightAssign,
        DOUBLE_STAR_EQ => BinaryKind::PowerAssign,
        DOUBLE_SLASH_EQ => BinaryKind::FloorDivAssign,
        _ => return None,
    };
    Some(kind)
}

fn augmented_assignment(
    p: &mut Parser<'_>,
    start: TextSize,
    operator: TokenKind,
    target: Node,
) -> PResult<Node> {
    let Some(kind) = augmented_operator(operator) else { return Ok(target) };
    targets::check_augmented(p, &target)?;

    let op = p.bump();
    let value = if p.at(YIELD_KW) { exprs::yield_expr(p)? } else { exprs::testlist(p)? };
    Ok(Node::binary(p.span_from(start), kind, target, op, value))
}

fn del_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let del_kw = p.bump();
    let targets = exprs::exprlist(p)?;
    targets::check_assignable(p, &targets, TargetContext::Delete)?;
    Ok(Node::unary(p.span_from(start), UnaryKind::Del, del_kw, Some(targets)))
}

fn return_statement(p: &mut Parser<'_>) -> PResult<Node> {
    if !p.in_function() {
        return Err(p.error("'return' outside function"));
    }

    let start = p.offset();
    let return_kw = p.bump();
    let value = if starts_expression(p) { Some(exprs::testlist_star_expr(p)?) } else { None };
    Ok(Node::unary(p.span_from(start), UnaryKind::Return, return_kw, value))
}

/// `'raise' [test ['from' test]]`
fn raise_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let raise_kw = p.bump();
    let exception = if starts_expression(p) { Some(exprs::test(p)?) } else { None };
    let from_kw = if exception.is_some() { p.eat(FROM_KW) } else { None };
    let (from_kw, cause) = match from_kw {
        Some(from_kw) => (Some(from_kw), Some(exprs::test(p)?)),
        None => (None, None),
    };

    Ok(Node::Raise(Box::new(Raise { span: p.span_from(start), raise_kw, exception, from_kw, cause })))
}

/// `'import' dotted_as_name (',' dotted_as_name)*`
fn import_name(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let import_kw = p.bump();
    let names = sequence(p, ListKind::DottedAsNames, dotted_as_name, always)?;
    Ok(Node::unary(p.span_from(start), UnaryKind::Import, import_kw, Some(names)))
}

fn dotted_as_name(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let module = dotted_name(p)?;
    alias(p, start, module)
}

fn import_as_name(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let imported = name(p)?;
    alias(p, start, imported)
}

fn alias(p: &mut Parser<'_>, start: TextSize, imported: Node) -> PResult<Node> {
    let Some(as_kw) = p.eat(AS_KW) else { return Ok(imported) };
    let alias = name(p)?;
    Ok(Node::binary(p.span_from(start), BinaryKind::As, imported, as_kw, alias))
}

/// `'from' ('.'* dotted_name | '.'+) 'import' ('*' | '(' names ')' | names)`
fn import_from(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let from_kw = p.bump();

    let mut dots = Vec::new();
    while p.at(DOT) || p.at(ELLIPSIS) {
        dots.push(p.bump());
    }
    let module = if dots.is_empty() || p.at(NAME) { Some(dotted_name(p)?) } else { None };
    let import_kw = p.expect(IMPORT_KW, "'import'")?;

    let (star, open, names, close) = match p.kind() {
        STAR => (Some(p.bump()), None, None, None),
        LEFT_PAREN => {
            let open = p.bump();
            let names = sequence(p, ListKind::ImportAsNames, import_as_name, |p| !p.at(RIGHT_PAREN))?;
            let close = p.expect(RIGHT_PAREN, "')'")?;
            (None, Some(open), Some(names), Some(close))
        }
        _ => {
            let names = sequence(p, ListKind::ImportAsNames, import_as_name, |p| p.at(NAME))?;
            if let Node::List(list) = &names {
                if let Some(comma) = list.separators.last().filter(|_| list.has_trailing_separator()) {
                    return Err(p.error_at(
                        comma.range.start(),
                        "trailing comma not allowed without surrounding parentheses",
                    ));
                }
            }
            (None, None, Some(names), None)
        }
    };

    Ok(Node::ImportFrom(Box::new(ImportFrom {
        span: p.span_from(start),
        from_kw,
        dots,
        module,
        import_kw,
        star,
        open,
        names,
        close,
    })))
}

/// `global` and `nonlocal` declarations.
fn names_statement(p: &mut Parser<'_>, kind: UnaryKind) -> PResult<Node> {
    let start = p.offset();
    let keyword = p.bump();
    let names = sequence(p, ListKind::Names, name, always)?;
    Ok(Node::unary(p.span_from(start), kind, keyword, Some(names)))
}

fn assert_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let assert_kw = p.bump();
    let test = exprs::test(p)?;
    let (comma, message) = match p.eat(COMMA) {
        Some(comma) => (Some(comma), Some(exprs::test(p)?)),
        None => (None, None),
    };

    Ok(Node::Assert(Box::new(Assert { span: p.span_from(start), assert_kw, test, comma, message })))
}
