use serpent_syntax::TokenKind::*;
use serpent_syntax::ast::*;

use super::targets::{self, TargetContext};
use super::{always, dotted_name, exprs, params, separated, stmts};
use crate::parser::{PResult, Parser};

pub(crate) fn compound_statement(p: &mut Parser<'_>) -> PResult<Node> {
    p.nested(|p| match p.kind() {
        IF_KW => if_statement(p),
        WHILE_KW => while_statement(p),
        FOR_KW => for_statement(p),
        TRY_KW => try_statement(p),
        WITH_KW => with_statement(p),
        DEF_KW => funcdef(p),
        CLASS_KW => classdef(p),
        AT => decorated(p),
        ASYNC_KW => async_statement(p),
        _ => Err(p.unexpected("statement")),
    })
}

/// `simple_stmt | NEWLINE INDENT stmt+ DEDENT`
pub(crate) fn suite(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(NEWLINE) { block(p, false) } else { stmts::simple_statement(p) }
}

/// A function body, which may open with a signature type comment line.
fn func_body_suite(p: &mut Parser<'_>) -> PResult<Node> {
    if p.at(NEWLINE) { block(p, true) } else { stmts::simple_statement(p) }
}

fn block(p: &mut Parser<'_>, signature_comment: bool) -> PResult<Node> {
    let start = p.offset();
    let newline = p.bump();
    let type_comment = if signature_comment && p.at(TYPE_COMMENT) {
        let comment = p.bump();
        let newline = p.expect(NEWLINE, "newline after type comment")?;
        Some(TypeCommentLine { comment, newline })
    } else {
        None
    };
    let indent = p.expect(INDENT, "an indented block")?;

    let mut statements = Vec::new();
    loop {
        statements.push(stmts::statement(p)?);
        if p.at(DEDENT) || p.at(EOF) {
            break;
        }
    }
    let dedent = p.expect(DEDENT, "dedent")?;

    Ok(Node::Suite(Suite { span: p.span_from(start), newline, type_comment, indent, statements, dedent }))
}

fn clause(p: &mut Parser<'_>) -> PResult<Clause> {
    let start = p.offset();
    let keyword = p.bump();
    let colon = p.expect(COLON, "':'")?;
    let body = suite(p)?;
    Ok(Clause { span: p.span_from(start), keyword, colon, body })
}

fn else_clause(p: &mut Parser<'_>) -> PResult<Option<Clause>> {
    if p.at(ELSE_KW) { clause(p).map(Some) } else { Ok(None) }
}

fn if_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let if_kw = p.bump();
    let test = exprs::namedexpr_test(p)?;
    let colon = p.expect(COLON, "':'")?;
    let body = suite(p)?;

    let mut elifs = Vec::new();
    while p.at(ELIF_KW) {
        let start = p.offset();
        let elif_kw = p.bump();
        let test = exprs::namedexpr_test(p)?;
        let colon = p.expect(COLON, "':'")?;
        let body = suite(p)?;
        elifs.push(Elif { span: p.span_from(start), elif_kw, test, colon, body });
    }
    let orelse = else_clause(p)?;

    Ok(Node::If(Box::new(If { span: p.span_from(start), if_kw, test, colon, body, elifs, orelse })))
}

fn while_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let while_kw = p.bump();
    let test = exprs::namedexpr_test(p)?;
    let colon = p.expect(COLON, "':'")?;
    let body = {
        let mut p = p.enter_loop();
        suite(&mut p)?
    };
    let orelse = else_clause(p)?;

    Ok(Node::While(Box::new(While { span: p.span_from(start), while_kw, test, colon, body, orelse })))
}

/// `'for' exprlist 'in' testlist ':' [TYPE_COMMENT] suite ['else' ':' suite]`
fn for_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let for_kw = p.bump();
    let targets = exprs::exprlist(p)?;
    targets::check_assignable(p, &targets, TargetContext::Assign)?;
    let in_kw = p.expect(IN_KW, "'in'")?;
    let iter = exprs::testlist(p)?;
    let colon = p.expect(COLON, "':'")?;
    let type_comment = p.eat(TYPE_COMMENT);
    let body = {
        let mut p = p.enter_loop();
        suite(&mut p)?
    };
    let orelse = else_clause(p)?;

    Ok(Node::For(Box::new(For {
        span: p.span_from(start),
        for_kw,
        targets,
        in_kw,
        iter,
        colon,
        type_comment,
        body,
        orelse,
    })))
}

fn try_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let try_kw = p.bump();
    let colon = p.expect(COLON, "':'")?;
    let body = suite(p)?;

    let mut handlers: Vec<ExceptHandler> = Vec::new();
    while p.at(EXCEPT_KW) {
        if let Some(default) = handlers.last().filter(|handler| handler.test.is_none()) {
            return Err(p.error_at(default.span.start(), "default 'except:' must be last"));
        }
        handlers.push(except_handler(p)?);
    }

    let orelse = if handlers.is_empty() { None } else { else_clause(p)? };
    let finally = if p.at(FINALLY_KW) { Some(clause(p)?) } else { None };
    if handlers.is_empty() && finally.is_none() {
        return Err(p.unexpected("'except' or 'finally' block"));
    }

    Ok(Node::Try(Box::new(Try { span: p.span_from(start), try_kw, colon, body, handlers, orelse, finally })))
}

/// `'except' [test ['as' NAME]] ':' suite`
fn except_handler(p: &mut Parser<'_>) -> PResult<ExceptHandler> {
    let start = p.offset();
    let except_kw = p.bump();
    if p.at(STAR) {
        return Err(p.unsupported(start, "except* clause"));
    }

    let test = if p.at(COLON) { None } else { Some(exprs::test(p)?) };
    let as_kw = if test.is_some() { p.eat(AS_KW) } else { None };
    let (as_kw, name) = match as_kw {
        Some(as_kw) => (Some(as_kw), Some(p.expect(NAME, "name after 'as'")?)),
        None => (None, None),
    };
    let colon = p.expect(COLON, "':'")?;
    let body = suite(p)?;

    Ok(ExceptHandler { span: p.span_from(start), except_kw, test, as_kw, name, colon, body })
}

fn with_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let with_kw = p.bump();

    let items_start = p.offset();
    let first = with_item(p)?;
    let (elements, separators) = separated(p, first, with_item, always)?;
    let items = List { span: p.span_from(items_start), kind: ListKind::WithItems, elements, separators };

    let colon = p.expect(COLON, "':'")?;
    let type_comment = p.eat(TYPE_COMMENT);
    let body = suite(p)?;

    Ok(Node::With(Box::new(With { span: p.span_from(start), with_kw, items, colon, type_comment, body })))
}

/// `test ['as' expr]`
fn with_item(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let context = exprs::test(p)?;
    let Some(as_kw) = p.eat(AS_KW) else { return Ok(context) };

    let target = exprs::expr(p)?;
    targets::check_assignable(p, &target, TargetContext::Assign)?;
    Ok(Node::binary(p.span_from(start), BinaryKind::As, context, as_kw, target))
}

/// `'def' NAME parameters ['->' test] ':' [TYPE_COMMENT] func_body_suite`
fn funcdef(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let def_kw = p.bump();
    let name = p.expect(NAME, "function name")?;
    let parameters = params::parameters(p)?;
    let (arrow, returns) = match p.eat(ARROW) {
        Some(arrow) => (Some(arrow), Some(exprs::test(p)?)),
        None => (None, None),
    };
    let colon = p.expect(COLON, "':'")?;
    let type_comment = p.eat(TYPE_COMMENT);
    let body = {
        let mut p = p.enter_function();
        func_body_suite(&mut p)?
    };

    Ok(Node::FuncDef(Box::new(FuncDef {
        span: p.span_from(start),
        def_kw,
        name,
        parameters,
        arrow,
        returns,
        colon,
        type_comment,
        body,
    })))
}

/// `'class' NAME ['(' [arglist] ')'] ':' suite`
fn classdef(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let class_kw = p.bump();
    let name = p.expect(NAME, "class name")?;

    let (open, bases, close) = match p.eat(LEFT_PAREN) {
        Some(open) => {
            let bases = if p.at(RIGHT_PAREN) { None } else { Some(exprs::arglist(p)?) };
            let close = p.expect(RIGHT_PAREN, "')'")?;
            (Some(open), bases, Some(close))
        }
        None => (None, None, None),
    };
    let colon = p.expect(COLON, "':'")?;
    let body = {
        let mut p = p.enter_class();
        suite(&mut p)?
    };

    Ok(Node::ClassDef(Box::new(ClassDef {
        span: p.span_from(start),
        class_kw,
        name,
        open,
        bases,
        close,
        colon,
        body,
    })))
}

fn decorated(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let mut decorators = Vec::new();
    while p.at(AT) {
        decorators.push(decorator(p)?);
    }

    let definition = match p.kind() {
        DEF_KW => funcdef(p)?,
        CLASS_KW => classdef(p)?,
        ASYNC_KW => async_funcdef(p)?,
        _ => return Err(p.unexpected("function or class definition")),
    };

    Ok(Node::Decorated(Box::new(Decorated { span: p.span_from(start), decorators, definition })))
}

/// `'@' dotted_name ['(' [arglist] ')'] NEWLINE`
fn decorator(p: &mut Parser<'_>) -> PResult<Decorator> {
    let start = p.offset();
    let at = p.bump();
    let name = dotted_name(p)?;
    let (open, arguments, close) = match p.eat(LEFT_PAREN) {
        Some(open) => {
            let arguments = if p.at(RIGHT_PAREN) { None } else { Some(exprs::arglist(p)?) };
            let close = p.expect(RIGHT_PAREN, "')'")?;
            (Some(open), arguments, Some(close))
        }
        None => (None, None, None),
    };
    let newline = p.expect(NEWLINE, "newline after decorator")?;

    Ok(Decorator { span: p.span_from(start), at, name, open, arguments, close, newline })
}

/// `'async' (funcdef | with_stmt | for_stmt)`
fn async_statement(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let async_kw = p.bump();
    let statement = match p.kind() {
        DEF_KW => funcdef(p)?,
        WITH_KW => with_statement(p)?,
        FOR_KW => for_statement(p)?,
        _ => return Err(p.unexpected("'def', 'with' or 'for' after 'async'")),
    };
    Ok(Node::unary(p.span_from(start), UnaryKind::Async, async_kw, Some(statement)))
}

fn async_funcdef(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    let async_kw = p.bump();
    if !p.at(DEF_KW) {
        return Err(p.unexpected("'def' after 'async'"));
    }
    let definition = funcdef(p)?;
    Ok(Node::unary(p.span_from(start), UnaryKind::Async, async_kw, Some(definition)))
}
