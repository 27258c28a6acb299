//! The four start rules.

use serpent_syntax::{NodeOrToken, Token};
use serpent_syntax::TokenKind::*;
use serpent_syntax::ast::*;

use super::{COMPOUND_FIRST, compound, exprs, sequence, stmts};
use crate::parser::{PResult, Parser};

/// `NEWLINE | simple_stmt | compound_stmt [NEWLINE]`
pub(crate) fn single_input(p: &mut Parser<'_>) -> PResult<SingleInput> {
    let start = p.offset();

    if p.at(NEWLINE) {
        let newline = p.bump();
        return Ok(SingleInput { span: p.span_from(start), statement: None, newline: Some(newline) });
    }

    if p.at_set(&COMPOUND_FIRST) {
        let statement = compound::compound_statement(p)?;
        let newline = p.eat(NEWLINE);
        return Ok(SingleInput { span: p.span_from(start), statement: Some(statement), newline });
    }

    let statement = stmts::simple_statement(p)?;
    Ok(SingleInput { span: p.span_from(start), statement: Some(statement), newline: None })
}

/// `(NEWLINE | stmt)* ENDMARKER`
pub(crate) fn file_input(p: &mut Parser<'_>) -> PResult<FileInput> {
    let start = p.offset();
    let mut elements = Vec::new();

    while !p.at(EOF) {
        let element = if p.at(NEWLINE) {
            NodeOrToken::Token(p.bump())
        } else {
            NodeOrToken::Node(stmts::statement(p)?)
        };
        elements.push(element);
    }
    let eof = p.bump();

    Ok(FileInput { span: p.span_from(start), elements, eof })
}

/// `testlist NEWLINE* ENDMARKER`
pub(crate) fn eval_input(p: &mut Parser<'_>) -> PResult<EvalInput> {
    let start = p.offset();
    let body = exprs::testlist(p)?;
    let newlines = newlines(p);
    let eof = p.expect(EOF, "end of input")?;
    Ok(EvalInput { span: p.span_from(start), body, newlines, eof })
}

/// `func_type NEWLINE* ENDMARKER`
pub(crate) fn func_type_input(p: &mut Parser<'_>) -> PResult<FuncTypeInput> {
    let start = p.offset();
    let func_type = func_type(p)?;
    let newlines = newlines(p);
    let eof = p.expect(EOF, "end of input")?;
    Ok(FuncTypeInput { span: p.span_from(start), func_type, newlines, eof })
}

fn newlines(p: &mut Parser<'_>) -> Vec<Token> {
    let mut newlines = Vec::new();
    while p.at(NEWLINE) {
        newlines.push(p.bump());
    }
    newlines
}

/// `'(' [typelist] ')' '->' test`
fn func_type(p: &mut Parser<'_>) -> PResult<FuncType> {
    let start = p.offset();
    let open = p.expect(LEFT_PAREN, "'('")?;
    let arguments = if p.at(RIGHT_PAREN) {
        None
    } else {
        Some(sequence(p, ListKind::TypeList, type_element, |p| !p.at(RIGHT_PAREN))?)
    };
    let close = p.expect(RIGHT_PAREN, "')'")?;
    let arrow = p.expect(ARROW, "'->'")?;
    let returns = exprs::test(p)?;
    Ok(FuncType { span: p.span_from(start), open, arguments, close, arrow, returns })
}

/// `test | '*' [test] | '**' test`
fn type_element(p: &mut Parser<'_>) -> PResult<Node> {
    let start = p.offset();
    match p.kind() {
        STAR => {
            let star = p.bump();
            let operand = if p.at(COMMA) || p.at(RIGHT_PAREN) { None } else { Some(exprs::test(p)?) };
            Ok(Node::unary(p.span_from(start), UnaryKind::Star, star, operand))
        }
        DOUBLE_STAR => {
            let star = p.bump();
            let operand = exprs::test(p)?;
            Ok(Node::unary(p.span_from(start), UnaryKind::DoubleStar, star, Some(operand)))
        }
        _ => exprs::test(p),
    }
}
