use serpent_syntax::TokenKind::*;
use serpent_syntax::ast::*;

use super::exprs;
use crate::parser::{PResult, Parser};

/// `def` parameters carry annotations and type comments, `lambda`
/// parameters carry neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Style {
    Typed,
    Untyped,
}

/// `'(' [typedargslist] ')'`
pub(crate) fn parameters(p: &mut Parser<'_>) -> PResult<Parameters> {
    let start = p.offset();
    let open = p.expect(LEFT_PAREN, "'('")?;
    let list = if p.at(RIGHT_PAREN) { None } else { Some(parameter_list(p, Style::Typed)?) };
    let close = p.expect(RIGHT_PAREN, "')'")?;
    Ok(Parameters { span: p.span_from(start), open, list, close })
}

pub(crate) fn parameter_list(p: &mut Parser<'_>, style: Style) -> PResult<ParameterList> {
    let start = p.offset();
    let close = match style {
        Style::Typed => RIGHT_PAREN,
        Style::Untyped => COLON,
    };

    let mut parameters = Vec::new();
    let mut separators = Vec::new();
    let mut type_comments = Vec::new();
    loop {
        parameters.push(parameter(p, style)?);
        let Some(comma) = p.eat(COMMA) else { break };
        separators.push(comma);
        if style == Style::Typed {
            type_comments.extend(p.eat(TYPE_COMMENT));
        }
        if p.at(close) {
            break;
        }
    }
    if style == Style::Typed {
        type_comments.extend(p.eat(TYPE_COMMENT));
    }

    check_order(p, &parameters)?;
    Ok(ParameterList { span: p.span_from(start), parameters, separators, type_comments })
}

fn parameter(p: &mut Parser<'_>, style: Style) -> PResult<Parameter> {
    let start = p.offset();
    match p.kind() {
        SLASH => {
            let slash = p.bump();
            Ok(Parameter::PositionalOnly(PositionalOnly { span: p.span_from(start), slash }))
        }
        STAR => {
            let star = p.bump();
            let parameter = if p.at(NAME) { Some(named(p, style, false)?) } else { None };
            Ok(Parameter::VarPositional(VarPositional { span: p.span_from(start), star, parameter }))
        }
        DOUBLE_STAR => {
            let star = p.bump();
            let parameter = named(p, style, false)?;
            Ok(Parameter::VarKeyword(VarKeyword { span: p.span_from(start), star, parameter }))
        }
        _ => Ok(Parameter::Named(named(p, style, true)?)),
    }
}

/// `NAME [':' test] ['=' test]`
fn named(p: &mut Parser<'_>, style: Style, with_default: bool) -> PResult<NamedParameter> {
    let start = p.offset();
    let name = p.expect(NAME, "parameter name")?;
    let (colon, annotation) = if style == Style::Typed && p.at(COLON) {
        (Some(p.bump()), Some(exprs::test(p)?))
    } else {
        (None, None)
    };
    let (eq, default) = if with_default && p.at(EQ) {
        (Some(p.bump()), Some(exprs::test(p)?))
    } else {
        (None, None)
    };

    Ok(NamedParameter { span: p.span_from(start), name, colon, annotation, eq, default })
}

fn check_order(p: &Parser<'_>, parameters: &[Parameter]) -> PResult<()> {
    let mut slash = false;
    let mut star = false;
    let mut default = false;

    for (index, parameter) in parameters.iter().enumerate() {
        let position = parameter.span().start();
        let error = |message: &str| Err(p.error_at(position, message));

        if index > 0 && matches!(parameters[index - 1], Parameter::VarKeyword(_)) {
            return error("arguments cannot follow var-keyword argument");
        }

        match parameter {
            Parameter::PositionalOnly(_) => {
                if index == 0 {
                    return error("at least one argument must precede /");
                }
                if slash {
                    return error("/ may appear only once");
                }
                if star {
                    return error("/ must be ahead of *");
                }
                slash = true;
            }
            Parameter::VarPositional(var) => {
                if star {
                    return error("* argument may appear only once");
                }
                star = true;
                if var.parameter.is_none()
                    && !matches!(parameters.get(index + 1), Some(Parameter::Named(_)))
                {
                    return error("named arguments must follow bare *");
                }
            }
            Parameter::VarKeyword(_) => {}
            Parameter::Named(named) if !star => {
                if named.default.is_some() {
                    default = true;
                } else if default {
                    return error("non-default argument follows default argument");
                }
            }
            Parameter::Named(_) => {}
        }
    }

    Ok(())
}
