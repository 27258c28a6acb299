use expect_test::expect;
use serpent_syntax::TokenKind::*;
use serpent_syntax::Token;
use serpent_syntax::ast::*;

use super::{dump, expression, file_error};

#[test]
fn comparison_chain_nests_left() {
    expect![[r#"
        Binary(Less) 0..9
          Binary(Less) 0..6
            Literal(Name) 0..2
              NAME 0..1 "a"
            LT 2..3 "<"
            Literal(Name) 4..6
              NAME 4..5 "b"
          LT 6..7 "<"
          Literal(Name) 8..9
            NAME 8..9 "c"
    "#]]
    .assert_eq(&dump(&expression("a < b < c")));
}

#[test]
fn is_not_is_a_single_operator() {
    expect![[r#"
        ExtendedBinary(IsNot) 0..13
          Literal(Name) 0..2
            NAME 0..1 "x"
          IS_KW 2..4 "is"
          NOT_KW 5..8 "not"
          Literal(None) 9..13
            NONE_KW 9..13 "None"
    "#]]
    .assert_eq(&dump(&expression("x is not None")));

    let Node::Binary(is) = expression("x is y") else { panic!("expected binary") };
    assert_eq!(is.kind, BinaryKind::Is);

    let Node::Binary(is) = expression("x is (not y)") else { panic!("expected binary") };
    assert_eq!(is.kind, BinaryKind::Is);
    assert!(matches!(*is.right, Node::Container(_)));
}

#[test]
fn not_in() {
    let Node::ExtendedBinary(not_in) = expression("a not in b") else { panic!("expected not in") };
    assert_eq!(not_in.kind, ExtendedBinaryKind::NotIn);
    assert_eq!(not_in.first_op.kind, NOT_KW);
    assert_eq!(not_in.second_op.kind, IN_KW);
}

#[test]
fn operator_precedence() {
    let Node::Binary(add) = expression("a + b * c") else { panic!("expected binary") };
    assert_eq!(add.kind, BinaryKind::Add);
    assert!(matches!(*add.right, Node::Binary(Binary { kind: BinaryKind::Mul, .. })));

    let Node::Binary(or) = expression("a or b and not c") else { panic!("expected binary") };
    assert_eq!(or.kind, BinaryKind::Or);
    let Node::Binary(and) = *or.right else { panic!("expected and") };
    assert_eq!(and.kind, BinaryKind::And);
    assert!(matches!(*and.right, Node::Unary(Unary { kind: UnaryKind::Not, .. })));

    let Node::Binary(bits) = expression("a | b ^ c & d << e") else { panic!("expected binary") };
    assert_eq!(bits.kind, BinaryKind::BitOr);
    let Node::Binary(xor) = *bits.right else { panic!("expected xor") };
    assert_eq!(xor.kind, BinaryKind::BitXor);
    let Node::Binary(and) = *xor.right else { panic!("expected and") };
    assert_eq!(and.kind, BinaryKind::BitAnd);
    assert!(matches!(*and.right, Node::Binary(Binary { kind: BinaryKind::ShiftLeft, .. })));
}

#[test]
fn power_is_right_associative_and_binds_tighter_than_unary() {
    let Node::Binary(power) = expression("a ** b ** c") else { panic!("expected binary") };
    assert_eq!(power.kind, BinaryKind::Power);
    assert!(matches!(*power.left, Node::Literal(_)));
    assert!(matches!(*power.right, Node::Binary(Binary { kind: BinaryKind::Power, .. })));

    let Node::Unary(minus) = expression("-a ** -b") else { panic!("expected unary") };
    assert_eq!(minus.kind, UnaryKind::Minus);
    let Some(Node::Binary(power)) = minus.operand.as_deref() else { panic!("expected power") };
    assert!(matches!(*power.right, Node::Unary(Unary { kind: UnaryKind::Minus, .. })));
}

#[test]
fn conditional_expression() {
    let Node::Ternary(ternary) = expression("a if b else c if d else e") else {
        panic!("expected ternary")
    };
    assert_eq!(ternary.kind, TernaryKind::Conditional);
    assert_eq!(ternary.left.as_deref().and_then(Node::as_name).map(Token::text), Some("a"));
    assert_eq!(ternary.middle.as_deref().and_then(Node::as_name).map(Token::text), Some("b"));
    assert!(matches!(
        ternary.right.as_deref(),
        Some(Node::Ternary(Ternary { kind: TernaryKind::Conditional, .. }))
    ));
}

#[test]
fn lambda_parameters() {
    let Node::Lambda(lambda) = expression("lambda x, y=1, *args, z, **kwargs: x") else {
        panic!("expected lambda")
    };
    assert_eq!(lambda.kind, LambdaKind::Lambda);
    let parameters = lambda.parameters.as_ref().map(|list| list.parameters.as_slice()).unwrap_or_default();
    assert!(matches!(
        parameters,
        [
            Parameter::Named(NamedParameter { default: None, .. }),
            Parameter::Named(NamedParameter { default: Some(_), .. }),
            Parameter::VarPositional(VarPositional { parameter: Some(_), .. }),
            Parameter::Named(_),
            Parameter::VarKeyword(_),
        ]
    ));

    let Node::Lambda(bare) = expression("lambda: 0") else { panic!("expected lambda") };
    assert!(bare.parameters.is_none());
}

#[test]
fn lambda_without_conditional_in_comprehension_condition() {
    let Node::Container(list) = expression("[x for x in y if lambda: x]") else {
        panic!("expected list")
    };
    let Some(Node::List(elements)) = list.inner.as_deref() else { panic!("expected comprehension") };
    let Node::CompFor(comp_for) = &elements.elements[1] else { panic!("expected for clause") };
    let Some(Node::CompIf(comp_if)) = comp_for.next.as_deref() else { panic!("expected if clause") };
    assert!(matches!(&*comp_if.test, Node::Lambda(lambda) if lambda.kind == LambdaKind::LambdaNoCond));
}

#[test]
fn parenthesized_expression_keeps_its_parentheses() {
    let Node::Container(paren) = expression("(x)") else { panic!("expected container") };
    assert_eq!(paren.kind, ContainerKind::Paren);
    assert!(paren.inner.as_deref().and_then(Node::as_name).is_some());

    let Node::Container(empty) = expression("()") else { panic!("expected container") };
    assert_eq!(empty.kind, ContainerKind::Tuple);
    let Node::Container(yielded) = expression("(yield)") else { panic!("expected container") };
    assert_eq!(yielded.kind, ContainerKind::Tuple);

    let Node::Container(tuple) = expression("(a, b,)") else { panic!("expected container") };
    let Some(Node::List(elements)) = tuple.inner.as_deref() else { panic!("expected elements") };
    assert_eq!(elements.kind, ListKind::TestListComp);
    assert_eq!(elements.elements.len(), 2);
    assert!(elements.has_trailing_separator());

    let Node::Container(empty) = expression("()") else { panic!("expected container") };
    assert!(empty.inner.is_none());
}

#[test]
fn bare_tuple_of_tests() {
    let Node::List(list) = expression("a, b") else { panic!("expected list") };
    assert_eq!(list.kind, ListKind::TestList);
    assert_eq!(list.elements.len(), 2);
    assert_eq!(list.separators.len(), 1);
}

#[test]
fn call_arguments() {
    let Node::AtomExpr(call) = expression("f(a, b=1, *c, **d)") else { panic!("expected call") };
    let [Trailer::Call(Call { arguments: Some(arguments), .. })] = call.trailers.as_slice() else {
        panic!("expected one call trailer")
    };
    let Node::List(arguments) = &**arguments else { panic!("expected argument list") };
    assert_eq!(arguments.kind, ListKind::ArgumentList);
    assert!(matches!(
        arguments.elements.as_slice(),
        [
            Node::Literal(_),
            Node::Binary(Binary { kind: BinaryKind::Argument, .. }),
            Node::Unary(Unary { kind: UnaryKind::Star, .. }),
            Node::Unary(Unary { kind: UnaryKind::DoubleStar, .. }),
        ]
    ));
}

#[test]
fn sole_generator_argument() {
    let Node::AtomExpr(call) = expression("sum(x for x in y)") else { panic!("expected call") };
    let [Trailer::Call(Call { arguments: Some(arguments), .. })] = call.trailers.as_slice() else {
        panic!("expected one call trailer")
    };
    assert!(matches!(
        &**arguments,
        Node::List(List { kind: ListKind::TestListComp, elements, .. })
            if matches!(elements.as_slice(), [Node::Literal(_), Node::CompFor(_)])
    ));
}

#[test]
fn generator_among_other_arguments() {
    let error = file_error("f(a, x for x in y)\n");
    assert_eq!(error.message(), "Generator expression must be parenthesized");
    assert_eq!(u32::from(error.position()), 5);
}

#[test]
fn keyword_argument_needs_a_name() {
    let error = file_error("f(a.b=1)\n");
    assert_eq!(error.message(), "expression cannot contain assignment, perhaps you meant \"==\"?");
    assert_eq!(u32::from(error.position()), 2);
}

#[test]
fn trailers_chain() {
    let Node::AtomExpr(chain) = expression("a.b(c)[d].e") else { panic!("expected atom expr") };
    assert!(chain.await_kw.is_none());
    assert!(matches!(
        chain.trailers.as_slice(),
        [Trailer::Attribute(_), Trailer::Call(_), Trailer::Subscript(_), Trailer::Attribute(_)]
    ));
}

#[test]
fn slices() {
    let Node::AtomExpr(item) = expression("a[1:2, ::3, :]") else { panic!("expected atom expr") };
    let [Trailer::Subscript(subscript)] = item.trailers.as_slice() else { panic!("expected subscript") };
    let Node::List(subscripts) = &*subscript.subscripts else { panic!("expected subscript list") };
    assert_eq!(subscripts.kind, ListKind::SubscriptList);

    let [Node::Ternary(first), Node::Ternary(second), Node::Ternary(third)] =
        subscripts.elements.as_slice()
    else {
        panic!("expected three slices")
    };
    assert!(first.left.is_some() && first.middle.is_some() && first.second_op.is_none());
    assert!(second.left.is_none() && second.middle.is_none());
    assert!(second.second_op.is_some() && second.right.is_some());
    assert!(third.left.is_none() && third.middle.is_none() && third.second_op.is_none());
    assert!([first, second, third].iter().all(|slice| slice.kind == TernaryKind::Slice));
}

#[test]
fn dict_and_set_displays() {
    let Node::Container(dict) = expression("{a: b, **c}") else { panic!("expected dict") };
    assert_eq!(dict.kind, ContainerKind::Dict);
    let Some(Node::List(elements)) = dict.inner.as_deref() else { panic!("expected elements") };
    assert_eq!(elements.kind, ListKind::DictElements);
    assert!(matches!(
        elements.elements.as_slice(),
        [
            Node::Binary(Binary { kind: BinaryKind::KeyValue, .. }),
            Node::Unary(Unary { kind: UnaryKind::DoubleStar, .. }),
        ]
    ));

    let Node::Container(set) = expression("{a, *b}") else { panic!("expected set") };
    assert_eq!(set.kind, ContainerKind::Set);
    let Some(Node::List(elements)) = set.inner.as_deref() else { panic!("expected elements") };
    assert_eq!(elements.kind, ListKind::SetElements);
    assert_eq!(elements.elements.len(), 2);

    let Node::Container(empty) = expression("{}") else { panic!("expected dict") };
    assert_eq!(empty.kind, ContainerKind::Dict);
    assert!(empty.inner.is_none());
}

#[test]
fn dict_comprehension() {
    let Node::Container(dict) = expression("{k: v for k, v in items if k}") else {
        panic!("expected dict")
    };
    let Some(Node::List(elements)) = dict.inner.as_deref() else { panic!("expected elements") };
    let [Node::Binary(pair), Node::CompFor(comp_for)] = elements.elements.as_slice() else {
        panic!("expected a pair and a for clause")
    };
    assert_eq!(pair.kind, BinaryKind::KeyValue);
    assert!(matches!(&*comp_for.targets, Node::List(List { kind: ListKind::ExprList, .. })));
    assert!(matches!(comp_for.next.as_deref(), Some(Node::CompIf(CompIf { next: None, .. }))));
}

#[test]
fn async_comprehension() {
    let Node::Container(list) = expression("[x async for x in y]") else { panic!("expected list") };
    let Some(Node::List(elements)) = list.inner.as_deref() else { panic!("expected elements") };
    let [_, Node::Unary(clause)] = elements.elements.as_slice() else { panic!("expected async clause") };
    assert_eq!(clause.kind, UnaryKind::AsyncComprehension);
    assert!(matches!(clause.operand.as_deref(), Some(Node::CompFor(_))));
}

#[test]
fn adjacent_strings() {
    let Node::StringSequence(strings) = expression("'a' \"b\" r'c'") else {
        panic!("expected string sequence")
    };
    assert_eq!(strings.tokens.iter().map(Token::text).collect::<Vec<_>>(), ["'a'", "\"b\"", "r'c'"]);

    assert!(matches!(expression("'a'"), Node::Literal(Literal { kind: LiteralKind::String, .. })));
}

#[test]
fn named_expression() {
    let Node::Container(paren) = expression("(y := f(x))") else { panic!("expected container") };
    assert!(matches!(
        paren.inner.as_deref(),
        Some(Node::Binary(Binary { kind: BinaryKind::NamedExpr, .. }))
    ));

    let error = file_error("(a.b := 1)\n");
    assert_eq!(error.message(), "cannot use assignment expressions with attribute");
    assert_eq!(u32::from(error.position()), 1);
}

#[test]
fn await_expression() {
    let Node::AtomExpr(awaited) = expression("await a.b") else { panic!("expected atom expr") };
    assert!(awaited.await_kw.is_some());
    assert!(awaited.atom.as_name().is_some());
    assert_eq!(awaited.trailers.len(), 1);
}

#[test]
fn literals() {
    let kinds = ["x", "1", "'s'", "True", "False", "None", "..."].map(|text| match expression(text) {
        Node::Literal(literal) => literal.kind,
        node => panic!("{text:?} parsed as {node:?}"),
    });
    assert_eq!(
        kinds,
        [
            LiteralKind::Name,
            LiteralKind::Number,
            LiteralKind::String,
            LiteralKind::True,
            LiteralKind::False,
            LiteralKind::None,
            LiteralKind::Ellipsis,
        ]
    );
}

#[test]
fn incomplete_conditional() {
    let error = file_error("a if b\n");
    assert_eq!(error.message(), "expected 'else' in conditional expression, found newline");
    assert_eq!(u32::from(error.position()), 6);
}
