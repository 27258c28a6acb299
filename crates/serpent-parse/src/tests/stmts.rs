use expect_test::expect;
use serpent_syntax::TokenKind::*;
use serpent_syntax::ast::*;
use serpent_syntax::Token;
use serpent_tokenizer::{Tokenizer, TokenizerOptions};

use super::{dump, file, statement, typed_file};
use crate::{Mode, ParseOptions, Parser, Tree, parse, parse_func_type_input, parse_single_input};

#[test]
fn for_else() {
    expect![[r#"
        FileInput 0..37
          For 0..37
            FOR_KW 0..3 "for"
            Literal(Name) 4..6
              NAME 4..5 "x"
            IN_KW 6..8 "in"
            Literal(Name) 9..10
              NAME 9..10 "y"
            COLON 10..11 ":"
            Suite 11..22
              NEWLINE 11..12
              INDENT 12..16
              SimpleStatement 16..22
                List(SmallStatements) 16..21
                  Keyword(Break) 16..21
                    BREAK_KW 16..21 "break"
                NEWLINE 21..22
              DEDENT 22..22
            Clause(ELSE_KW) 22..37
              ELSE_KW 22..26 "else"
              COLON 26..27 ":"
              Suite 27..37
                NEWLINE 27..28
                INDENT 28..32
                SimpleStatement 32..37
                  List(SmallStatements) 32..36
                    Keyword(Pass) 32..36
                      PASS_KW 32..36 "pass"
                  NEWLINE 36..37
                DEDENT 37..37
          EOF 37..37
    "#]]
    .assert_eq(&dump(&file("for x in y:\n    break\nelse:\n    pass\n")));
}

#[test]
fn function_definition() {
    expect![[r#"
        FileInput 0..38
          FuncDef 0..38
            DEF_KW 0..3 "def"
            NAME 4..5 "f"
            Parameters 5..16
              LEFT_PAREN 5..6 "("
              ParameterList 6..15
                NamedParameter 6..7
                  NAME 6..7 "a"
                COMMA 7..8 ","
                VarPositional 9..10
                  STAR 9..10 "*"
                COMMA 10..11 ","
                NamedParameter 12..15
                  NAME 12..13 "b"
                  EQ 13..14 "="
                  Literal(Number) 14..15
                    NUMBER 14..15 "1"
              RIGHT_PAREN 15..16 ")"
            ARROW 17..19 "->"
            Literal(Name) 20..23
              NAME 20..23 "int"
            COLON 23..24 ":"
            Suite 24..38
              NEWLINE 24..25
              INDENT 25..29
              SimpleStatement 29..38
                List(SmallStatements) 29..37
                  Unary(Return) 29..37
                    RETURN_KW 29..35 "return"
                    Literal(Name) 36..37
                      NAME 36..37 "a"
                NEWLINE 37..38
              DEDENT 38..38
          EOF 38..38
    "#]]
    .assert_eq(&dump(&file("def f(a, *, b=1) -> int:\n    return a\n")));
}

#[test]
fn assignment_chain() {
    let input = typed_file("a = b = c  # type: int\n");
    let Some(Node::SimpleStatement(line)) = input.statements().next() else { panic!("expected line") };
    let [Node::Assignment(assignment)] = line.statements.elements.as_slice() else {
        panic!("expected assignment")
    };
    assert_eq!(assignment.targets().len(), 2);
    assert_eq!(assignment.value().and_then(Node::as_name).map(Token::text), Some("c"));
    assert_eq!(assignment.operators.len(), 2);
    assert_eq!(assignment.type_comment.as_ref().map(Token::text), Some("# type: int"));
}

#[test]
fn assignment_targets() {
    let Node::Assignment(assignment) = statement("a, *b = [c.d, e[0]] = x\n") else {
        panic!("expected assignment")
    };
    assert!(matches!(
        assignment.targets(),
        [
            Node::List(List { kind: ListKind::TestListStarExpr, .. }),
            Node::Container(Container { kind: ContainerKind::List, .. }),
        ]
    ));

    let Node::Assignment(assignment) = statement("x = yield y\n") else { panic!("expected assignment") };
    assert!(matches!(assignment.value(), Some(Node::Unary(Unary { kind: UnaryKind::Yield, .. }))));
}

#[test]
fn annotated_assignment() {
    let Node::Ternary(annotated) = statement("x: int = 1\n") else { panic!("expected ternary") };
    assert_eq!(annotated.kind, TernaryKind::AnnotatedAssign);
    assert!(annotated.second_op.is_some() && annotated.right.is_some());

    let Node::Ternary(declared) = statement("self.x: List[int]\n") else { panic!("expected ternary") };
    assert!(declared.second_op.is_none() && declared.right.is_none());

    assert!(matches!(statement("(x): int\n"), Node::Ternary(_)));
}

#[test]
fn augmented_assignment() {
    let Node::Binary(augmented) = statement("x += yield\n") else { panic!("expected binary") };
    assert_eq!(augmented.kind, BinaryKind::AddAssign);
    assert!(augmented.kind.is_augmented_assign());
    assert!(matches!(*augmented.right, Node::Unary(Unary { kind: UnaryKind::Yield, operand: None, .. })));

    let kinds = ["-=", "*=", "@=", "/=", "%=", "&=", "|=", "^=", "<<=", ">>=", "**=", "//="]
        .map(|op| match statement(&format!("a.b {op} 1\n")) {
            Node::Binary(binary) => binary.kind,
            node => panic!("{op}: {node:?}"),
        });
    assert!(kinds.iter().all(|kind| kind.is_augmented_assign()));

    for text in ["(x) += 1\n", "(a.b) -= 2\n", "((a[0])) *= 3\n"] {
        let Node::Binary(augmented) = statement(text) else { panic!("{text:?}: expected binary") };
        assert!(augmented.kind.is_augmented_assign());
        assert!(matches!(
            &*augmented.left,
            Node::Container(Container { kind: ContainerKind::Paren, .. })
        ));
    }
}

#[test]
fn delete() {
    let Node::Unary(del) = statement("del a, b.c, d[0]\n") else { panic!("expected del") };
    assert_eq!(del.kind, UnaryKind::Del);
    assert!(matches!(
        del.operand.as_deref(),
        Some(Node::List(List { kind: ListKind::ExprList, elements, .. })) if elements.len() == 3
    ));
}

#[test]
fn imports() {
    let Node::Unary(import) = statement("import a.b as c, d\n") else { panic!("expected import") };
    assert_eq!(import.kind, UnaryKind::Import);
    let Some(Node::List(names)) = import.operand.as_deref() else { panic!("expected names") };
    assert_eq!(names.kind, ListKind::DottedAsNames);
    let [Node::Binary(alias), plain] = names.elements.as_slice() else {
        panic!("expected an alias and a plain module")
    };
    assert_eq!(alias.kind, BinaryKind::As);
    assert!(matches!(&*alias.left, Node::List(List { kind: ListKind::DottedName, .. })));
    assert_eq!(plain.as_name().map(Token::text), Some("d"));
}

#[test]
fn from_imports() {
    let Node::ImportFrom(star) = statement("from os import *\n") else { panic!("expected import") };
    assert!(star.star.is_some() && star.names.is_none() && star.dots.is_empty());

    let Node::ImportFrom(grouped) = statement("from .m import (a as b, c,)\n") else {
        panic!("expected import")
    };
    assert_eq!(grouped.dots.len(), 1);
    assert!(grouped.open.is_some() && grouped.close.is_some());
    assert!(matches!(
        grouped.names.as_ref(),
        Some(Node::List(List { kind: ListKind::ImportAsNames, elements, .. })) if elements.len() == 2
    ));

    let Node::ImportFrom(relative) = statement("from .... import x\n") else {
        panic!("expected import")
    };
    assert_eq!(relative.dots.iter().map(|dot| dot.kind).collect::<Vec<_>>(), [ELLIPSIS, DOT]);
    assert!(relative.module.is_none());
}

#[test]
fn declarations_and_assert() {
    let Node::Unary(global) = statement("global a, b\n") else { panic!("expected global") };
    assert_eq!(global.kind, UnaryKind::Global);
    assert!(matches!(global.operand.as_deref(), Some(Node::List(List { kind: ListKind::Names, .. }))));

    let Node::Unary(nonlocal) = statement("nonlocal a\n") else { panic!("expected nonlocal") };
    assert_eq!(nonlocal.kind, UnaryKind::Nonlocal);

    let Node::Assert(assert) = statement("assert x, 'message'\n") else { panic!("expected assert") };
    assert!(assert.comma.is_some() && assert.message.is_some());
}

#[test]
fn raise() {
    let Node::Raise(raise) = statement("raise ValueError() from error\n") else { panic!("expected raise") };
    assert!(raise.exception.is_some() && raise.from_kw.is_some() && raise.cause.is_some());

    let Node::Raise(bare) = statement("raise\n") else { panic!("expected raise") };
    assert!(bare.exception.is_none() && bare.cause.is_none());
}

#[test]
fn semicolons() {
    let input = file("a; b; c;\n");
    let Some(Node::SimpleStatement(line)) = input.statements().next() else { panic!("expected line") };
    assert_eq!(line.statements.elements.len(), 3);
    assert!(line.statements.has_trailing_separator());
}

#[test]
fn if_elif_else() {
    let Node::If(branch) = statement("if a:\n    pass\nelif b: pass\nelif c:\n    pass\nelse:\n    pass\n")
    else {
        panic!("expected if")
    };
    assert_eq!(branch.elifs.len(), 2);
    assert!(matches!(branch.elifs[0].body, Node::SimpleStatement(_)));
    assert_eq!(branch.orelse.as_ref().map(|clause| clause.keyword.kind), Some(ELSE_KW));
}

#[test]
fn while_with_walrus() {
    let Node::While(repeat) = statement("while (line := read()):\n    continue\nelse:\n    pass\n")
    else {
        panic!("expected while")
    };
    assert!(matches!(repeat.test, Node::Container(_)));
    assert!(repeat.orelse.is_some());
}

#[test]
fn try_statements() {
    let Node::Try(full) = statement(
        "try:\n    pass\nexcept E as e:\n    pass\nexcept:\n    pass\nelse:\n    pass\nfinally:\n    pass\n",
    ) else {
        panic!("expected try")
    };
    assert_eq!(full.handlers.len(), 2);
    assert_eq!(full.handlers[0].name.as_ref().map(Token::text), Some("e"));
    assert!(full.handlers[1].test.is_none());
    assert!(full.orelse.is_some() && full.finally.is_some());

    let Node::Try(cleanup) = statement("try:\n    pass\nfinally:\n    pass\n") else {
        panic!("expected try")
    };
    assert!(cleanup.handlers.is_empty() && cleanup.finally.is_some());
}

#[test]
fn with_items() {
    let Node::With(with) = statement("with a as b, c as (d, e), f:\n    pass\n") else {
        panic!("expected with")
    };
    assert_eq!(with.items.kind, ListKind::WithItems);
    assert!(matches!(
        with.items.elements.as_slice(),
        [
            Node::Binary(Binary { kind: BinaryKind::As, .. }),
            Node::Binary(Binary { kind: BinaryKind::As, .. }),
            Node::Literal(_),
        ]
    ));

    let Node::With(single) = statement("with a: pass\n") else { panic!("expected with") };
    assert_eq!(single.items.elements.len(), 1);
}

#[test]
fn positional_only_parameters() {
    let Node::FuncDef(def) = statement("def f(a, b=1, /, c=2, *args, d, **kwargs):\n    pass\n") else {
        panic!("expected def")
    };
    let parameters = def.parameters.list.as_ref().map(|list| list.parameters.as_slice()).unwrap_or_default();
    assert!(matches!(
        parameters,
        [
            Parameter::Named(_),
            Parameter::Named(_),
            Parameter::PositionalOnly(_),
            Parameter::Named(_),
            Parameter::VarPositional(_),
            Parameter::Named(NamedParameter { default: None, .. }),
            Parameter::VarKeyword(_),
        ]
    ));
}

#[test]
fn annotated_parameters() {
    let Node::FuncDef(def) = statement("def f(a: int = 1, *args: str, **kwargs: Any): pass\n") else {
        panic!("expected def")
    };
    let Some(list) = &def.parameters.list else { panic!("expected parameters") };
    let [Parameter::Named(a), Parameter::VarPositional(args), Parameter::VarKeyword(kwargs)] =
        list.parameters.as_slice()
    else {
        panic!("expected three parameters")
    };
    assert!(a.annotation.is_some() && a.default.is_some());
    assert!(args.parameter.as_ref().is_some_and(|parameter| parameter.annotation.is_some()));
    assert!(kwargs.parameter.annotation.is_some());
}

#[test]
fn async_statements() {
    let input = file(
        "async def f():\n    async with a as b:\n        pass\n    async for x in y:\n        await x\n",
    );
    let Some(Node::Unary(outer)) = input.statements().next() else { panic!("expected async def") };
    assert_eq!(outer.kind, UnaryKind::Async);
    let Some(Node::FuncDef(def)) = outer.operand.as_deref() else { panic!("expected def") };
    let Node::Suite(body) = &def.body else { panic!("expected block") };
    assert!(body.statements.iter().all(|statement| matches!(
        statement,
        Node::Unary(Unary { kind: UnaryKind::Async, operand: Some(_), .. })
    )));
}

#[test]
fn classes_and_decorators() {
    let Node::ClassDef(class) = statement("class A(B, metaclass=M):\n    x = 1\n") else {
        panic!("expected class")
    };
    assert_eq!(class.name.text(), "A");
    assert!(matches!(class.bases.as_ref(), Some(Node::List(List { kind: ListKind::ArgumentList, .. }))));

    let Node::ClassDef(bare) = statement("class A: pass\n") else { panic!("expected class") };
    assert!(bare.open.is_none() && bare.bases.is_none());

    let Node::Decorated(decorated) =
        statement("@property\n@a.b(c)\nasync def f(self):\n    return 1\n")
    else {
        panic!("expected decorated")
    };
    assert_eq!(decorated.decorators.len(), 2);
    assert!(decorated.decorators[0].open.is_none());
    assert!(matches!(&decorated.decorators[1].name, Node::List(List { kind: ListKind::DottedName, .. })));
    assert!(matches!(decorated.definition, Node::Unary(Unary { kind: UnaryKind::Async, .. })));
}

#[test]
fn match_as_an_identifier() {
    assert!(matches!(statement("match = 1\n"), Node::Assignment(_)));
    assert!(matches!(statement("match(x)\n"), Node::AtomExpr(_)));
    assert!(matches!(statement("match.group\n"), Node::AtomExpr(_)));
}

#[test]
fn type_comments() {
    let input = typed_file(concat!(
        "def f(a,  # type: int\n",
        "      b,  # type: str\n",
        "      ):\n",
        "    # type: (...) -> None\n",
        "    pass\n",
        "def g(x):  # type: (int) -> str\n",
        "    return x\n",
        "for i in range(3):  # type: int\n",
        "    pass\n",
        "with open(p) as f:  # type: IO[str]\n",
        "    pass\n",
    ));
    let statements: Vec<_> = input.statements().collect();
    let [Node::FuncDef(f), Node::FuncDef(g), Node::For(for_loop), Node::With(with)] =
        statements.as_slice()
    else {
        panic!("expected four statements")
    };
    let comments = f.parameters.list.as_ref().map(|list| list.type_comments.len());
    assert_eq!(comments, Some(2));
    assert_eq!(g.type_comment.as_ref().map(Token::text), Some("# type: (int) -> str"));
    assert!(for_loop.type_comment.is_some());
    assert!(with.type_comment.is_some());
}

#[test]
fn single_input_statement_by_statement() {
    let mut tokenizer = Tokenizer::new("x = 1\nif x:\n    pass\n");
    let mut parser = Parser::new(&mut tokenizer);

    let first = parser.single_input().unwrap();
    assert!(matches!(first.statement, Some(Node::SimpleStatement(_))));
    assert!(first.newline.is_none());

    let second = parser.single_input().unwrap();
    assert!(matches!(second.statement, Some(Node::If(_))));
    assert!(second.newline.is_none());
}

#[test]
fn single_input_from_helper() {
    let input = parse_single_input(&mut Tokenizer::new("pass\n")).unwrap();
    assert!(matches!(input.statement, Some(Node::SimpleStatement(_))));
}

#[test]
fn function_type_signature() {
    let input = parse_func_type_input(&mut Tokenizer::new("(int, *str, **Any) -> None")).unwrap();
    let Some(Node::List(arguments)) = &input.func_type.arguments else { panic!("expected types") };
    assert_eq!(arguments.kind, ListKind::TypeList);
    assert!(matches!(
        arguments.elements.as_slice(),
        [
            Node::Literal(_),
            Node::Unary(Unary { kind: UnaryKind::Star, operand: Some(_), .. }),
            Node::Unary(Unary { kind: UnaryKind::DoubleStar, .. }),
        ]
    ));
    assert!(matches!(input.func_type.returns, Node::Literal(Literal { kind: LiteralKind::None, .. })));

    let empty = parse_func_type_input(&mut Tokenizer::new("() -> int\n")).unwrap();
    assert!(empty.func_type.arguments.is_none());
}

#[test]
fn parse_by_mode() {
    let modes = [
        (Mode::Single, "x\n"),
        (Mode::File, "x\n"),
        (Mode::Eval, "x"),
        (Mode::FuncType, "() -> x"),
    ];
    for (mode, text) in modes {
        let mut tokenizer = Tokenizer::with_options(text, TokenizerOptions::default());
        let tree = parse(&mut tokenizer, mode, ParseOptions::default()).unwrap();
        let matches_mode = match (&tree, mode) {
            (Tree::Single(_), Mode::Single)
            | (Tree::File(_), Mode::File)
            | (Tree::Eval(_), Mode::Eval)
            | (Tree::FuncType(_), Mode::FuncType) => true,
            _ => false,
        };
        assert!(matches_mode, "{mode:?}");
        assert_eq!(u32::from(tree.as_ast().span().end()), text.len() as u32);
    }
}
