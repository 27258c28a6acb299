use text_size::TextRange;

use crate::ast::*;
use crate::{NodeOrToken, Token};

/// Uniform access to any piece of the syntax tree.
pub trait AstNode {
    fn span(&self) -> TextRange;

    fn label(&self) -> String;

    /// Pushes the direct children, nodes and tokens, in source order.
    fn children<'a>(&'a self, out: &mut Children<'a>);
}

pub type SyntaxElement<'a> = NodeOrToken<&'a dyn AstNode, &'a Token>;

#[derive(Default)]
pub struct Children<'a> {
    elements: Vec<SyntaxElement<'a>>,
}

impl<'a> Children<'a> {
    pub fn node<N: AstNode>(&mut self, node: &'a N) -> &mut Self {
        self.elements.push(NodeOrToken::Node(node as &dyn AstNode));
        self
    }

    pub fn token(&mut self, token: &'a Token) -> &mut Self {
        self.elements.push(NodeOrToken::Token(token));
        self
    }

    pub fn opt_node<N: AstNode>(&mut self, node: Option<&'a N>) -> &mut Self {
        if let Some(node) = node {
            self.node(node);
        }
        self
    }

    pub fn opt_token(&mut self, token: Option<&'a Token>) -> &mut Self {
        if let Some(token) = token {
            self.token(token);
        }
        self
    }

    pub fn separated<N: AstNode>(&mut self, elements: &'a [N], separators: &'a [Token]) -> &mut Self {
        for (index, element) in elements.iter().enumerate() {
            self.node(element);
            if let Some(separator) = separators.get(index) {
                self.token(separator);
            }
        }
        self
    }

    pub fn into_vec(self) -> Vec<SyntaxElement<'a>> {
        self.elements
    }
}

pub fn children(node: &dyn AstNode) -> Vec<SyntaxElement<'_>> {
    let mut out = Children::default();
    node.children(&mut out);
    out.into_vec()
}

/// Every token of the subtree, in source order.
pub fn tokens(node: &dyn AstNode) -> Vec<&Token> {
    fn collect<'a>(node: &'a dyn AstNode, out: &mut Vec<&'a Token>) {
        for child in children(node) {
            match child {
                NodeOrToken::Node(node) => collect(node, out),
                NodeOrToken::Token(token) => out.push(token),
            }
        }
    }

    let mut out = Vec::new();
    collect(node, &mut out);
    out
}

impl<T: AstNode + ?Sized> AstNode for Box<T> {
    fn span(&self) -> TextRange {
        (**self).span()
    }

    fn label(&self) -> String {
        (**self).label()
    }

    fn children<'a>(&'a self, out: &mut Children<'a>) {
        (**self).children(out);
    }
}

macro_rules! delegate {
    ($ty:ident { $($variant:ident),* $(,)? }) => {
        impl AstNode for $ty {
            fn span(&self) -> TextRange {
                match self {
                    $(Self::$variant(it) => AstNode::span(it),)*
                }
            }

            fn label(&self) -> String {
                match self {
                    $(Self::$variant(it) => it.label(),)*
                }
            }

            fn children<'a>(&'a self, out: &mut Children<'a>) {
                match self {
                    $(Self::$variant(it) => it.children(out),)*
                }
            }
        }
    };
}

delegate!(Node {
    Literal,
    StringSequence,
    Keyword,
    Unary,
    Binary,
    ExtendedBinary,
    Ternary,
    List,
    Container,
    AtomExpr,
    Lambda,
    CompFor,
    CompIf,
    YieldFrom,
    SimpleStatement,
    Assignment,
    Raise,
    ImportFrom,
    Assert,
    If,
    While,
    For,
    Try,
    With,
    FuncDef,
    ClassDef,
    Decorated,
    Suite,
});

delegate!(Trailer { Attribute, Call, Subscript });

delegate!(Parameter { Named, VarPositional, VarKeyword, PositionalOnly });

macro_rules! ast_node {
    ($ty:ty, |$this:ident| $label:expr, |$node:ident, $out:ident| $children:expr) => {
        impl AstNode for $ty {
            fn span(&self) -> TextRange {
                self.span
            }

            fn label(&self) -> String {
                let $this = self;
                $label
            }

            fn children<'a>(&'a self, $out: &mut Children<'a>) {
                let $node = self;
                $children;
            }
        }
    };
}

ast_node!(Literal, |it| format!("Literal({:?})", it.kind), |it, out| out.token(&it.token));

ast_node!(StringSequence, |_it| "StringSequence".to_owned(), |it, out| {
    for token in &it.tokens {
        out.token(token);
    }
});

ast_node!(Keyword, |it| format!("Keyword({:?})", it.kind), |it, out| out.token(&it.token));

ast_node!(Unary, |it| format!("Unary({:?})", it.kind), |it, out| {
    out.token(&it.op).opt_node(it.operand.as_ref())
});

ast_node!(Binary, |it| format!("Binary({:?})", it.kind), |it, out| {
    out.node(&it.left).token(&it.op).node(&it.right)
});

ast_node!(ExtendedBinary, |it| format!("ExtendedBinary({:?})", it.kind), |it, out| {
    out.node(&it.left).token(&it.first_op).token(&it.second_op).node(&it.right)
});

ast_node!(Ternary, |it| format!("Ternary({:?})", it.kind), |it, out| {
    out.opt_node(it.left.as_ref())
        .token(&it.first_op)
        .opt_node(it.middle.as_ref())
        .opt_token(it.second_op.as_ref())
        .opt_node(it.right.as_ref())
});

ast_node!(List, |it| format!("List({:?})", it.kind), |it, out| {
    out.separated(&it.elements, &it.separators)
});

ast_node!(Container, |it| format!("Container({:?})", it.kind), |it, out| {
    out.token(&it.open).opt_node(it.inner.as_ref()).token(&it.close)
});

ast_node!(AtomExpr, |_it| "AtomExpr".to_owned(), |it, out| {
    out.opt_token(it.await_kw.as_ref()).node(&it.atom);
    for trailer in &it.trailers {
        out.node(trailer);
    }
});

ast_node!(Attribute, |_it| "Attribute".to_owned(), |it, out| out.token(&it.dot).token(&it.name));

ast_node!(Call, |_it| "Call".to_owned(), |it, out| {
    out.token(&it.open).opt_node(it.arguments.as_ref()).token(&it.close)
});

ast_node!(Subscript, |_it| "Subscript".to_owned(), |it, out| {
    out.token(&it.open).node(&it.subscripts).token(&it.close)
});

ast_node!(Lambda, |it| format!("Lambda({:?})", it.kind), |it, out| {
    out.token(&it.lambda_kw).opt_node(it.parameters.as_ref()).token(&it.colon).node(&it.body)
});

ast_node!(CompFor, |_it| "CompFor".to_owned(), |it, out| {
    out.token(&it.for_kw)
        .node(&it.targets)
        .token(&it.in_kw)
        .node(&it.iter)
        .opt_node(it.next.as_ref())
});

ast_node!(CompIf, |_it| "CompIf".to_owned(), |it, out| {
    out.token(&it.if_kw).node(&it.test).opt_node(it.next.as_ref())
});

ast_node!(YieldFrom, |_it| "YieldFrom".to_owned(), |it, out| {
    out.token(&it.yield_kw).token(&it.from_kw).node(&it.value)
});

ast_node!(SimpleStatement, |_it| "SimpleStatement".to_owned(), |it, out| {
    out.node(&it.statements).token(&it.newline)
});

ast_node!(Assignment, |_it| "Assignment".to_owned(), |it, out| {
    out.separated(&it.elements, &it.operators).opt_token(it.type_comment.as_ref())
});

ast_node!(Raise, |_it| "Raise".to_owned(), |it, out| {
    out.token(&it.raise_kw)
        .opt_node(it.exception.as_ref())
        .opt_token(it.from_kw.as_ref())
        .opt_node(it.cause.as_ref())
});

ast_node!(ImportFrom, |_it| "ImportFrom".to_owned(), |it, out| {
    out.token(&it.from_kw);
    for dot in &it.dots {
        out.token(dot);
    }
    out.opt_node(it.module.as_ref())
        .token(&it.import_kw)
        .opt_token(it.star.as_ref())
        .opt_token(it.open.as_ref())
        .opt_node(it.names.as_ref())
        .opt_token(it.close.as_ref())
});

ast_node!(Assert, |_it| "Assert".to_owned(), |it, out| {
    out.token(&it.assert_kw)
        .node(&it.test)
        .opt_token(it.comma.as_ref())
        .opt_node(it.message.as_ref())
});

ast_node!(If, |_it| "If".to_owned(), |it, out| {
    out.token(&it.if_kw).node(&it.test).token(&it.colon).node(&it.body);
    for elif in &it.elifs {
        out.node(elif);
    }
    out.opt_node(it.orelse.as_ref())
});

ast_node!(Elif, |_it| "Elif".to_owned(), |it, out| {
    out.token(&it.elif_kw).node(&it.test).token(&it.colon).node(&it.body)
});

ast_node!(Clause, |it| format!("Clause({:?})", it.keyword.kind), |it, out| {
    out.token(&it.keyword).token(&it.colon).node(&it.body)
});

ast_node!(While, |_it| "While".to_owned(), |it, out| {
    out.token(&it.while_kw)
        .node(&it.test)
        .token(&it.colon)
        .node(&it.body)
        .opt_node(it.orelse.as_ref())
});

ast_node!(For, |_it| "For".to_owned(), |it, out| {
    out.token(&it.for_kw)
        .node(&it.targets)
        .token(&it.in_kw)
        .node(&it.iter)
        .token(&it.colon)
        .opt_token(it.type_comment.as_ref())
        .node(&it.body)
        .opt_node(it.orelse.as_ref())
});

ast_node!(Try, |_it| "Try".to_owned(), |it, out| {
    out.token(&it.try_kw).token(&it.colon).node(&it.body);
    for handler in &it.handlers {
        out.node(handler);
    }
    out.opt_node(it.orelse.as_ref()).opt_node(it.finally.as_ref())
});

ast_node!(ExceptHandler, |_it| "ExceptHandler".to_owned(), |it, out| {
    out.token(&it.except_kw)
        .opt_node(it.test.as_ref())
        .opt_token(it.as_kw.as_ref())
        .opt_token(it.name.as_ref())
        .token(&it.colon)
        .node(&it.body)
});

ast_node!(With, |_it| "With".to_owned(), |it, out| {
    out.token(&it.with_kw)
        .node(&it.items)
        .token(&it.colon)
        .opt_token(it.type_comment.as_ref())
        .node(&it.body)
});

ast_node!(FuncDef, |_it| "FuncDef".to_owned(), |it, out| {
    out.token(&it.def_kw)
        .token(&it.name)
        .node(&it.parameters)
        .opt_token(it.arrow.as_ref())
        .opt_node(it.returns.as_ref())
        .token(&it.colon)
        .opt_token(it.type_comment.as_ref())
        .node(&it.body)
});

ast_node!(Parameters, |_it| "Parameters".to_owned(), |it, out| {
    out.token(&it.open).opt_node(it.list.as_ref()).token(&it.close)
});

ast_node!(ParameterList, |_it| "ParameterList".to_owned(), |it, out| {
    let mut elements = Children::default();
    elements.separated(&it.parameters, &it.separators);
    for comment in &it.type_comments {
        elements.token(comment);
    }
    let mut elements = elements.into_vec();
    elements.sort_by_key(|element| match element {
        NodeOrToken::Node(node) => node.span().start(),
        NodeOrToken::Token(token) => token.range.start(),
    });
    out.elements.extend(elements);
});

ast_node!(NamedParameter, |_it| "NamedParameter".to_owned(), |it, out| {
    out.token(&it.name)
        .opt_token(it.colon.as_ref())
        .opt_node(it.annotation.as_ref())
        .opt_token(it.eq.as_ref())
        .opt_node(it.default.as_ref())
});

ast_node!(VarPositional, |_it| "VarPositional".to_owned(), |it, out| {
    out.token(&it.star).opt_node(it.parameter.as_ref())
});

ast_node!(VarKeyword, |_it| "VarKeyword".to_owned(), |it, out| {
    out.token(&it.star).node(&it.parameter)
});

ast_node!(PositionalOnly, |_it| "PositionalOnly".to_owned(), |it, out| out.token(&it.slash));

ast_node!(ClassDef, |_it| "ClassDef".to_owned(), |it, out| {
    out.token(&it.class_kw)
        .token(&it.name)
        .opt_token(it.open.as_ref())
        .opt_node(it.bases.as_ref())
        .opt_token(it.close.as_ref())
        .token(&it.colon)
        .node(&it.body)
});

ast_node!(Decorated, |_it| "Decorated".to_owned(), |it, out| {
    for decorator in &it.decorators {
        out.node(decorator);
    }
    out.node(&it.definition)
});

ast_node!(Decorator, |_it| "Decorator".to_owned(), |it, out| {
    out.token(&it.at)
        .node(&it.name)
        .opt_token(it.open.as_ref())
        .opt_node(it.arguments.as_ref())
        .opt_token(it.close.as_ref())
        .token(&it.newline)
});

ast_node!(Suite, |_it| "Suite".to_owned(), |it, out| {
    out.token(&it.newline);
    if let Some(line) = &it.type_comment {
        out.token(&line.comment).token(&line.newline);
    }
    out.token(&it.indent);
    for statement in &it.statements {
        out.node(statement);
    }
    out.token(&it.dedent)
});

ast_node!(SingleInput, |_it| "SingleInput".to_owned(), |it, out| {
    out.opt_node(it.statement.as_ref()).opt_token(it.newline.as_ref())
});

ast_node!(FileInput, |_it| "FileInput".to_owned(), |it, out| {
    for element in &it.elements {
        match element {
            NodeOrToken::Node(node) => out.node(node),
            NodeOrToken::Token(token) => out.token(token),
        };
    }
    out.token(&it.eof)
});

ast_node!(EvalInput, |_it| "EvalInput".to_owned(), |it, out| {
    out.node(&it.body);
    for newline in &it.newlines {
        out.token(newline);
    }
    out.token(&it.eof)
});

ast_node!(FuncTypeInput, |_it| "FuncTypeInput".to_owned(), |it, out| {
    out.node(&it.func_type);
    for newline in &it.newlines {
        out.token(newline);
    }
    out.token(&it.eof)
});

ast_node!(FuncType, |_it| "FuncType".to_owned(), |it, out| {
    out.token(&it.open)
        .opt_node(it.arguments.as_ref())
        .token(&it.close)
        .token(&it.arrow)
        .node(&it.returns)
});
