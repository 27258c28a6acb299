use text_size::TextRange;

use super::{List, Node};
use crate::{NodeOrToken, Token};

/// Small statements joined by `;` and the `NEWLINE` ending the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleStatement {
    pub span: TextRange,
    pub statements: List,
    pub newline: Token,
}

/// `a = b = c`, with an optional trailing type comment.
///
/// `operators` holds the `=` tokens; there is always one fewer than
/// `elements`. Every element but the last is an assignment target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub span: TextRange,
    pub elements: Vec<Node>,
    pub operators: Vec<Token>,
    pub type_comment: Option<Token>,
}

impl Assignment {
    pub fn targets(&self) -> &[Node] {
        &self.elements[..self.elements.len().saturating_sub(1)]
    }

    pub fn value(&self) -> Option<&Node> {
        self.elements.last()
    }
}

/// Collects the parts of an assignment chain before the node is built.
#[derive(Debug)]
pub struct AssignmentBuilder {
    elements: Vec<Node>,
    operators: Vec<Token>,
    type_comment: Option<Token>,
}

impl AssignmentBuilder {
    pub fn new(first: Node) -> Self {
        Self { elements: vec![first], operators: Vec::new(), type_comment: None }
    }

    pub fn push(&mut self, op: Token, value: Node) -> &mut Self {
        self.operators.push(op);
        self.elements.push(value);
        self
    }

    pub fn type_comment(&mut self, comment: Token) -> &mut Self {
        self.type_comment = Some(comment);
        self
    }

    /// Elements that the chain assigns to so far.
    pub fn targets(&self) -> &[Node] {
        &self.elements[..self.elements.len() - 1]
    }

    pub fn finish(self, span: TextRange) -> Assignment {
        Assignment {
            span,
            elements: self.elements,
            operators: self.operators,
            type_comment: self.type_comment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raise {
    pub span: TextRange,
    pub raise_kw: Token,
    pub exception: Option<Node>,
    pub from_kw: Option<Token>,
    pub cause: Option<Node>,
}

/// `from <dots><module> import names`. `names` is absent for `import *`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFrom {
    pub span: TextRange,
    pub from_kw: Token,
    /// `.` and `...` tokens of a relative import.
    pub dots: Vec<Token>,
    pub module: Option<Node>,
    pub import_kw: Token,
    pub star: Option<Token>,
    pub open: Option<Token>,
    pub names: Option<Node>,
    pub close: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assert {
    pub span: TextRange,
    pub assert_kw: Token,
    pub test: Node,
    pub comma: Option<Token>,
    pub message: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct If {
    pub span: TextRange,
    pub if_kw: Token,
    pub test: Node,
    pub colon: Token,
    pub body: Node,
    pub elifs: Vec<Elif>,
    pub orelse: Option<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elif {
    pub span: TextRange,
    pub elif_kw: Token,
    pub test: Node,
    pub colon: Token,
    pub body: Node,
}

/// A keyword, a colon and a body: `else` and `finally` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub span: TextRange,
    pub keyword: Token,
    pub colon: Token,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct While {
    pub span: TextRange,
    pub while_kw: Token,
    pub test: Node,
    pub colon: Token,
    pub body: Node,
    pub orelse: Option<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct For {
    pub span: TextRange,
    pub for_kw: Token,
    pub targets: Node,
    pub in_kw: Token,
    pub iter: Node,
    pub colon: Token,
    pub type_comment: Option<Token>,
    pub body: Node,
    pub orelse: Option<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Try {
    pub span: TextRange,
    pub try_kw: Token,
    pub colon: Token,
    pub body: Node,
    pub handlers: Vec<ExceptHandler>,
    pub orelse: Option<Clause>,
    pub finally: Option<Clause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptHandler {
    pub span: TextRange,
    pub except_kw: Token,
    pub test: Option<Node>,
    pub as_kw: Option<Token>,
    pub name: Option<Token>,
    pub colon: Token,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct With {
    pub span: TextRange,
    pub with_kw: Token,
    pub items: List,
    pub colon: Token,
    pub type_comment: Option<Token>,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncDef {
    pub span: TextRange,
    pub def_kw: Token,
    pub name: Token,
    pub parameters: Parameters,
    pub arrow: Option<Token>,
    pub returns: Option<Node>,
    pub colon: Token,
    pub type_comment: Option<Token>,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub span: TextRange,
    pub open: Token,
    pub list: Option<ParameterList>,
    pub close: Token,
}

/// Parameters of a `def` or a `lambda`. Type comments may follow the commas
/// of a `def` parameter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterList {
    pub span: TextRange,
    pub parameters: Vec<Parameter>,
    pub separators: Vec<Token>,
    pub type_comments: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    Named(NamedParameter),
    /// `*args`, or a bare `*` ending the positional parameters.
    VarPositional(VarPositional),
    VarKeyword(VarKeyword),
    /// The `/` ending the positional-only parameters.
    PositionalOnly(PositionalOnly),
}

impl Parameter {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Named(it) => it.span,
            Self::VarPositional(it) => it.span,
            Self::VarKeyword(it) => it.span,
            Self::PositionalOnly(it) => it.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedParameter {
    pub span: TextRange,
    pub name: Token,
    pub colon: Option<Token>,
    pub annotation: Option<Node>,
    pub eq: Option<Token>,
    pub default: Option<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarPositional {
    pub span: TextRange,
    pub star: Token,
    pub parameter: Option<NamedParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarKeyword {
    pub span: TextRange,
    pub star: Token,
    pub parameter: NamedParameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionalOnly {
    pub span: TextRange,
    pub slash: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDef {
    pub span: TextRange,
    pub class_kw: Token,
    pub name: Token,
    pub open: Option<Token>,
    pub bases: Option<Node>,
    pub close: Option<Token>,
    pub colon: Token,
    pub body: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorated {
    pub span: TextRange,
    pub decorators: Vec<Decorator>,
    pub definition: Node,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorator {
    pub span: TextRange,
    pub at: Token,
    pub name: Node,
    pub open: Option<Token>,
    pub arguments: Option<Node>,
    pub close: Option<Token>,
    pub newline: Token,
}

/// An indented block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suite {
    pub span: TextRange,
    pub newline: Token,
    pub type_comment: Option<TypeCommentLine>,
    pub indent: Token,
    pub statements: Vec<Node>,
    pub dedent: Token,
}

/// A function signature type comment on its own line at the top of a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCommentLine {
    pub comment: Token,
    pub newline: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleInput {
    pub span: TextRange,
    pub statement: Option<Node>,
    pub newline: Option<Token>,
}

/// Statements and blank-line `NEWLINE` tokens in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInput {
    pub span: TextRange,
    pub elements: Vec<NodeOrToken<Node, Token>>,
    pub eof: Token,
}

impl FileInput {
    pub fn statements(&self) -> impl Iterator<Item = &Node> {
        self.elements.iter().filter_map(NodeOrToken::as_node)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvalInput {
    pub span: TextRange,
    pub body: Node,
    pub newlines: Vec<Token>,
    pub eof: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncTypeInput {
    pub span: TextRange,
    pub func_type: FuncType,
    pub newlines: Vec<Token>,
    pub eof: Token,
}

/// `(argument types) -> return type`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncType {
    pub span: TextRange,
    pub open: Token,
    pub arguments: Option<Node>,
    pub close: Token,
    pub arrow: Token,
    pub returns: Node,
}
