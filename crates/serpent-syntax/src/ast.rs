//! The syntax tree.
//!
//! Nodes are grouped into families that share a shape; a `kind` tag tells the
//! members of a family apart. Every token consumed by the parser, separators
//! and structural tokens included, is kept in the node that consumed it.

mod stmts;

pub use stmts::*;
use text_size::TextRange;

use crate::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Literal(Literal),
    StringSequence(StringSequence),
    Keyword(Keyword),
    Unary(Unary),
    Binary(Binary),
    ExtendedBinary(ExtendedBinary),
    Ternary(Ternary),
    List(List),
    Container(Container),
    AtomExpr(AtomExpr),
    Lambda(Box<Lambda>),
    CompFor(CompFor),
    CompIf(CompIf),
    YieldFrom(YieldFrom),
    SimpleStatement(SimpleStatement),
    Assignment(Assignment),
    Raise(Box<Raise>),
    ImportFrom(Box<ImportFrom>),
    Assert(Box<Assert>),
    If(Box<If>),
    While(Box<While>),
    For(Box<For>),
    Try(Box<Try>),
    With(Box<With>),
    FuncDef(Box<FuncDef>),
    ClassDef(Box<ClassDef>),
    Decorated(Box<Decorated>),
    Suite(Suite),
}

impl Node {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Literal(it) => it.span,
            Self::StringSequence(it) => it.span,
            Self::Keyword(it) => it.span,
            Self::Unary(it) => it.span,
            Self::Binary(it) => it.span,
            Self::ExtendedBinary(it) => it.span,
            Self::Ternary(it) => it.span,
            Self::List(it) => it.span,
            Self::Container(it) => it.span,
            Self::AtomExpr(it) => it.span,
            Self::Lambda(it) => it.span,
            Self::CompFor(it) => it.span,
            Self::CompIf(it) => it.span,
            Self::YieldFrom(it) => it.span,
            Self::SimpleStatement(it) => it.span,
            Self::Assignment(it) => it.span,
            Self::Raise(it) => it.span,
            Self::ImportFrom(it) => it.span,
            Self::Assert(it) => it.span,
            Self::If(it) => it.span,
            Self::While(it) => it.span,
            Self::For(it) => it.span,
            Self::Try(it) => it.span,
            Self::With(it) => it.span,
            Self::FuncDef(it) => it.span,
            Self::ClassDef(it) => it.span,
            Self::Decorated(it) => it.span,
            Self::Suite(it) => it.span,
        }
    }

    pub fn unary(span: TextRange, kind: UnaryKind, op: Token, operand: Option<Self>) -> Self {
        Self::Unary(Unary { span, kind, op, operand: operand.map(Box::new) })
    }

    pub fn binary(span: TextRange, kind: BinaryKind, left: Self, op: Token, right: Self) -> Self {
        Self::Binary(Binary { span, kind, left: Box::new(left), op, right: Box::new(right) })
    }

    pub fn list(span: TextRange, kind: ListKind, elements: Vec<Self>, separators: Vec<Token>) -> Self {
        Self::List(List { span, kind, elements, separators })
    }

    /// The identifier token when this node is a bare name.
    pub fn as_name(&self) -> Option<&Token> {
        match self {
            Self::Literal(Literal { kind: LiteralKind::Name, token, .. }) => Some(token),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Name,
    Number,
    String,
    True,
    False,
    None,
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub span: TextRange,
    pub kind: LiteralKind,
    pub token: Token,
}

/// Adjacent string literals, concatenated by the language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringSequence {
    pub span: TextRange,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    Pass,
    Break,
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyword {
    pub span: TextRange,
    pub kind: KeywordKind,
    pub token: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryKind {
    Plus,
    Minus,
    Invert,
    Not,
    /// `*x` in displays, targets and call arguments.
    Star,
    /// `**x` as a dictionary element or call argument.
    DoubleStar,
    Del,
    Return,
    Yield,
    Import,
    Global,
    Nonlocal,
    /// `async` in front of `def`, `with` or `for`.
    Async,
    /// `async` in front of a comprehension `for` clause.
    AsyncComprehension,
}

/// An operator token applied to one operand. The operand is absent only for a
/// bare `return`, a bare `yield`, and a bare `*` in a type list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unary {
    pub span: TextRange,
    pub kind: UnaryKind,
    pub op: Token,
    pub operand: Option<Box<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Power,
    Mul,
    Div,
    FloorDiv,
    Modulo,
    MatMul,
    Add,
    Sub,
    ShiftLeft,
    ShiftRight,
    BitAnd,
    BitXor,
    BitOr,
    Less,
    Greater,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    In,
    Is,
    And,
    Or,
    NamedExpr,
    KeyValue,
    /// `name=value` in a call.
    Argument,
    /// `x as y` in imports and `with` items.
    As,
    AddAssign,
    SubAssign,
    MulAssign,
    MatMulAssign,
    DivAssign,
    ModuloAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShiftLeftAssign,
    ShiftRightAssign,
    PowerAssign,
    FloorDivAssign,
}

impl BinaryKind {
    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Less
                | Self::Greater
                | Self::Equal
                | Self::NotEqual
                | Self::LessEqual
                | Self::GreaterEqual
                | Self::In
                | Self::Is
        )
    }

    pub fn is_augmented_assign(self) -> bool {
        (Self::AddAssign as u8..=Self::FloorDivAssign as u8).contains(&(self as u8))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary {
    pub span: TextRange,
    pub kind: BinaryKind,
    pub left: Box<Node>,
    pub op: Token,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtendedBinaryKind {
    NotIn,
    IsNot,
}

/// A binary operator spelled with two tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedBinary {
    pub span: TextRange,
    pub kind: ExtendedBinaryKind,
    pub left: Box<Node>,
    pub first_op: Token,
    pub second_op: Token,
    pub right: Box<Node>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TernaryKind {
    /// `left if middle else right`; every part is present.
    Conditional,
    /// `left : middle [= right]`.
    AnnotatedAssign,
    /// `[left] : [middle] [: [right]]`.
    Slice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ternary {
    pub span: TextRange,
    pub kind: TernaryKind,
    pub left: Option<Box<Node>>,
    pub first_op: Token,
    pub middle: Option<Box<Node>>,
    pub second_op: Option<Token>,
    pub right: Option<Box<Node>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    TestList,
    TestListStarExpr,
    ExprList,
    /// Elements of a parenthesized or bracketed display, or a generator argument.
    TestListComp,
    SubscriptList,
    ArgumentList,
    DictElements,
    SetElements,
    DottedName,
    DottedAsNames,
    ImportAsNames,
    Names,
    WithItems,
    SmallStatements,
    TypeList,
}

/// Elements with the separators between them. There is either one separator
/// fewer than elements, or one per element when a trailing separator is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub span: TextRange,
    pub kind: ListKind,
    pub elements: Vec<Node>,
    pub separators: Vec<Token>,
}

impl List {
    pub fn has_trailing_separator(&self) -> bool {
        !self.elements.is_empty() && self.separators.len() == self.elements.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// `()`, `(a, b)`, `(a for a in b)` and `(yield a)`.
    Tuple,
    /// A single parenthesized expression such as `(x)`.
    Paren,
    List,
    Set,
    Dict,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub span: TextRange,
    pub kind: ContainerKind,
    pub open: Token,
    pub inner: Option<Box<Node>>,
    pub close: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomExpr {
    pub span: TextRange,
    pub await_kw: Option<Token>,
    pub atom: Box<Node>,
    pub trailers: Vec<Trailer>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trailer {
    Attribute(Attribute),
    Call(Call),
    Subscript(Subscript),
}

impl Trailer {
    pub fn span(&self) -> TextRange {
        match self {
            Self::Attribute(it) => it.span,
            Self::Call(it) => it.span,
            Self::Subscript(it) => it.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub span: TextRange,
    pub dot: Token,
    pub name: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub span: TextRange,
    pub open: Token,
    pub arguments: Option<Box<Node>>,
    pub close: Token,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscript {
    pub span: TextRange,
    pub open: Token,
    pub subscripts: Box<Node>,
    pub close: Token,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LambdaKind {
    Lambda,
    /// A lambda whose body may not be a conditional expression.
    LambdaNoCond,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub span: TextRange,
    pub kind: LambdaKind,
    pub lambda_kw: Token,
    pub parameters: Option<ParameterList>,
    pub colon: Token,
    pub body: Node,
}

/// `for targets in iter`, followed by the rest of the comprehension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompFor {
    pub span: TextRange,
    pub for_kw: Token,
    pub targets: Box<Node>,
    pub in_kw: Token,
    pub iter: Box<Node>,
    pub next: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompIf {
    pub span: TextRange,
    pub if_kw: Token,
    pub test: Box<Node>,
    pub next: Option<Box<Node>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YieldFrom {
    pub span: TextRange,
    pub yield_kw: Token,
    pub from_kw: Token,
    pub value: Box<Node>,
}
