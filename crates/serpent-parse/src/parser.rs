use std::ops::{Deref, DerefMut};

use serpent_errors::ParseError;
use serpent_syntax::ast::{EvalInput, FileInput, FuncTypeInput, SingleInput};
use serpent_syntax::{Token, TokenKind, TokenSet};
use serpent_tokenizer::TokenSource;
use text_size::{TextRange, TextSize};

use crate::ParseOptions;
use crate::grammar::inputs;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Stack left before a nesting level switches to a fresh segment.
const RED_ZONE: usize = 256 * 1024;
const STACK_SEGMENT: usize = 2 * 1024 * 1024;

/// Where the statement being parsed sits. `break` and `continue` need an
/// enclosing loop, `return` an enclosing function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Context {
    pub(crate) loop_depth: u32,
    pub(crate) function_depth: u32,
}

pub struct Parser<'t> {
    source: &'t mut dyn TokenSource,
    options: ParseOptions,
    context: Context,
    depth: u32,
}

impl<'t> Parser<'t> {
    pub fn new(source: &'t mut dyn TokenSource) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &'t mut dyn TokenSource, options: ParseOptions) -> Self {
        Self { source, options, context: Context::default(), depth: 0 }
    }

    /// One interactive statement. The parser can be called again for the
    /// next one.
    pub fn single_input(&mut self) -> Result<SingleInput, ParseError> {
        self.reset("single");
        inputs::single_input(self)
    }

    pub fn file_input(&mut self) -> Result<FileInput, ParseError> {
        self.reset("file");
        inputs::file_input(self)
    }

    pub fn eval_input(&mut self) -> Result<EvalInput, ParseError> {
        self.reset("eval");
        inputs::eval_input(self)
    }

    /// The signature type comment of a function, `(int, str) -> bool`.
    pub fn func_type_input(&mut self) -> Result<FuncTypeInput, ParseError> {
        self.reset("function type");
        inputs::func_type_input(self)
    }

    fn reset(&mut self, mode: &str) {
        log::debug!("parsing {mode} input at {:?}", self.offset());
        self.context = Context::default();
        self.depth = 0;
    }

    pub(crate) fn current(&self) -> &Token {
        self.source.current()
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.source.current().kind
    }

    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    pub(crate) fn at_set(&self, set: &TokenSet) -> bool {
        set.contains(self.kind())
    }

    pub(crate) fn offset(&self) -> TextSize {
        self.source.current_offset()
    }

    pub(crate) fn span_from(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.offset().max(start))
    }

    pub(crate) fn bump(&mut self) -> Token {
        let token = self.source.current().clone();
        self.source.advance();
        token
    }

    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.at(kind).then(|| self.bump())
    }

    pub(crate) fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.at(kind) { Ok(self.bump()) } else { Err(self.unexpected(what)) }
    }

    /// An error at the current token saying what was expected instead.
    pub(crate) fn unexpected(&self, what: &str) -> ParseError {
        let token = self.current();
        match (&token.text, token.kind) {
            (Some(problem), TokenKind::UNKNOWN) => self.error(problem.to_string()),
            _ => self.error(format!("expected {what}, found {}", token.kind.describe())),
        }
    }

    pub(crate) fn error(&self, message: impl Into<String>) -> ParseError {
        self.error_at(self.offset(), message)
    }

    pub(crate) fn error_at(&self, position: TextSize, message: impl Into<String>) -> ParseError {
        let error = ParseError::syntax(position, message);
        log::debug!("{error}");
        error
    }

    pub(crate) fn unsupported(&self, position: TextSize, construct: &'static str) -> ParseError {
        let error = ParseError::unsupported(position, construct);
        log::debug!("{error}");
        error
    }

    /// Runs `f` one nesting level deeper, failing once the configured
    /// maximum depth is reached. The stack grows on demand, so the limit
    /// holds on threads of any stack size.
    pub(crate) fn nested<R>(&mut self, f: impl FnOnce(&mut Self) -> PResult<R>) -> PResult<R> {
        if self.depth >= self.options.max_depth {
            return Err(self.error("too many nested expressions or blocks"));
        }

        self.depth += 1;
        let result = stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, || f(self));
        self.depth -= 1;
        result
    }

    pub(crate) fn in_loop(&self) -> bool {
        self.context.loop_depth > 0
    }

    pub(crate) fn in_function(&self) -> bool {
        self.context.function_depth > 0
    }

    /// The body of a `while` or `for` loop.
    pub(crate) fn enter_loop(&mut self) -> ContextGuard<'_, 't> {
        let saved = self.context;
        self.context.loop_depth += 1;
        ContextGuard::new(self, saved)
    }

    /// The body of a function. Loops around the definition do not enclose it.
    pub(crate) fn enter_function(&mut self) -> ContextGuard<'_, 't> {
        let saved = self.context;
        self.context = Context { loop_depth: 0, function_depth: saved.function_depth + 1 };
        ContextGuard::new(self, saved)
    }

    /// The body of a class, which is neither in a loop nor in a function.
    pub(crate) fn enter_class(&mut self) -> ContextGuard<'_, 't> {
        let saved = self.context;
        self.context = Context::default();
        ContextGuard::new(self, saved)
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> Context {
        self.context
    }
}

/// Restores the enclosing context when dropped, whether the guarded body
/// parsed or failed.
pub(crate) struct ContextGuard<'p, 't> {
    parser: &'p mut Parser<'t>,
    saved: Context,
}

impl<'p, 't> ContextGuard<'p, 't> {
    fn new(parser: &'p mut Parser<'t>, saved: Context) -> Self {
        log::trace!("enter {:?} (from {saved:?})", parser.context);
        Self { parser, saved }
    }
}

impl Drop for ContextGuard<'_, '_> {
    fn drop(&mut self) {
        log::trace!("leave {:?} (back to {:?})", self.parser.context, self.saved);
        self.parser.context = self.saved;
    }
}

impl<'t> Deref for ContextGuard<'_, 't> {
    type Target = Parser<'t>;

    fn deref(&self) -> &Self::Target {
        self.parser
    }
}

impl DerefMut for ContextGuard<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.parser
    }
}
