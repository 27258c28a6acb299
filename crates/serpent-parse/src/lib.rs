//! A recursive-descent parser for Python 3.8 source.
//!
//! The parser pulls tokens from a [`TokenSource`] and builds the lossless
//! tree of [`serpent_syntax::ast`]. It stops at the first error.

mod grammar;
mod options;
mod parser;


pub use options::{DEFAULT_MAX_DEPTH, ParseOptions};
pub use parser::Parser;
pub use serpent_errors::ParseError;
use serpent_syntax::AstNode;
pub use serpent_syntax::ast::{EvalInput, FileInput, FuncTypeInput, SingleInput};
pub use serpent_tokenizer::TokenSource;

/// The start rule to parse with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Single,
    File,
    Eval,
    FuncType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Single(SingleInput),
    File(FileInput),
    Eval(EvalInput),
    FuncType(FuncTypeInput),
}

impl Tree {
    pub fn as_ast(&self) -> &dyn AstNode {
        match self {
            Self::Single(input) => input,
            Self::File(input) => input,
            Self::Eval(input) => input,
            Self::FuncType(input) => input,
        }
    }
}

pub fn parse(
    source: &mut dyn TokenSource,
    mode: Mode,
    options: ParseOptions,
) -> Result<Tree, ParseError> {
    let mut parser = Parser::with_options(source, options);
    let tree = match mode {
        Mode::Single => Tree::Single(parser.single_input()?),
        Mode::File => Tree::File(parser.file_input()?),
        Mode::Eval => Tree::Eval(parser.eval_input()?),
        Mode::FuncType => Tree::FuncType(parser.func_type_input()?),
    };
    Ok(tree)
}

pub fn parse_single_input(source: &mut dyn TokenSource) -> Result<SingleInput, ParseError> {
    Parser::new(source).single_input()
}

pub fn parse_file_input(source: &mut dyn TokenSource) -> Result<FileInput, ParseError> {
    Parser::new(source).file_input()
}

pub fn parse_eval_input(source: &mut dyn TokenSource) -> Result<EvalInput, ParseError> {
    Parser::new(source).eval_input()
}

pub fn parse_func_type_input(source: &mut dyn TokenSource) -> Result<FuncTypeInput, ParseError> {
    Parser::new(source).func_type_input()
}
