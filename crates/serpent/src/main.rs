use std::process::ExitCode;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use line_index::LineIndex;
use serpent_errors::Renderer;
use serpent_parse::{Mode, ParseOptions, parse};
use serpent_syntax::{DebugTree, TokenKind};
use serpent_tokenizer::{Tokenizer, TokenizerOptions, tokenize_with};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
enum Options {
    /// Print the syntax tree of a file, or the first error in it.
    Parse {
        path: Utf8PathBuf,
        #[arg(long, value_enum, default_value_t = InputMode::File)]
        mode: InputMode,
        /// Keep `# type:` comments as tokens.
        #[arg(long)]
        type_comments: bool,
        #[arg(long)]
        max_depth: Option<u32>,
    },
    /// Print the token stream of a file.
    Tokens {
        path: Utf8PathBuf,
        #[arg(long)]
        type_comments: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum InputMode {
    Single,
    File,
    Eval,
    FuncType,
}

impl From<InputMode> for Mode {
    fn from(mode: InputMode) -> Self {
        match mode {
            InputMode::Single => Self::Single,
            InputMode::File => Self::File,
            InputMode::Eval => Self::Eval,
            InputMode::FuncType => Self::FuncType,
        }
    }
}

fn read(path: &Utf8Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read `{path}`"))
}

fn main() -> anyhow::Result<ExitCode> {
    match Options::parse() {
        Options::Parse { path, mode, type_comments, max_depth } => {
            let text = read(&path)?;
            let mut options = ParseOptions::default();
            if let Some(max_depth) = max_depth {
                options = options.with_max_depth(max_depth);
            }

            let mut tokenizer = Tokenizer::with_options(&text, TokenizerOptions { type_comments });
            match parse(&mut tokenizer, mode.into(), options) {
                Ok(tree) => {
                    print!("{}", DebugTree(tree.as_ast()));
                    Ok(ExitCode::SUCCESS)
                }
                Err(error) => {
                    let renderer = Renderer::styled();
                    eprintln!("{}", error.render(&renderer, path.as_str(), &text));
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Options::Tokens { path, type_comments } => {
            let text = read(&path)?;
            let line_index = LineIndex::new(&text);

            for token in tokenize_with(&text, TokenizerOptions { type_comments }) {
                let start = line_index.line_col(token.range.start());
                let position = format!("{}:{}", start.line + 1, start.col + 1);
                match token.kind {
                    TokenKind::NAME
                    | TokenKind::NUMBER
                    | TokenKind::STRING
                    | TokenKind::TYPE_COMMENT
                    | TokenKind::UNKNOWN => {
                        println!("{position:<9} {:?} {:?}", token.kind, token.text());
                    }
                    kind => println!("{position:<9} {kind:?}"),
                }
            }

            Ok(ExitCode::SUCCESS)
        }
    }
}
