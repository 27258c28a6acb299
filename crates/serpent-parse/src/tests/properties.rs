//! Invariants checked over every file in `test_data`.

use std::fs;
use std::path::{Path, PathBuf};

use serpent_syntax::{AstNode, NodeOrToken, TextRange, TextSize, TokenKind, children, tokens};
use serpent_tokenizer::{Tokenizer, TokenizerOptions, tokenize_with};

use crate::Parser;

const OPTIONS: TokenizerOptions = TokenizerOptions { type_comments: true };

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "py" {
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        assert!(!cases.is_empty(), "no test cases in {}", test_data_dir.display());
        cases.sort();
        cases
    }
}

#[test]
fn corpus() {
    for case in TestCase::list() {
        let mut tokenizer = Tokenizer::with_options(&case.text, OPTIONS);
        let tree = Parser::new(&mut tokenizer)
            .file_input()
            .unwrap_or_else(|error| panic!("{}: {error}", case.input.display()));

        let name = case.input.display().to_string();
        tree_holds_every_token(&name, &case.text, &tree);
        children_nest_inside_parents(&name, &tree);
        only_trivia_between_tokens(&name, &case.text, &tree);
    }
}

/// The tree yields the token stream back, in order and without gaps.
fn tree_holds_every_token(name: &str, text: &str, tree: &dyn AstNode) {
    let from_tree: Vec<_> = tokens(tree).into_iter().map(|token| (token.kind, token.range)).collect();
    let from_text: Vec<_> =
        tokenize_with(text, OPTIONS).into_iter().map(|token| (token.kind, token.range)).collect();
    assert_eq!(from_tree, from_text, "{name}");
}

fn children_nest_inside_parents(name: &str, node: &dyn AstNode) {
    let span = node.span();
    for child in children(node) {
        let range = match child {
            NodeOrToken::Node(child) => {
                children_nest_inside_parents(name, child);
                child.span()
            }
            NodeOrToken::Token(token) => token.range,
        };
        assert!(
            span.contains_range(range),
            "{name}: {} {span:?} does not contain {range:?}",
            node.label()
        );
    }
}

fn only_trivia_between_tokens(name: &str, text: &str, tree: &dyn AstNode) {
    let mut end = TextSize::new(0);
    for token in tokens(tree) {
        if token.kind == TokenKind::DEDENT || token.kind == TokenKind::EOF {
            continue;
        }
        let gap = &text[TextRange::new(end, token.range.start())];
        assert!(is_trivia(gap), "{name}: {gap:?} before {:?} at {:?}", token.kind, token.range);
        end = token.range.end();
    }
}

fn is_trivia(gap: &str) -> bool {
    gap.lines().all(|line| {
        let line = line.trim_start_matches([' ', '\t', '\x0c']);
        let line = line.strip_suffix('\\').unwrap_or(line).trim_end_matches([' ', '\t', '\r']);
        line.is_empty() || line.starts_with('#')
    })
}
