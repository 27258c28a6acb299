use std::fmt::Display;
use std::ops::Range;

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextSize;
use thiserror::Error;

/// The first problem found while parsing. Parsing stops where it is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at {position:?}: {message}")]
    Syntax { position: TextSize, message: String },
    /// Input the grammar recognizes but the parser does not handle.
    #[error("unsupported construct at {position:?}: {construct}")]
    Unsupported { position: TextSize, construct: &'static str },
}

impl ParseError {
    pub fn syntax(position: TextSize, message: impl Into<String>) -> Self {
        Self::Syntax { position, message: message.into() }
    }

    pub fn unsupported(position: TextSize, construct: &'static str) -> Self {
        Self::Unsupported { position, construct }
    }

    pub fn position(&self) -> TextSize {
        match self {
            Self::Syntax { position, .. } | Self::Unsupported { position, .. } => *position,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Syntax { message, .. } => message,
            Self::Unsupported { construct, .. } => construct,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let span = annotation_span(text, self.position());
        let snippet = Snippet::source(text)
            .origin(path)
            .annotation(Level::Error.span(span).label("here"))
            .fold(true);

        let message = match self {
            Self::Syntax { message, .. } => Level::Error.title(message).snippet(snippet),
            Self::Unsupported { construct, .. } => Level::Error
                .title(construct)
                .snippet(snippet)
                .footer(Level::Note.title("this construct is not supported by the parser")),
        };
        renderer.render(message)
    }
}

/// The character at `position`, or an empty span at the end of the text.
fn annotation_span(text: &str, position: TextSize) -> Range<usize> {
    let start = usize::from(position).min(text.len());
    let start = (0..=start).rev().find(|&index| text.is_char_boundary(index)).unwrap_or(0);
    let len = text[start..].chars().next().map_or(0, char::len_utf8);
    start..start + len
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let error = ParseError::syntax(TextSize::new(4), "'break' outside loop");
        assert_eq!(error.to_string(), "syntax error at 4: 'break' outside loop");

        let error = ParseError::unsupported(TextSize::new(0), "match statement");
        assert_eq!(error.to_string(), "unsupported construct at 0: match statement");
        assert!(error.is_unsupported());
        assert_eq!(error.message(), "match statement");
    }

    #[test]
    fn annotation_covers_one_character() {
        assert_eq!(annotation_span("a + b", TextSize::new(2)), 2..3);
        assert_eq!(annotation_span("a + b", TextSize::new(5)), 5..5);
        assert_eq!(annotation_span("é", TextSize::new(0)), 0..2);
    }

    #[test]
    fn render_mentions_origin_and_message() {
        let text = "x = )\n";
        let error = ParseError::syntax(TextSize::new(4), "expected expression, found ')'");
        let rendered = error.render(&Renderer::plain(), "test.py", text).to_string();
        assert!(rendered.contains("expected expression, found ')'"), "{rendered}");
        assert!(rendered.contains("test.py"), "{rendered}");
    }
}
