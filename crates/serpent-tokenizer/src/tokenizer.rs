use std::collections::VecDeque;

use serpent_syntax::Token;
use serpent_syntax::TokenKind::{self, *};
use text_size::{TextRange, TextSize};

use crate::TokenSource;
use crate::cursor::Cursor;

const TAB_SIZE: u32 = 8;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Emit `# type: ...` comments that follow code as `TYPE_COMMENT` tokens.
    pub type_comments: bool,
}

pub struct Tokenizer<'src> {
    text: &'src str,
    cursor: Cursor<'src>,
    options: TokenizerOptions,
    current: Token,
    pending: VecDeque<Token>,
    indents: Vec<u32>,
    nesting: u32,
    at_line_start: bool,
    line_has_tokens: bool,
    finished: bool,
}

impl<'src> Tokenizer<'src> {
    pub fn new(text: &'src str) -> Self {
        Self::with_options(text, TokenizerOptions::default())
    }

    pub fn with_options(text: &'src str, options: TokenizerOptions) -> Self {
        let mut tokenizer = Self {
            text,
            cursor: Cursor::new(text),
            options,
            current: Token::eof(TextSize::new(0)),
            pending: VecDeque::new(),
            indents: vec![0],
            nesting: 0,
            at_line_start: true,
            line_has_tokens: false,
            finished: false,
        };
        tokenizer.current = tokenizer.lex();
        tokenizer
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    fn slice(&self, start: TextSize) -> &'src str {
        &self.text[TextRange::new(start, self.cursor.offset())]
    }

    fn range(&self, start: TextSize) -> TextRange {
        TextRange::new(start, self.cursor.offset())
    }

    fn lex(&mut self) -> Token {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return token;
            }

            if self.finished {
                return Token::eof(self.cursor.offset());
            }

            if self.at_line_start && self.nesting == 0 {
                self.at_line_start = false;
                if let Some(token) = self.indentation() {
                    return token;
                }
                continue;
            }

            if let Some(comment) = self.trivia() {
                return comment;
            }

            if self.cursor.is_eof() {
                return self.end_of_input();
            }

            let start = self.cursor.offset();
            if matches!(self.cursor.peek(), '\n' | '\r') {
                self.newline_chars();
                self.at_line_start = true;
                self.line_has_tokens = false;
                return Token::new(NEWLINE, self.range(start));
            }

            self.line_has_tokens = true;
            return self.token(start);
        }
    }

    /// Measures the indentation of a new line. Blank and comment-only lines
    /// are consumed whole and produce nothing.
    fn indentation(&mut self) -> Option<Token> {
        let start = self.cursor.offset();
        let mut width = 0;

        loop {
            match self.cursor.peek() {
                ' ' => width += 1,
                '\t' => width = (width / TAB_SIZE + 1) * TAB_SIZE,
                '\x0c' => width = 0,
                _ => break,
            }
            self.cursor.advance();
        }

        if self.cursor.is_eof() {
            return None;
        }

        if matches!(self.cursor.peek(), '#' | '\n' | '\r') {
            self.cursor.advance_while(|c| c != '\n' && c != '\r');
            self.newline_chars();
            self.at_line_start = true;
            return None;
        }

        let innermost = self.indents.last().copied().unwrap_or(0);
        if width > innermost {
            self.indents.push(width);
            return Some(Token::new(INDENT, self.range(start)));
        }

        let here = TextRange::empty(self.cursor.offset());
        while self.indents.last().is_some_and(|&indent| indent > width) {
            self.indents.pop();
            self.pending.push_back(Token::new(DEDENT, here));
        }
        if self.indents.last().copied().unwrap_or(0) != width {
            self.pending.push_back(Token::with_text(
                UNKNOWN,
                here,
                "unindent does not match any outer indentation level",
            ));
        }

        None
    }

    /// Skips whitespace, comments and joined lines. A type comment is
    /// returned as a token when enabled.
    fn trivia(&mut self) -> Option<Token> {
        loop {
            if self.cursor.is_eof() {
                return None;
            }

            match self.cursor.peek() {
                ' ' | '\t' | '\x0c' => {
                    self.cursor.advance();
                }
                '\\' if matches!(self.cursor.second(), '\n' | '\r') => {
                    self.cursor.advance();
                    self.newline_chars();
                }
                '\n' | '\r' if self.nesting > 0 => self.newline_chars(),
                '#' => {
                    let start = self.cursor.offset();
                    self.cursor.advance_while(|c| c != '\n' && c != '\r');
                    let text = self.slice(start);
                    if self.options.type_comments && self.line_has_tokens && is_type_comment(text)
                    {
                        return Some(Token::with_text(TYPE_COMMENT, self.range(start), text));
                    }
                }
                _ => return None,
            }
        }
    }

    fn newline_chars(&mut self) {
        if self.cursor.eat('\r') {
            self.cursor.eat('\n');
        } else {
            self.cursor.eat('\n');
        }
    }

    fn end_of_input(&mut self) -> Token {
        let here = TextRange::empty(self.cursor.offset());
        self.finished = true;

        if self.line_has_tokens {
            self.line_has_tokens = false;
            self.pending.push_back(Token::new(NEWLINE, here));
        }
        while self.indents.len() > 1 {
            self.indents.pop();
            self.pending.push_back(Token::new(DEDENT, here));
        }

        self.pending.pop_front().unwrap_or_else(|| Token::new(EOF, here))
    }

    fn token(&mut self, start: TextSize) -> Token {
        let first = self.cursor.advance();

        let kind = match first {
            c if is_identifier_start(c) => return self.name_or_prefixed_string(start),
            '0'..='9' => return self.number(start, first),
            '.' if self.cursor.peek().is_ascii_digit() => return self.number(start, first),
            '"' | '\'' => return self.string(start, first),
            '(' => self.open(LEFT_PAREN),
            '[' => self.open(LEFT_BRACKET),
            '{' => self.open(LEFT_BRACE),
            ')' => self.close(RIGHT_PAREN),
            ']' => self.close(RIGHT_BRACKET),
            '}' => self.close(RIGHT_BRACE),
            ',' => COMMA,
            ';' => SEMICOLON,
            '~' => TILDE,
            ':' => self.with_eq(COLON, COLON_EQ),
            '.' => {
                if self.cursor.peek() == '.' && self.cursor.second() == '.' {
                    self.cursor.advance();
                    self.cursor.advance();
                    ELLIPSIS
                } else {
                    DOT
                }
            }
            '+' => self.with_eq(PLUS, PLUS_EQ),
            '-' => {
                if self.cursor.eat('>') {
                    ARROW
                } else {
                    self.with_eq(MINUS, MINUS_EQ)
                }
            }
            '*' => {
                if self.cursor.eat('*') {
                    self.with_eq(DOUBLE_STAR, DOUBLE_STAR_EQ)
                } else {
                    self.with_eq(STAR, STAR_EQ)
                }
            }
            '/' => {
                if self.cursor.eat('/') {
                    self.with_eq(DOUBLE_SLASH, DOUBLE_SLASH_EQ)
                } else {
                    self.with_eq(SLASH, SLASH_EQ)
                }
            }
            '%' => self.with_eq(PERCENT, PERCENT_EQ),
            '@' => self.with_eq(AT, AT_EQ),
            '&' => self.with_eq(AMP, AMP_EQ),
            '|' => self.with_eq(PIPE, PIPE_EQ),
            '^' => self.with_eq(CARET, CARET_EQ),
            '<' => {
                if self.cursor.eat('<') {
                    self.with_eq(SHL, SHL_EQ)
                } else {
                    self.with_eq(LT, LT_EQ)
                }
            }
            '>' => {
                if self.cursor.eat('>') {
                    self.with_eq(SHR, SHR_EQ)
                } else {
                    self.with_eq(GT, GT_EQ)
                }
            }
            '=' => self.with_eq(EQ, EQ_EQ),
            '!' if self.cursor.eat('=') => NOT_EQ,
            c => {
                return Token::with_text(UNKNOWN, self.range(start), format!("invalid character {c:?}"));
            }
        };

        Token::new(kind, self.range(start))
    }

    fn open(&mut self, kind: TokenKind) -> TokenKind {
        self.nesting += 1;
        kind
    }

    fn close(&mut self, kind: TokenKind) -> TokenKind {
        self.nesting = self.nesting.saturating_sub(1);
        kind
    }

    fn with_eq(&mut self, plain: TokenKind, with_eq: TokenKind) -> TokenKind {
        if self.cursor.eat('=') { with_eq } else { plain }
    }

    fn name_or_prefixed_string(&mut self, start: TextSize) -> Token {
        self.cursor.advance_while(is_identifier_continue);
        let text = self.slice(start);

        if is_string_prefix(text) && matches!(self.cursor.peek(), '"' | '\'') {
            let quote = self.cursor.advance();
            return self.string(start, quote);
        }

        match TokenKind::from_keyword(text) {
            Some(keyword) => Token::new(keyword, self.range(start)),
            None => Token::with_text(NAME, self.range(start), text),
        }
    }

    fn number(&mut self, start: TextSize, first: char) -> Token {
        if first == '0' && matches!(self.cursor.peek(), 'x' | 'X' | 'o' | 'O' | 'b' | 'B') {
            let hex = matches!(self.cursor.advance(), 'x' | 'X');
            self.digits(hex);
            return Token::with_text(NUMBER, self.range(start), self.slice(start));
        }

        if first != '.' {
            self.digits(false);
            if self.cursor.eat('.') {
                self.digits(false);
            }
        } else {
            self.digits(false);
        }

        if matches!(self.cursor.peek(), 'e' | 'E') {
            let exponent = match self.cursor.second() {
                '+' | '-' => self.cursor.third().is_ascii_digit(),
                c => c.is_ascii_digit(),
            };
            if exponent {
                self.cursor.advance();
                if !self.cursor.eat('+') {
                    self.cursor.eat('-');
                }
                self.digits(false);
            }
        }

        if !self.cursor.eat('j') {
            self.cursor.eat('J');
        }

        Token::with_text(NUMBER, self.range(start), self.slice(start))
    }

    fn digits(&mut self, hex: bool) {
        self.cursor.advance_while(|c| c == '_' || c.is_ascii_digit() || (hex && c.is_ascii_hexdigit()));
    }

    /// Lexes the rest of a string literal whose opening quote is consumed.
    fn string(&mut self, start: TextSize, quote: char) -> Token {
        let triple = self.cursor.peek() == quote && self.cursor.second() == quote;

        let terminated = if triple {
            self.cursor.advance();
            self.cursor.advance();
            self.triple_quoted_body(quote)
        } else {
            self.single_quoted_body(quote)
        };

        match terminated {
            Ok(()) => Token::with_text(STRING, self.range(start), self.slice(start)),
            Err(message) => Token::with_text(UNKNOWN, self.range(start), message),
        }
    }

    fn single_quoted_body(&mut self, quote: char) -> Result<(), &'static str> {
        loop {
            if self.cursor.is_eof() || matches!(self.cursor.peek(), '\n' | '\r') {
                return Err("unterminated string literal");
            }
            match self.cursor.advance() {
                '\\' => {
                    if matches!(self.cursor.peek(), '\n' | '\r') {
                        self.newline_chars();
                    } else {
                        self.cursor.advance();
                    }
                }
                c if c == quote => return Ok(()),
                _ => {}
            }
        }
    }

    fn triple_quoted_body(&mut self, quote: char) -> Result<(), &'static str> {
        loop {
            if self.cursor.is_eof() {
                return Err("unterminated triple-quoted string literal");
            }
            match self.cursor.advance() {
                '\\' => {
                    self.cursor.advance();
                }
                c if c == quote && self.cursor.peek() == quote && self.cursor.second() == quote => {
                    self.cursor.advance();
                    self.cursor.advance();
                    return Ok(());
                }
                _ => {}
            }
        }
    }
}

impl TokenSource for Tokenizer<'_> {
    fn current(&self) -> &Token {
        &self.current
    }

    fn current_offset(&self) -> TextSize {
        self.current.range.start()
    }

    fn advance(&mut self) {
        if self.current.kind != EOF {
            self.current = self.lex();
        }
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

fn is_identifier_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

fn is_string_prefix(text: &str) -> bool {
    matches!(
        text.to_ascii_lowercase().as_str(),
        "r" | "u" | "b" | "f" | "br" | "rb" | "fr" | "rf"
    )
}

fn is_type_comment(comment: &str) -> bool {
    comment.trim_start_matches('#').trim_start().starts_with("type:")
}
