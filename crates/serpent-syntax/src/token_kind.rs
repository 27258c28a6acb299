#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum TokenKind {
    NAME,
    NUMBER,
    STRING,
    TYPE_COMMENT,

    NEWLINE,
    INDENT,
    DEDENT,

    FALSE_KW,
    NONE_KW,
    TRUE_KW,
    AND_KW,
    AS_KW,
    ASSERT_KW,
    ASYNC_KW,
    AWAIT_KW,
    BREAK_KW,
    CLASS_KW,
    CONTINUE_KW,
    DEF_KW,
    DEL_KW,
    ELIF_KW,
    ELSE_KW,
    EXCEPT_KW,
    FINALLY_KW,
    FOR_KW,
    FROM_KW,
    GLOBAL_KW,
    IF_KW,
    IMPORT_KW,
    IN_KW,
    IS_KW,
    LAMBDA_KW,
    NONLOCAL_KW,
    NOT_KW,
    OR_KW,
    PASS_KW,
    RAISE_KW,
    RETURN_KW,
    TRY_KW,
    WHILE_KW,
    WITH_KW,
    YIELD_KW,

    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACKET,
    RIGHT_BRACKET,
    LEFT_BRACE,
    RIGHT_BRACE,
    DOT,
    ELLIPSIS,
    COMMA,
    COLON,
    SEMICOLON,
    ARROW,
    AT,
    EQ,
    COLON_EQ,

    PLUS,
    MINUS,
    STAR,
    DOUBLE_STAR,
    SLASH,
    DOUBLE_SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    TILDE,
    SHL,
    SHR,
    LT,
    GT,
    LT_EQ,
    GT_EQ,
    EQ_EQ,
    NOT_EQ,

    PLUS_EQ,
    MINUS_EQ,
    STAR_EQ,
    AT_EQ,
    SLASH_EQ,
    PERCENT_EQ,
    AMP_EQ,
    PIPE_EQ,
    CARET_EQ,
    SHL_EQ,
    SHR_EQ,
    DOUBLE_STAR_EQ,
    DOUBLE_SLASH_EQ,

    UNKNOWN,
    EOF,
}

use TokenKind::*;

impl TokenKind {
    pub fn from_keyword(ident: &str) -> Option<Self> {
        Some(match ident {
            "False" => FALSE_KW,
            "None" => NONE_KW,
            "True" => TRUE_KW,
            "and" => AND_KW,
            "as" => AS_KW,
            "assert" => ASSERT_KW,
            "async" => ASYNC_KW,
            "await" => AWAIT_KW,
            "break" => BREAK_KW,
            "class" => CLASS_KW,
            "continue" => CONTINUE_KW,
            "def" => DEF_KW,
            "del" => DEL_KW,
            "elif" => ELIF_KW,
            "else" => ELSE_KW,
            "except" => EXCEPT_KW,
            "finally" => FINALLY_KW,
            "for" => FOR_KW,
            "from" => FROM_KW,
            "global" => GLOBAL_KW,
            "if" => IF_KW,
            "import" => IMPORT_KW,
            "in" => IN_KW,
            "is" => IS_KW,
            "lambda" => LAMBDA_KW,
            "nonlocal" => NONLOCAL_KW,
            "not" => NOT_KW,
            "or" => OR_KW,
            "pass" => PASS_KW,
            "raise" => RAISE_KW,
            "return" => RETURN_KW,
            "try" => TRY_KW,
            "while" => WHILE_KW,
            "with" => WITH_KW,
            "yield" => YIELD_KW,
            _ => return None,
        })
    }

    pub fn is_keyword(self) -> bool {
        (FALSE_KW as u8..=YIELD_KW as u8).contains(&(self as u8))
    }

    pub fn is_augmented_assign(self) -> bool {
        (PLUS_EQ as u8..=DOUBLE_SLASH_EQ as u8).contains(&(self as u8))
    }

    /// The fixed spelling of the kind, or its name for kinds whose text varies.
    pub fn as_str(self) -> &'static str {
        match self {
            NAME => "NAME",
            NUMBER => "NUMBER",
            STRING => "STRING",
            TYPE_COMMENT => "TYPE_COMMENT",
            NEWLINE => "NEWLINE",
            INDENT => "INDENT",
            DEDENT => "DEDENT",
            FALSE_KW => "False",
            NONE_KW => "None",
            TRUE_KW => "True",
            AND_KW => "and",
            AS_KW => "as",
            ASSERT_KW => "assert",
            ASYNC_KW => "async",
            AWAIT_KW => "await",
            BREAK_KW => "break",
            CLASS_KW => "class",
            CONTINUE_KW => "continue",
            DEF_KW => "def",
            DEL_KW => "del",
            ELIF_KW => "elif",
            ELSE_KW => "else",
            EXCEPT_KW => "except",
            FINALLY_KW => "finally",
            FOR_KW => "for",
            FROM_KW => "from",
            GLOBAL_KW => "global",
            IF_KW => "if",
            IMPORT_KW => "import",
            IN_KW => "in",
            IS_KW => "is",
            LAMBDA_KW => "lambda",
            NONLOCAL_KW => "nonlocal",
            NOT_KW => "not",
            OR_KW => "or",
            PASS_KW => "pass",
            RAISE_KW => "raise",
            RETURN_KW => "return",
            TRY_KW => "try",
            WHILE_KW => "while",
            WITH_KW => "with",
            YIELD_KW => "yield",
            LEFT_PAREN => "(",
            RIGHT_PAREN => ")",
            LEFT_BRACKET => "[",
            RIGHT_BRACKET => "]",
            LEFT_BRACE => "{",
            RIGHT_BRACE => "}",
            DOT => ".",
            ELLIPSIS => "...",
            COMMA => ",",
            COLON => ":",
            SEMICOLON => ";",
            ARROW => "->",
            AT => "@",
            EQ => "=",
            COLON_EQ => ":=",
            PLUS => "+",
            MINUS => "-",
            STAR => "*",
            DOUBLE_STAR => "**",
            SLASH => "/",
            DOUBLE_SLASH => "//",
            PERCENT => "%",
            AMP => "&",
            PIPE => "|",
            CARET => "^",
            TILDE => "~",
            SHL => "<<",
            SHR => ">>",
            LT => "<",
            GT => ">",
            LT_EQ => "<=",
            GT_EQ => ">=",
            EQ_EQ => "==",
            NOT_EQ => "!=",
            PLUS_EQ => "+=",
            MINUS_EQ => "-=",
            STAR_EQ => "*=",
            AT_EQ => "@=",
            SLASH_EQ => "/=",
            PERCENT_EQ => "%=",
            AMP_EQ => "&=",
            PIPE_EQ => "|=",
            CARET_EQ => "^=",
            SHL_EQ => "<<=",
            SHR_EQ => ">>=",
            DOUBLE_STAR_EQ => "**=",
            DOUBLE_SLASH_EQ => "//=",
            UNKNOWN => "UNKNOWN",
            EOF => "EOF",
        }
    }

    /// How the kind reads in an error message.
    pub fn describe(self) -> String {
        match self {
            NAME => "name".to_owned(),
            NUMBER => "number".to_owned(),
            STRING => "string".to_owned(),
            TYPE_COMMENT => "type comment".to_owned(),
            NEWLINE => "newline".to_owned(),
            INDENT => "indent".to_owned(),
            DEDENT => "dedent".to_owned(),
            UNKNOWN => "invalid token".to_owned(),
            EOF => "end of input".to_owned(),
            kind => format!("'{}'", kind.as_str()),
        }
    }
}
