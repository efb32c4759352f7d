use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenType,
    /// Parsed value of a `Number` token, `0.0` for everything else.
    pub value: f64,
    pub lexeme: Rc<str>,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenType, value: f64, lexeme: Rc<str>, line: usize) -> Self {
        Token {
            kind,
            value,
            lexeme,
            line,
        }
    }

    pub fn is(&self, kind: TokenType) -> bool {
        self.kind == kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Number,
    Minus,
    Plus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen,
    Dollar,
    Identifier,
    Equal,

    Error,
    End,
}
