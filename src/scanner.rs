use crate::token::*;
use std::{error::Error, fmt, rc::Rc};

/// Unrecognised character in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxErr {
    pub lexeme: Rc<str>,
    pub line: usize,
}

impl fmt::Display for SyntaxErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Syntax error: Unexpected '{}'", self.line, self.lexeme)
    }
}

impl Error for SyntaxErr {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cursor {
    index: usize,
    line: usize,
}

pub struct Scanner<'a> {
    str: &'a [char],
    cursor: Cursor,
    // Set once End or Error has been handed out.
    done: bool,
}

fn is_identifier_char(c: &char) -> bool {
    c.is_ascii_alphanumeric() || *c == '_'
}

impl<'a> Scanner<'a> {
    pub fn new(str: &'a [char]) -> Self {
        Self {
            str,
            cursor: Cursor { index: 0, line: 1 },
            done: false,
        }
    }

    pub fn line(&self) -> usize {
        self.cursor.line
    }

    pub fn next_token(&mut self) -> Token {
        let (tok, cursor) = self.scan_from(self.cursor);
        self.cursor = cursor;
        tok
    }

    /// Scans the upcoming token without moving the scanner.
    pub fn peek_token(&self) -> Token {
        self.scan_from(self.cursor).0
    }

    fn scan_from(&self, mut cur: Cursor) -> (Token, Cursor) {
        while let Some(&c) = self.str.get(cur.index) {
            match c {
                '\n' => cur.line += 1,
                ' ' | '\t' => {}
                _ => break,
            }
            cur.index += 1;
        }

        let start = cur.index;
        let Some(&c) = self.str.get(cur.index) else {
            return (Token::new(TokenType::End, 0.0, "".into(), cur.line), cur);
        };
        cur.index += 1;

        let kind = match c {
            '=' => TokenType::Equal,
            '+' => TokenType::Plus,
            '-' => TokenType::Minus,
            '*' => TokenType::Star,
            '/' => TokenType::Slash,
            '^' => TokenType::Caret,
            '(' => TokenType::LeftParen,
            ')' => TokenType::RightParen,
            '$' => TokenType::Dollar,
            c if c.is_ascii_alphabetic() || c == '_' => {
                while self.str.get(cur.index).is_some_and(is_identifier_char) {
                    cur.index += 1;
                }
                TokenType::Identifier
            }
            '0'..='9' => {
                while self.str.get(cur.index).is_some_and(char::is_ascii_digit) {
                    cur.index += 1;
                }
                if self.str.get(cur.index) == Some(&'.') {
                    cur.index += 1;
                    while self.str.get(cur.index).is_some_and(char::is_ascii_digit) {
                        cur.index += 1;
                    }
                }
                TokenType::Number
            }
            _ => TokenType::Error,
        };

        let lexeme = self.str[start..cur.index].iter().collect::<String>();
        let (kind, value) = match kind {
            TokenType::Number => match lexeme.parse() {
                Ok(num) => (kind, num),
                Err(_) => (TokenType::Error, 0.0),
            },
            _ => (kind, 0.0),
        };

        (Token::new(kind, value, lexeme.into(), cur.line), cur)
    }
}

/// Yields tokens up to and including the first `End` or `Error`.
impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let tok = self.next_token();
        self.done = matches!(tok.kind, TokenType::End | TokenType::Error);
        Some(tok)
    }
}

/// Scans a whole line. The returned tokens always end with `End`.
pub fn scan(code: &str) -> Result<Vec<Token>, SyntaxErr> {
    let chars = code.chars().collect::<Vec<_>>();
    let mut result = vec![];

    for tok in Scanner::new(&chars) {
        if tok.is(TokenType::Error) {
            return Err(SyntaxErr {
                lexeme: tok.lexeme,
                line: tok.line,
            });
        }
        result.push(tok);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn peek_does_not_advance() {
        let src = chars("  abc + 1");
        let mut scanner = Scanner::new(&src);

        let peeked = scanner.peek_token();
        assert_eq!(peeked, scanner.peek_token());
        assert_eq!(peeked, scanner.next_token());
        assert_eq!(scanner.next_token().kind, TokenType::Plus);
    }

    #[test]
    fn newlines_bump_line() {
        let src = chars("1\n\n  x");
        let mut scanner = Scanner::new(&src);

        assert_eq!(scanner.next_token().line, 1);
        let x = scanner.next_token();
        assert_eq!(x.kind, TokenType::Identifier);
        assert_eq!(x.line, 3);
        assert_eq!(scanner.line(), 3);
    }

    #[test]
    fn iterator_stops_after_end() {
        let src = chars("1");
        let kinds = Scanner::new(&src).map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenType::Number, TokenType::End]);
    }

    #[test]
    fn iterator_stops_at_error() {
        let src = chars("1 # 2");
        let kinds = Scanner::new(&src).map(|t| t.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![TokenType::Number, TokenType::Error]);
    }
}
