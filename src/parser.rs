use crate::expr::*;
use crate::token::*;

use std::{error::Error, fmt, fmt::Display, rc::Rc};

// Nesting allowed before the parser gives up on a line, well short of the stack.
const MAX_DEPTH: usize = 256;

/// Outcome of one grammar rule.
///
/// `Broken` is an operator whose operand was missing. Its diagnostic is already
/// recorded, but it still stands in as an operand so enclosing operators do not
/// report it again. Only `Absent` means nothing was written.
enum Node {
    Complete(ExprRef),
    Broken,
    Absent,
}

impl Node {
    fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrType {
    ExpectedExpression,
    UnclosedGroup,
    MissingLeftOperand(Rc<str>),
    MissingRightOperand(Rc<str>),
    MissingUnaryOperand(Rc<str>),
    MissingAssignedValue,
    NotLvalue,
    TrailingToken(Rc<str>),
    TooDeep,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub data: ParseErrType,
    pub line: usize,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Parse error: ", self.line)?;
        match &self.data {
            ParseErrType::ExpectedExpression => write!(f, "Expected expression."),
            ParseErrType::UnclosedGroup => write!(f, "Expected ')' after expression."),
            ParseErrType::MissingLeftOperand(op) => write!(f, "Missing expression before: '{op}'"),
            ParseErrType::MissingRightOperand(op) => write!(f, "Missing expression after: '{op}'"),
            ParseErrType::MissingUnaryOperand(op) => {
                write!(f, "Missing expression after unary: '{op}'")
            }
            ParseErrType::MissingAssignedValue => write!(f, "Expected expression after '='"),
            ParseErrType::NotLvalue => write!(f, "Invalid assignment target."),
            ParseErrType::TrailingToken(lexeme) => {
                write!(f, "Unexpected '{lexeme}' after expression.")
            }
            ParseErrType::TooDeep => write!(f, "Expression nested too deeply."),
        }
    }
}

/// Everything reported while parsing one line, in order of detection.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseErr {
    pub diagnostics: Vec<Diagnostic>,
}

impl Display for ParseErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{diag}")?;
        }
        Ok(())
    }
}

impl Error for ParseErr {}

pub struct Parser<'a> {
    tokens: &'a [Token],
    index: usize,
    depth: usize,
    // Set on `TooDeep`; everything after it would only be noise.
    gave_up: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    fn is_at_end(&self) -> bool {
        self.peek().map_or(true, |x| x.is(TokenType::End))
    }

    fn check(&self, tok: TokenType) -> bool {
        !self.is_at_end() && self.peek().is_some_and(|x| x.is(tok))
    }

    fn match_next_lits<const N: usize>(&mut self, ttypes: [TokenType; N]) -> bool {
        let res = ttypes.iter().any(|x| self.check(*x));
        if res {
            self.index += 1;
        }

        res
    }

    fn match_operator<const N: usize>(&mut self, ops: [(TokenType, BinaryOp); N]) -> Option<BinaryOp> {
        let (_, op) = ops.into_iter().find(|(t, _)| self.check(*t))?;
        self.index += 1;
        Some(op)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.index - 1]
    }

    // Line of the token under the cursor, or of the last token once we ran off the end.
    fn line(&self) -> usize {
        self.peek()
            .or_else(|| self.tokens.last())
            .map_or(1, |x| x.line)
    }

    fn report(&mut self, data: ParseErrType) {
        if self.gave_up {
            return;
        }
        let line = self.line();
        self.diagnostics.push(Diagnostic { data, line });
    }

    pub fn new(tokens: &'a [Token]) -> Self {
        Parser {
            tokens,
            index: 0,
            depth: 0,
            gave_up: false,
            diagnostics: vec![],
        }
    }

    pub fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn parse(&mut self) -> Result<ExprRef, ParseErr> {
        let expr = self.expression();

        if !self.is_at_end() {
            if self.check(TokenType::Equal) {
                self.report(ParseErrType::NotLvalue);
            } else if let Some(tok) = self.peek() {
                let lexeme = tok.lexeme.clone();
                self.report(ParseErrType::TrailingToken(lexeme));
            }
        }

        match expr {
            Node::Complete(expr) if !self.had_error() => Ok(expr),
            _ => Err(ParseErr {
                diagnostics: self.diagnostics.clone(),
            }),
        }
    }

    /// Runs `rule` one level deeper, or abandons the line past `MAX_DEPTH`.
    fn nested(&mut self, rule: fn(&mut Self) -> Node) -> Node {
        if self.depth >= MAX_DEPTH {
            self.report(ParseErrType::TooDeep);
            self.gave_up = true;
            self.index = self.tokens.len().saturating_sub(1);
            return Node::Broken;
        }

        self.depth += 1;
        let res = rule(self);
        self.depth -= 1;
        res
    }

    fn expression(&mut self) -> Node {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> Node {
        if self.match_next_lits([TokenType::Identifier]) {
            let target = self.previous().clone();
            if self.match_next_lits([TokenType::Equal]) {
                let val = self.expression();
                if val.is_absent() {
                    self.report(ParseErrType::MissingAssignedValue);
                }
                return match val {
                    Node::Complete(val) => {
                        Node::Complete(Box::new(Expr::Assignment(target.lexeme, target.line, val)))
                    }
                    _ => Node::Broken,
                };
            }
            // Not an assignment, give the identifier back to `term`.
            self.index -= 1;
        }
        self.term()
    }

    fn term(&mut self) -> Node {
        let mut expr = self.factor();

        while let Some(op) =
            self.match_operator([(TokenType::Plus, BinaryOp::Add), (TokenType::Minus, BinaryOp::Subtract)])
        {
            expr = self.finish_binary(expr, op, Self::factor);
        }

        expr
    }

    fn factor(&mut self) -> Node {
        let mut expr = self.power();

        while let Some(op) = self.match_operator([
            (TokenType::Star, BinaryOp::Multiply),
            (TokenType::Slash, BinaryOp::Divide),
        ]) {
            expr = self.finish_binary(expr, op, Self::power);
        }

        expr
    }

    fn power(&mut self) -> Node {
        let mut expr = self.unary();

        // The right operand recurses into `power`, which makes `^` right-associative.
        while let Some(op) = self.match_operator([(TokenType::Caret, BinaryOp::Power)]) {
            expr = self.finish_binary(expr, op, Self::power);
        }

        expr
    }

    fn finish_binary(&mut self, left: Node, op: BinaryOp, operand: fn(&mut Self) -> Node) -> Node {
        let op_tok = self.previous().clone();

        if left.is_absent() {
            self.report(ParseErrType::MissingLeftOperand(op_tok.lexeme.clone()));
        }

        let right = operand(self);
        if right.is_absent() {
            self.report(ParseErrType::MissingRightOperand(op_tok.lexeme));
        }

        match (left, right) {
            (Node::Complete(l), Node::Complete(r)) => Node::Complete(Box::new(Expr::Binary(l, op, op_tok.line, r))),
            _ => Node::Broken,
        }
    }

    // Every nesting path (groups, `^` chains, negation chains) comes through here.
    fn unary(&mut self) -> Node {
        self.nested(Self::negation)
    }

    fn negation(&mut self) -> Node {
        if self.match_next_lits([TokenType::Minus]) {
            let op_tok = self.previous().clone();
            let right = self.unary();
            if right.is_absent() {
                self.report(ParseErrType::MissingUnaryOperand(op_tok.lexeme));
            }
            return match right {
                Node::Complete(right) => Node::Complete(Box::new(Expr::Unary(op_tok.line, right))),
                _ => Node::Broken,
            };
        }
        self.primary()
    }

    fn primary(&mut self) -> Node {
        if self.match_next_lits([TokenType::Number]) {
            return Node::Complete(Box::new(Expr::Literal(self.previous().value)));
        }

        if self.match_next_lits([TokenType::Identifier, TokenType::Dollar]) {
            let tok = self.previous();
            return Node::Complete(Box::new(Expr::Identifier(tok.lexeme.clone(), tok.line)));
        }

        if self.match_next_lits([TokenType::LeftParen]) {
            let expr = self.expression();
            if !self.match_next_lits([TokenType::RightParen]) {
                self.report(ParseErrType::UnclosedGroup);
            }
            return expr;
        }

        self.report(ParseErrType::ExpectedExpression);
        Node::Absent
    }
}
