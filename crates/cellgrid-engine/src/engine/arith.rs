//! Arithmetic expression evaluator.
//!
//! A recursive descent parser over `+ - * / ( )`, unary signs, decimal
//! literals and cell identifiers. Identifiers resolve to the coerced numeric
//! value of the referenced cell (absent or non-numeric cells are 0). Anything
//! else is rejected, and the parser evaluates as it goes, so there is no AST.
//!
//! Precedence (lowest to highest):
//! 1. Addition/Subtraction: +, -
//! 2. Multiplication/Division: *, /
//! 3. Unary: -, +
//! 4. Primary: numbers, cell identifiers, parentheses

use super::cell::Sheet;
use super::cell_ref::CellRef;
use super::format::coerce_number;
use crate::error::{EvalError, EvalResult};

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 256;

/// Evaluate an arithmetic expression (without the leading `=`).
pub fn eval_arithmetic(expression: &str, sheet: &Sheet) -> EvalResult<f64> {
    let mut parser = ArithParser::new(expression, sheet)?;
    let value = parser.parse_expression()?;

    if parser.current != Token::Eof {
        return Err(EvalError::Parse {
            offset: parser.token_start,
            message: format!(
                "Unexpected input after expression: '{}'",
                &parser.input[parser.token_start..]
            ),
        });
    }

    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Eof,
}

struct ArithParser<'a> {
    input: &'a str,
    sheet: &'a Sheet,
    pos: usize,
    token_start: usize,
    current: Token,
    depth: usize,
}

impl<'a> ArithParser<'a> {
    fn new(input: &'a str, sheet: &'a Sheet) -> EvalResult<Self> {
        let mut parser = ArithParser {
            input,
            sheet,
            pos: 0,
            token_start: 0,
            current: Token::Eof,
            depth: 0,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> EvalResult<()> {
        self.skip_whitespace();
        self.token_start = self.pos;
        self.current = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> EvalResult<Token> {
        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit() || c == '.' {
            return self.scan_number();
        }

        if c.is_ascii_uppercase() {
            return self.scan_cell_reference();
        }

        Err(EvalError::UnexpectedToken {
            offset: self.pos,
            token: c.to_string(),
        })
    }

    fn scan_number(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        self.consume_digits();
        if self.peek_char() == Some('.') {
            self.advance();
            self.consume_digits();
        }

        // Lowercase `e` only: `E3` is always a cell identifier.
        if self.peek_char() == Some('e') {
            let rest = &self.input[self.pos + 1..];
            let sign_len = usize::from(rest.starts_with(['+', '-']));
            if rest[sign_len..].starts_with(|c: char| c.is_ascii_digit()) {
                self.pos += 1 + sign_len;
                self.consume_digits();
            }
        }

        let text = &self.input[start..self.pos];
        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|_| EvalError::UnexpectedToken {
                offset: start,
                token: text.to_string(),
            })
    }

    fn scan_cell_reference(&mut self) -> EvalResult<Token> {
        let start = self.pos;
        while self.peek_char().is_some_and(|c| c.is_ascii_uppercase()) {
            self.advance();
        }
        self.consume_digits();

        let text = &self.input[start..self.pos];
        let cell_ref = CellRef::from_str(text).ok_or_else(|| EvalError::UnexpectedToken {
            offset: start,
            token: text.to_string(),
        })?;
        Ok(Token::Number(coerce_number(self.sheet.raw_value(&cell_ref))))
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn consume_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn consume(&mut self) -> EvalResult<Token> {
        let token = std::mem::replace(&mut self.current, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn descend(&mut self) -> EvalResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(EvalError::TooDeep(MAX_DEPTH));
        }
        Ok(())
    }

    // === Expression parsing with precedence ===

    fn parse_expression(&mut self) -> EvalResult<f64> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_multiplicative()?;

        loop {
            match self.current {
                Token::Plus => {
                    self.consume()?;
                    left += self.parse_multiplicative()?;
                }
                Token::Minus => {
                    self.consume()?;
                    left -= self.parse_multiplicative()?;
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> EvalResult<f64> {
        let mut left = self.parse_unary()?;

        loop {
            match self.current {
                Token::Star => {
                    self.consume()?;
                    left *= self.parse_unary()?;
                }
                Token::Slash => {
                    self.consume()?;
                    let right = self.parse_unary()?;
                    left /= right;
                    if !left.is_finite() {
                        return Err(EvalError::NonFinite);
                    }
                }
                _ => break,
            }
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> EvalResult<f64> {
        match self.current {
            Token::Minus => {
                self.consume()?;
                self.descend()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(-operand)
            }
            Token::Plus => {
                self.consume()?;
                self.descend()?;
                let operand = self.parse_unary()?;
                self.depth -= 1;
                Ok(operand)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> EvalResult<f64> {
        match self.current {
            Token::Number(n) => {
                self.consume()?;
                Ok(n)
            }
            Token::LeftParen => {
                let open_at = self.token_start;
                self.consume()?;
                self.descend()?;
                let value = self.parse_expression()?;
                self.depth -= 1;
                if self.current != Token::RightParen {
                    return Err(EvalError::Parse {
                        offset: open_at,
                        message: "Unbalanced parenthesis".to_string(),
                    });
                }
                self.consume()?;
                Ok(value)
            }
            Token::Eof => Err(EvalError::Parse {
                offset: self.token_start,
                message: "Unexpected end of expression".to_string(),
            }),
            ref other => Err(EvalError::Parse {
                offset: self.token_start,
                message: format!("Unexpected token {:?}", other),
            }),
        }
    }
}
