use super::token::{Token, TokenKind};
use crate::error::{Error, LexErrorKind, Result};

/// Pull-based scanner for xnilang scripts.
///
/// Each call to [`Scanner::next_token`] yields the next token or `None` at
/// the end of input. The scanner only holds a cursor over the source and
/// never backtracks.
pub struct Scanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Set once an error has been returned through the iterator
    failed: bool,
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n' | '\u{a0}')
}

impl Scanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        Scanner {
            source: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            failed: false,
        }
    }

    /// Character offset of the cursor
    pub fn cursor(&self) -> usize {
        self.current
    }

    /// Scans all remaining tokens and returns them as a vector
    pub fn scan_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Returns the next token, or `None` once the input is exhausted
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        while !self.is_at_end() {
            let c = self.peek();

            if is_separator(c) {
                self.advance();
                continue;
            }

            let (position, line, column) = (self.current, self.line, self.column);

            let token = match c {
                '(' => {
                    self.advance();
                    Token::new(TokenKind::LeftParen, "(", position, line, column)
                }
                ')' => {
                    self.advance();
                    Token::new(TokenKind::RightParen, ")", position, line, column)
                }
                c if c.is_ascii_digit() || c == '-' => self.scan_operand()?,
                c if c.is_alphabetic() => self.scan_symbol(),
                c => {
                    return Err(Error::Lex {
                        position,
                        kind: LexErrorKind::UnexpectedCharacter { code: c as u32 },
                    });
                }
            };

            return Ok(Some(token));
        }

        Ok(None)
    }

    fn scan_operand(&mut self) -> Result<Token> {
        let (position, line, column) = (self.current, self.line, self.column);
        let mut text = String::new();
        let mut has_decimal_point = false;

        while !self.is_at_end() {
            let c = self.peek();
            match c {
                '.' => {
                    if has_decimal_point {
                        return Err(self.lex_error(LexErrorKind::DuplicateDecimalPoint));
                    }
                    has_decimal_point = true;
                }
                '-' => {
                    if !text.is_empty() {
                        return Err(self.lex_error(LexErrorKind::MisplacedMinus));
                    }
                }
                c if c.is_ascii_digit() => {}
                c if c.is_alphabetic() => {
                    return Err(self.lex_error(LexErrorKind::InvalidOperandCharacter(c)));
                }
                _ => break,
            }
            text.push(self.advance());
        }

        if !text.parse::<f64>().is_ok_and(f64::is_finite) {
            return Err(Error::Lex {
                position,
                kind: LexErrorKind::MalformedOperand(text),
            });
        }

        let kind = if has_decimal_point {
            TokenKind::Float
        } else {
            TokenKind::Integer
        };
        Ok(Token::new(kind, text, position, line, column))
    }

    fn scan_symbol(&mut self) -> Token {
        let (position, line, column) = (self.current, self.line, self.column);
        let mut text = String::new();

        // `.` joins two words (`area.circle`) but never ends a symbol
        while !self.is_at_end() {
            let c = self.peek();
            if c.is_alphanumeric() || (c == '.' && self.peek_next().is_alphabetic()) {
                text.push(self.advance());
            } else {
                break;
            }
        }

        Token::new(TokenKind::Symbol, text, position, line, column)
    }

    fn lex_error(&self, kind: LexErrorKind) -> Error {
        Error::Lex {
            position: self.current,
            kind,
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn peek_next(&self) -> char {
        if self.current + 1 >= self.source.len() {
            '\0'
        } else {
            self.source[self.current + 1]
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let next = self.next_token().transpose();
        if matches!(next, Some(Err(_))) {
            self.failed = true;
        }
        next
    }
}
