//! units::parser — tokenizer and recursive-descent quantity grammar.
//!
//! Purpose
//! -------
//! Turn a quantity string such as `"4 Å kg m µs^-2 K^-1 ppm"` into a
//! magnitude and an ordered list of `(symbol, integer power)` unit factors.
//! The numeric prefix is evaluated by a small dedicated arithmetic grammar,
//! never by a general-purpose interpreter, so malformed input fails with a
//! positioned [`UnitsError`] instead of arbitrary evaluation behavior.
//!
//! Key behaviors
//! -------------
//! - Apply the fixed Unicode→ASCII substitutions before tokenizing.
//! - Tokenize into numbers, symbols, and the operators `^ * / -`; any other
//!   character fails with [`UnitsError::UnexpectedCharacter`].
//! - Parse a leading numeric expression over `{number, unary minus, *, /,
//!   ^integer}`; a missing prefix defaults the magnitude to 1.
//! - Parse the trailing unit expression as whitespace-separated
//!   `<symbol>[^<integer power>]` tokens combined multiplicatively.
//!
//! Invariants & assumptions
//! ------------------------
//! - Error positions are byte offsets into the substituted string.
//! - The returned magnitude is finite; division underflow/overflow in the
//!   prefix surfaces as [`UnitsError::NonFiniteMagnitude`].
//! - Symbol resolution happens downstream (`CompositeUnit`); this module is
//!   purely lexical/syntactic apart from exponent integrality checks.
//!
//! Grammar
//! -------
//! ```text
//! quantity := [numeric] unit* EOF
//! numeric  := term { ('*' | '/') term }
//! term     := ['-'] number [ '^' exponent ]
//! unit     := symbol [ '^' exponent ]
//! exponent := ['-'] integer-number
//! ```

use crate::units::errors::{UnitsError, UnitsResult};
use crate::units::symbols::substitute;

/// Lexical output of the tokenizer.
#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Number(f64),
    Symbol(String),
    Caret,
    Star,
    Slash,
    Minus,
}

#[derive(Debug, Clone, PartialEq)]
struct Token {
    kind: Tok,
    pos: usize,
}

/// Raw parse result: magnitude plus unresolved unit factors in input order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ParsedQuantity {
    pub magnitude: f64,
    pub factors: Vec<(String, i32)>,
}

fn describe(kind: &Tok) -> String {
    match kind {
        Tok::Number(value) => value.to_string(),
        Tok::Symbol(symbol) => symbol.clone(),
        Tok::Caret => "^".to_string(),
        Tok::Star => "*".to_string(),
        Tok::Slash => "/".to_string(),
        Tok::Minus => "-".to_string(),
    }
}

fn tokenize(text: &str) -> UnitsResult<Vec<Token>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = text[i..].chars().next().unwrap_or('\0');
        if c.is_whitespace() {
            i += c.len_utf8();
            continue;
        }
        match c {
            '^' => {
                tokens.push(Token { kind: Tok::Caret, pos: i });
                i += 1;
            }
            '*' => {
                tokens.push(Token { kind: Tok::Star, pos: i });
                i += 1;
            }
            '/' => {
                tokens.push(Token { kind: Tok::Slash, pos: i });
                i += 1;
            }
            '-' => {
                tokens.push(Token { kind: Tok::Minus, pos: i });
                i += 1;
            }
            '0'..='9' | '.' => {
                let start = i;
                while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                    i += 1;
                }
                // Consume a scientific-notation suffix only when an actual
                // exponent follows, so "2 eV" keeps its symbol intact.
                if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
                    let mut j = i + 1;
                    if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
                        j += 1;
                    }
                    if j < bytes.len() && bytes[j].is_ascii_digit() {
                        i = j;
                        while i < bytes.len() && bytes[i].is_ascii_digit() {
                            i += 1;
                        }
                    }
                }
                let literal = &text[start..i];
                let value: f64 = literal.parse().map_err(|_| UnitsError::InvalidNumber {
                    position: start,
                    literal: literal.to_string(),
                })?;
                tokens.push(Token { kind: Tok::Number(value), pos: start });
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                i += c.len_utf8();
                while i < bytes.len() {
                    let next = text[i..].chars().next().unwrap_or('\0');
                    if next.is_alphanumeric() || next == '_' {
                        i += next.len_utf8();
                    } else {
                        break;
                    }
                }
                tokens.push(Token { kind: Tok::Symbol(text[start..i].to_string()), pos: start });
            }
            other => {
                return Err(UnitsError::UnexpectedCharacter { position: i, character: other });
            }
        }
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn unexpected(&self, token: &Token) -> UnitsError {
        UnitsError::UnexpectedToken { position: token.pos, found: describe(&token.kind) }
    }

    /// `exponent := ['-'] integer-number`, validated to fit an `i32`.
    fn parse_exponent(&mut self) -> UnitsResult<i32> {
        let mut negative = false;
        if matches!(self.peek().map(|t| &t.kind), Some(Tok::Minus)) {
            self.bump();
            negative = true;
        }
        let token = match self.bump() {
            Some(token) => token,
            None => {
                return Err(UnitsError::InvalidExponent {
                    position: self.tokens.last().map(|t| t.pos).unwrap_or(0),
                    literal: String::new(),
                });
            }
        };
        let value = match token.kind {
            Tok::Number(value) => value,
            ref other => {
                return Err(UnitsError::InvalidExponent {
                    position: token.pos,
                    literal: describe(other),
                });
            }
        };
        if value.fract() != 0.0 || value.abs() > i32::MAX as f64 {
            return Err(UnitsError::InvalidExponent {
                position: token.pos,
                literal: value.to_string(),
            });
        }
        let magnitude = value as i32;
        Ok(if negative { -magnitude } else { magnitude })
    }

    /// `term := ['-'] number [ '^' exponent ]`
    fn parse_term(&mut self) -> UnitsResult<f64> {
        let mut negative = false;
        if matches!(self.peek().map(|t| &t.kind), Some(Tok::Minus)) {
            self.bump();
            negative = true;
        }
        let token = match self.bump() {
            Some(token) => token,
            None => {
                return Err(UnitsError::UnexpectedToken {
                    position: self.tokens.last().map(|t| t.pos).unwrap_or(0),
                    found: "end of input".to_string(),
                });
            }
        };
        let mut value = match token.kind {
            Tok::Number(value) => value,
            _ => return Err(self.unexpected(&token)),
        };
        if matches!(self.peek().map(|t| &t.kind), Some(Tok::Caret)) {
            self.bump();
            let exponent = self.parse_exponent()?;
            value = value.powi(exponent);
        }
        Ok(if negative { -value } else { value })
    }

    /// `numeric := term { ('*' | '/') term }`
    fn parse_numeric(&mut self) -> UnitsResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            match self.peek().map(|t| &t.kind) {
                Some(Tok::Star) => {
                    self.bump();
                    value *= self.parse_term()?;
                }
                Some(Tok::Slash) => {
                    self.bump();
                    value /= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    /// `unit* EOF`, each `unit := symbol [ '^' exponent ]`.
    fn parse_units(&mut self) -> UnitsResult<Vec<(String, i32)>> {
        let mut factors = Vec::new();
        while let Some(token) = self.bump() {
            let symbol = match token.kind {
                Tok::Symbol(symbol) => symbol,
                _ => return Err(self.unexpected(&token)),
            };
            let mut power = 1;
            if matches!(self.peek().map(|t| &t.kind), Some(Tok::Caret)) {
                self.bump();
                power = self.parse_exponent()?;
            }
            factors.push((symbol, power));
        }
        Ok(factors)
    }
}

/// Parse a quantity string into a magnitude and raw unit factors.
///
/// Applies the Unicode substitutions, evaluates the numeric prefix with the
/// dedicated grammar (defaulting to 1 when absent), and collects the unit
/// tokens in input order. Symbol resolution and factor merging are left to
/// the caller.
pub(crate) fn parse_quantity_string(input: &str) -> UnitsResult<ParsedQuantity> {
    let text = substitute(input);
    if text.trim().is_empty() {
        return Err(UnitsError::EmptyExpression);
    }
    let tokens = tokenize(&text)?;
    let mut parser = Parser { tokens, cursor: 0 };

    let magnitude = match parser.peek().map(|t| &t.kind) {
        Some(Tok::Number(_)) | Some(Tok::Minus) => parser.parse_numeric()?,
        _ => 1.0,
    };
    if !magnitude.is_finite() {
        return Err(UnitsError::NonFiniteMagnitude { value: magnitude });
    }
    let factors = parser.parse_units()?;
    Ok(ParsedQuantity { magnitude, factors })
}
