//! Type expressions used in schema documents.
//!
//! # Syntax
//!
//! - `bool`, `int64`, `string`, ...: builtin types
//! - `genesis.Document`: a declared type id
//! - `[]T` slice, `[N]T` fixed-size array
//! - `map[K]V`: map
//! - `*T`: pointer
//! - `chan T`, `func`, `func()`, `interface{}`, `any`, `unsafe.Pointer`:
//!   accepted so that schemas can describe them, rejected later by the emitter

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
enum Token<'src> {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("*")]
    Star,

    #[token("{}")]
    EmptyBraces,

    #[token("()")]
    EmptyParens,

    #[token("map")]
    Map,

    #[token("chan")]
    Chan,

    #[token("interface")]
    Interface,

    #[token("func")]
    Func,

    #[regex(r"[0-9]+", |lex| lex.slice())]
    Number(&'src str),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*", |lex| lex.slice())]
    Ident(&'src str),
}

/// Parsed type expression. Names are not resolved yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TypeExpr<'src> {
    Name(&'src str),
    Slice(Box<TypeExpr<'src>>),
    Array(u64, Box<TypeExpr<'src>>),
    Map(Box<TypeExpr<'src>>, Box<TypeExpr<'src>>),
    Pointer(Box<TypeExpr<'src>>),
    Chan(Box<TypeExpr<'src>>),
    Interface,
    Func,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {span:?} in `{input}`")]
pub struct TypeExprError {
    pub message: String,
    pub span: Range<usize>,
    pub input: String,
}

struct Parser<'src> {
    tokens: Vec<(Token<'src>, Range<usize>)>,
    pos: usize,
    input: &'src str,
}

impl<'src> Parser<'src> {
    fn new(input: &'src str) -> Result<Self, TypeExprError> {
        let mut tokens = Vec::new();
        for (result, span) in Token::lexer(input).spanned() {
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(_) => {
                    return Err(TypeExprError {
                        message: format!("unexpected character {:?}", &input[span.clone()]),
                        span,
                        input: input.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            tokens,
            pos: 0,
            input,
        })
    }

    fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(t, _)| *t)
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn current_span(&self) -> Range<usize> {
        self.tokens
            .get(self.pos)
            .map(|(_, s)| s.clone())
            .unwrap_or(self.input.len()..self.input.len())
    }

    fn error(&self, message: impl Into<String>) -> TypeExprError {
        TypeExprError {
            message: message.into(),
            span: self.current_span(),
            input: self.input.to_string(),
        }
    }

    fn expect(&mut self, expected: Token<'src>, what: &str) -> Result<(), TypeExprError> {
        match self.peek() {
            Some(t) if std::mem::discriminant(&t) == std::mem::discriminant(&expected) => {
                self.advance();
                Ok(())
            }
            Some(t) => Err(self.error(format!("expected {what}, got {t:?}"))),
            None => Err(self.error(format!("expected {what}, got end of input"))),
        }
    }

    fn parse_type(&mut self) -> Result<TypeExpr<'src>, TypeExprError> {
        match self.peek() {
            Some(Token::Star) => {
                self.advance();
                Ok(TypeExpr::Pointer(Box::new(self.parse_type()?)))
            }
            Some(Token::LBracket) => {
                self.advance();
                match self.peek() {
                    Some(Token::RBracket) => {
                        self.advance();
                        Ok(TypeExpr::Slice(Box::new(self.parse_type()?)))
                    }
                    Some(Token::Number(digits)) => {
                        let len = digits
                            .parse::<u64>()
                            .map_err(|_| self.error("array length out of range"))?;
                        self.advance();
                        self.expect(Token::RBracket, "`]`")?;
                        Ok(TypeExpr::Array(len, Box::new(self.parse_type()?)))
                    }
                    _ => Err(self.error("expected `]` or array length")),
                }
            }
            Some(Token::Map) => {
                self.advance();
                self.expect(Token::LBracket, "`[`")?;
                let key = self.parse_type()?;
                self.expect(Token::RBracket, "`]`")?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map(Box::new(key), Box::new(value)))
            }
            Some(Token::Chan) => {
                self.advance();
                Ok(TypeExpr::Chan(Box::new(self.parse_type()?)))
            }
            Some(Token::Interface) => {
                self.advance();
                self.expect(Token::EmptyBraces, "`{}`")?;
                Ok(TypeExpr::Interface)
            }
            Some(Token::Func) => {
                self.advance();
                if self.peek() == Some(Token::EmptyParens) {
                    self.advance();
                }
                Ok(TypeExpr::Func)
            }
            Some(Token::Ident(name)) => {
                self.advance();
                Ok(TypeExpr::Name(name))
            }
            Some(t) => Err(self.error(format!("expected type, got {t:?}"))),
            None => Err(self.error("expected type, got end of input")),
        }
    }
}

/// Parse a complete type expression.
pub fn parse(input: &str) -> Result<TypeExpr<'_>, TypeExprError> {
    let mut parser = Parser::new(input)?;
    let expr = parser.parse_type()?;
    if let Some(t) = parser.peek() {
        return Err(parser.error(format!("unexpected trailing {t:?}")));
    }
    Ok(expr)
}
