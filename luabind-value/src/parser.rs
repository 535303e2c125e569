use log::trace;

use crate::error::{SyntaxError, SyntaxErrorKind};
use crate::lexer::{Lexer, Span, Token, TokenKind};
use crate::{LuaTable, LuaValue, TableKey};

/// Deepest table nesting accepted, matching Lua's C-stack limit.
const MAX_DEPTH: usize = 200;

type ParseResult<T> = Result<T, SyntaxError>;

/// Read a literal configuration chunk.
///
/// The chunk is `[return] exp [;]`, where `exp` is built only from
/// literals and table constructors. An empty chunk reads as `nil`.
///
/// ```
/// use luabind_value::{LuaValue, from_str};
///
/// let v = from_str("return { name = 'api', 8080 }").unwrap();
/// let t = v.as_table().unwrap();
/// assert_eq!(t.get_str("name"), Some(&LuaValue::from("api")));
/// assert_eq!(t.get_int(1), Some(&LuaValue::Integer(8080)));
/// ```
pub fn from_str(src: &str) -> Result<LuaValue, SyntaxError> {
    Parser::new(src)
        .and_then(|mut parser| parser.parse_chunk())
        .map_err(|err| err.with_source(src))
}

struct Parser<'src> {
    lexer: Lexer<'src>,
    current: Token<'src>,
    lookahead: Option<Token<'src>>,
    depth: usize,
}

impl<'src> Parser<'src> {
    fn new(src: &'src str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(src);
        let current = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current,
            lookahead: None,
            depth: 0,
        })
    }

    fn advance(&mut self) -> ParseResult<Token<'src>> {
        let next = match self.lookahead.take() {
            Some(token) => token,
            None => self.lexer.next_token()?,
        };
        Ok(core::mem::replace(&mut self.current, next))
    }

    fn peek_next(&mut self) -> ParseResult<&Token<'src>> {
        if self.lookahead.is_none() {
            self.lookahead = Some(self.lexer.next_token()?);
        }
        match &self.lookahead {
            Some(token) => Ok(token),
            None => Err(self.unexpected("a token")),
        }
    }

    fn unexpected(&self, expected: &'static str) -> SyntaxError {
        let kind = match &self.current.kind {
            TokenKind::Eof => SyntaxErrorKind::UnexpectedEof { expected },
            other => SyntaxErrorKind::UnexpectedToken {
                found: other.describe(),
                expected,
            },
        };
        SyntaxError::new(kind, self.current.span.clone())
    }

    fn expect(&mut self, kind: TokenKind<'src>, expected: &'static str) -> ParseResult<Span> {
        if self.current.kind == kind {
            Ok(self.advance()?.span)
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn parse_chunk(&mut self) -> ParseResult<LuaValue> {
        if self.current.kind == TokenKind::Eof {
            return Ok(LuaValue::Nil);
        }
        if self.current.kind == TokenKind::Return {
            self.advance()?;
            if matches!(self.current.kind, TokenKind::Eof | TokenKind::Semi) {
                self.eat_semi()?;
                return self.finish(LuaValue::Nil);
            }
        }
        let value = self.parse_exp()?;
        self.eat_semi()?;
        self.finish(value)
    }

    fn eat_semi(&mut self) -> ParseResult<()> {
        if self.current.kind == TokenKind::Semi {
            self.advance()?;
        }
        Ok(())
    }

    fn finish(&mut self, value: LuaValue) -> ParseResult<LuaValue> {
        if self.current.kind == TokenKind::Eof {
            Ok(value)
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn parse_exp(&mut self) -> ParseResult<LuaValue> {
        let value = self.parse_simple()?;
        if let TokenKind::Op(op) = self.current.kind {
            return Err(SyntaxError::new(
                SyntaxErrorKind::UnsupportedExpression(format!("operator '{op}'")),
                self.current.span.clone(),
            ));
        }
        Ok(value)
    }

    fn parse_simple(&mut self) -> ParseResult<LuaValue> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Nil => Ok(LuaValue::Nil),
            TokenKind::True => Ok(LuaValue::Boolean(true)),
            TokenKind::False => Ok(LuaValue::Boolean(false)),
            TokenKind::Integer(i) => Ok(LuaValue::Integer(i)),
            TokenKind::Float(x) => Ok(LuaValue::Float(x)),
            TokenKind::String(s) => Ok(LuaValue::String(s)),
            TokenKind::Minus => self.parse_negation(token.span),
            TokenKind::LBrace => self.parse_table(token.span),
            TokenKind::Name(name) => Err(SyntaxError::new(
                SyntaxErrorKind::UnsupportedExpression(format!("name '{name}'")),
                token.span,
            )),
            TokenKind::Eof => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedEof {
                    expected: "an expression",
                },
                token.span,
            )),
            other => Err(SyntaxError::new(
                SyntaxErrorKind::UnexpectedToken {
                    found: other.describe(),
                    expected: "an expression",
                },
                token.span,
            )),
        }
    }

    /// Folds a run of unary minus signs in a loop; only the parity matters.
    fn parse_negation(&mut self, minus: Span) -> ParseResult<LuaValue> {
        let mut signs = 1_usize;
        while self.current.kind == TokenKind::Minus {
            self.advance()?;
            signs += 1;
        }
        let negate = signs % 2 == 1;

        let operand_start = self.current.span.start;
        match self.parse_simple()? {
            LuaValue::Integer(i) if negate => Ok(LuaValue::Integer(i.wrapping_neg())),
            LuaValue::Float(x) if negate => Ok(LuaValue::Float(-x)),
            number @ (LuaValue::Integer(_) | LuaValue::Float(_)) => Ok(number),
            other => Err(SyntaxError::new(
                SyntaxErrorKind::UnsupportedExpression(format!(
                    "negation of a {}",
                    other.kind().type_name()
                )),
                minus.start..operand_start.max(minus.end),
            )),
        }
    }

    fn parse_table(&mut self, open: Span) -> ParseResult<LuaValue> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(SyntaxError::new(SyntaxErrorKind::NestingTooDeep, open));
        }

        let mut table = LuaTable::new();
        // Positional items are stored after all keyed fields, so they win
        // over an explicit `[i] = ...` for the same index.
        let mut positional = Vec::new();

        while self.current.kind != TokenKind::RBrace {
            match &self.current.kind {
                TokenKind::LBracket => {
                    let open_key = self.advance()?.span;
                    let key = self.parse_exp()?;
                    let close_key = self.expect(TokenKind::RBracket, "']'")?;
                    self.expect(TokenKind::Assign, "'='")?;
                    let value = self.parse_exp()?;
                    let key = TableKey::from_value(&key).map_err(|why| {
                        SyntaxError::new(
                            SyntaxErrorKind::InvalidTableKey(match why {
                                crate::InvalidKey::Nil => "nil",
                                crate::InvalidKey::NaN => "NaN",
                                crate::InvalidKey::Table => "table",
                            }),
                            open_key.start..close_key.end,
                        )
                    })?;
                    table.set(key, value);
                }
                TokenKind::Name(name) => {
                    let name = *name;
                    if self.peek_next()?.kind == TokenKind::Assign {
                        self.advance()?;
                        self.advance()?;
                        let value = self.parse_exp()?;
                        table.set(name, value);
                    } else {
                        positional.push(self.parse_exp()?);
                    }
                }
                _ => positional.push(self.parse_exp()?),
            }

            match self.current.kind {
                TokenKind::Comma | TokenKind::Semi => {
                    self.advance()?;
                }
                TokenKind::RBrace => {}
                _ => return Err(self.unexpected("',' or '}'")),
            }
        }
        self.advance()?;

        for (i, item) in positional.into_iter().enumerate() {
            table.set(TableKey::Integer(i as i64 + 1), item);
        }

        trace!(
            "read table: {} array items, {} entries",
            table.len(),
            table.entry_count()
        );
        self.depth -= 1;
        Ok(LuaValue::Table(table))
    }
}
